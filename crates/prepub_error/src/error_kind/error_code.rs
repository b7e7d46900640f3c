// --- Pipeline
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const DEV_NOT_REMOVED: &str = "DEV_NOT_REMOVED";
pub const INVALID_OPTION: &str = "INVALID_OPTION";
pub const UNMATCHED_ROOT_ENTRY: &str = "UNMATCHED_ROOT_ENTRY";

// --- Generic
pub const IO_ERROR: &str = "IO_ERROR";
pub const PANIC: &str = "PANIC";
