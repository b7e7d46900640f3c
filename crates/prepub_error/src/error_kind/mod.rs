use std::{
  fmt::Display,
  path::{Path, PathBuf},
};

use prepub_common::{StaticStr, CWD};

use crate::utils::{format_quoted_strings, PathExt};

pub mod error_code;

#[derive(Debug)]
pub enum ErrorKind {
  // --- Transform
  ParseJsFailed {
    filename: PathBuf,
    line: usize,
    column: usize,
    reason: StaticStr,
  },
  /// A sentinel-guarded conditional survived the strip pass.
  DevNotRemoved {
    filename: PathBuf,
    line: usize,
    column: usize,
    matched: String,
    sentinel: String,
  },

  // --- Options
  InvalidOption(StaticStr),
  UnmatchedRootEntry {
    entries: Vec<String>,
    input_dir: PathBuf,
  },

  /// This error means that prepub panics because unrecoverable error happens.
  ///
  /// We also use this to replace `panic!()` in the code for graceful shutdown.
  /// But this is not recommended.
  Panic {
    source: anyhow::Error,
  },

  IoError(std::io::Error),
}

impl Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ErrorKind::ParseJsFailed { filename, line, column, reason } => write!(
        f,
        "Parse failed: {}:{line}:{column}: {reason}",
        filename.may_display_relative()
      ),
      ErrorKind::DevNotRemoved { filename, line, column, matched, sentinel } => write!(
        f,
        r#"{sentinel} is not removed: "{}" at {}:{line}:{column}"#,
        matched.trim(),
        filename.may_display_relative()
      ),
      ErrorKind::InvalidOption(reason) => write!(f, "Invalid option: {reason}"),
      ErrorKind::UnmatchedRootEntry { entries, input_dir } => write!(
        f,
        "Root entry {} could not be found in \"{}\".",
        format_quoted_strings(entries),
        input_dir.may_display_relative()
      ),
      ErrorKind::Panic { source } => source.fmt(f),
      ErrorKind::IoError(e) => e.fmt(f),
    }
  }
}

impl ErrorKind {
  /// Shorten the file paths in messages by make them relative to CWD.
  pub fn to_readable_string(&self, cwd: impl AsRef<Path>) -> String {
    let cwd = cwd.as_ref().to_path_buf();
    CWD.set(&cwd, || self.to_string())
  }

  pub fn code(&self) -> &'static str {
    match self {
      ErrorKind::ParseJsFailed { .. } => error_code::PARSE_ERROR,
      ErrorKind::DevNotRemoved { .. } => error_code::DEV_NOT_REMOVED,
      ErrorKind::InvalidOption(_) => error_code::INVALID_OPTION,
      ErrorKind::UnmatchedRootEntry { .. } => error_code::UNMATCHED_ROOT_ENTRY,
      ErrorKind::Panic { .. } => error_code::PANIC,
      ErrorKind::IoError(_) => error_code::IO_ERROR,
    }
  }
}
