mod input_options;
pub use input_options::*;
mod output_options;
pub use output_options::*;

use std::sync::Arc;

use crate::BuildError;

pub type WarningHandler = Arc<dyn Fn(BuildError) + Send + Sync>;
