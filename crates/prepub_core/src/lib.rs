use std::sync::Arc;

mod pipeline;
pub use pipeline::*;
mod options;
pub use options::*;
mod transformer;
pub use transformer::*;
mod verifier;
pub use verifier::*;
mod collect;
mod unit_loader;

pub use prepub_swc_visitors::{AppliedAction, TransformAction};

#[derive(Debug, Clone)]
pub struct Asset {
  /// Path relative to the output directory, `/`-separated.
  pub filename: String,
  pub content: String,
  pub actions: Vec<AppliedAction>,
}

pub(crate) type SharedBuildInputOptions = Arc<BuildInputOptions>;

// public exports

pub type BuildError = prepub_error::Error;
pub type BuildResult<T> = Result<T, prepub_error::Errors>;
pub type UnaryBuildResult<T> = prepub_error::Result<T>;
