use std::borrow::Cow;
use std::fmt::Display;
use std::path::PathBuf;

use swc_core::ecma::atoms::JsWord;
mod loader;
pub use loader::*;
mod conventions;
pub use conventions::*;

scoped_tls::scoped_thread_local!(pub static CWD: PathBuf);

/// Identity of a [SourceUnit]: its path relative to the input root, always `/`-separated.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct UnitId(JsWord);

impl UnitId {
  pub fn new(value: impl Into<JsWord>) -> Self {
    Self(value.into())
  }
}

impl Display for UnitId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for UnitId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

/// One file discovered under the input root, owned by the pipeline for a single pass.
#[derive(Debug, Clone)]
pub struct SourceUnit {
  pub id: UnitId,
  /// Absolute path of the file on disk.
  pub path: PathBuf,
  pub loader: Loader,
  /// Root entries additionally get their source prefix redirected to the output prefix.
  pub is_root_entry: bool,
  pub original: String,
}

pub type StaticStr = Cow<'static, str>;
