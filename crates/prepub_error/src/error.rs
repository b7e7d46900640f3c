use std::{
  fmt::Display,
  path::{Path, PathBuf},
};

use prepub_common::StaticStr;

use crate::ErrorKind;

#[derive(Debug)]
pub struct Error {
  contexts: Vec<String>,
  pub kind: ErrorKind,
}

impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    self.kind.to_string().eq(&other.kind.to_string())
  }
}

impl Eq for Error {}

impl PartialOrd for Error {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Error {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    self.kind.to_string().cmp(&other.kind.to_string())
  }
}

impl Error {
  fn with_kind(kind: ErrorKind) -> Self {
    Self {
      contexts: vec![],
      kind,
    }
  }

  pub fn context(mut self, context: String) -> Self {
    self.contexts.push(context);
    self
  }

  pub fn contexts(&self) -> &[String] {
    &self.contexts
  }

  pub fn parse_js_failed(
    filename: impl AsRef<Path>,
    line: usize,
    column: usize,
    reason: impl Into<StaticStr>,
  ) -> Self {
    Self::with_kind(ErrorKind::ParseJsFailed {
      filename: filename.as_ref().to_path_buf(),
      line,
      column,
      reason: reason.into(),
    })
  }

  pub fn dev_not_removed(
    filename: impl AsRef<Path>,
    line: usize,
    column: usize,
    matched: String,
    sentinel: &str,
  ) -> Self {
    Self::with_kind(ErrorKind::DevNotRemoved {
      filename: filename.as_ref().to_path_buf(),
      line,
      column,
      matched,
      sentinel: sentinel.to_string(),
    })
  }

  pub fn invalid_option(reason: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::InvalidOption(reason.into()))
  }

  pub fn unmatched_root_entry(entries: Vec<String>, input_dir: PathBuf) -> Self {
    Self::with_kind(ErrorKind::UnmatchedRootEntry { entries, input_dir })
  }

  pub fn io_error(e: std::io::Error) -> Self {
    Self::with_kind(ErrorKind::IoError(e))
  }
}

impl std::convert::From<anyhow::Error> for Error {
  fn from(value: anyhow::Error) -> Self {
    Self::with_kind(ErrorKind::Panic { source: value })
  }
}

impl std::convert::From<std::io::Error> for Error {
  fn from(value: std::io::Error) -> Self {
    Self::io_error(value)
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match &self.kind {
      ErrorKind::Panic { source, .. } => Some(source.as_ref()),
      ErrorKind::IoError(source) => Some(source),
      _ => None,
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for ctx in self.contexts.iter().rev() {
      writeln!(f, "{}: {}", ansi_term::Color::Yellow.paint("context"), ctx)?;
    }

    self.kind.fmt(f)
  }
}
