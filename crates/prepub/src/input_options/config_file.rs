use std::path::{Path, PathBuf};

use prepub_error::{Error, PathExt};
use serde::Deserialize;

use crate::{InputOptions, OutputOptions};

/// `prepub.config.json`. Every key is optional, missing keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
  pub input_dir: Option<String>,
  /// Output directory.
  pub dir: Option<String>,
  pub sentinel: Option<String>,
  pub strip_dev: Option<bool>,
  pub normalize_specifiers: Option<bool>,
  pub source_extension: Option<String>,
  pub compiled_extension: Option<String>,
  pub source_prefix: Option<String>,
  pub output_prefix: Option<String>,
  pub root_entries: Option<Vec<String>>,
  pub source_file_extensions: Option<Vec<String>>,
}

impl ConfigFile {
  pub const DEFAULT_FILE_NAME: &'static str = "prepub.config.json";

  pub fn parse(content: &str) -> prepub_error::Result<Self> {
    serde_json::from_str(content)
      .map_err(|e| Error::invalid_option(format!("malformed config file: {e}")))
  }

  pub fn from_path(path: &Path) -> prepub_error::Result<Self> {
    let content = std::fs::read_to_string(path)
      .map_err(|e| Error::io_error(e).context(format!("Read config: {}", path.may_display_relative())))?;
    Self::parse(&content).map_err(|e| e.context(format!("Config: {}", path.may_display_relative())))
  }

  /// The config file in `cwd`, if there is one.
  pub fn discover(cwd: &Path) -> prepub_error::Result<Option<Self>> {
    let path = cwd.join(Self::DEFAULT_FILE_NAME);
    if path.is_file() {
      Self::from_path(&path).map(Some)
    } else {
      Ok(None)
    }
  }

  pub fn apply(self, input: &mut InputOptions, output: &mut OutputOptions) {
    if let Some(input_dir) = self.input_dir {
      input.input_dir = PathBuf::from(input_dir);
    }
    if let Some(dir) = self.dir {
      output.dir = Some(dir);
    }
    if let Some(sentinel) = self.sentinel {
      input.sentinel = sentinel;
    }
    if let Some(strip_dev) = self.strip_dev {
      input.strip_dev = strip_dev;
    }
    if let Some(normalize_specifiers) = self.normalize_specifiers {
      input.normalize_specifiers = normalize_specifiers;
    }
    if let Some(ext) = self.source_extension {
      input.source_extension = ext;
    }
    if let Some(ext) = self.compiled_extension {
      input.compiled_extension = ext;
    }
    if let Some(prefix) = self.source_prefix {
      input.source_prefix = prefix;
    }
    if let Some(prefix) = self.output_prefix {
      input.output_prefix = prefix;
    }
    if let Some(entries) = self.root_entries {
      input.root_entries = entries;
    }
    if let Some(exts) = self.source_file_extensions {
      input.source_file_extensions = exts;
    }
  }
}
