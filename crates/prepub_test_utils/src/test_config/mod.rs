use std::path::Path;

use schemars::JsonSchema;
use serde::Deserialize;

mod input_options;
pub use input_options::*;
mod output_options;
pub use output_options::*;

use crate::impl_serde_default;

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestConfig {
  #[serde(default, rename = "$schema")]
  pub schema: Option<String>,

  #[serde(default)]
  pub input: InputOptions,

  #[serde(default)]
  pub output: OutputOptions,

  /// When set, the build must fail with exactly this error.
  #[serde(default)]
  pub expected_error: Option<ExpectedError>,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpectedError {
  pub code: String,
  /// The readable message, with paths relative to the fixture folder.
  pub message: String,
}

impl_serde_default!(TestConfig);

impl TestConfig {
  pub fn from_config_path(filepath: &Path) -> Self {
    let content = std::fs::read_to_string(filepath).unwrap_or_else(|_| "{}".to_string());
    serde_json::from_str(&content)
      .unwrap_or_else(|e| panic!("invalid test config {}: {e}", filepath.display()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_config_uses_defaults() {
    let config = TestConfig::default();
    assert_eq!(config.input.input_dir, "src");
    assert!(config.input.strip_dev);
    assert!(config.input.normalize_specifiers);
    assert!(config.expected_error.is_none());
    assert!(config.output.dir.is_none());
  }

  #[test]
  fn write_schema() {
    let schema = schemars::schema_for!(TestConfig);
    let json = serde_json::to_string_pretty(&schema).unwrap();
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_config.schema.json");
    std::fs::write(path, json + "\n").unwrap();
  }
}
