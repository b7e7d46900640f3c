use schemars::JsonSchema;
use serde::Deserialize;

use crate::impl_serde_default;

fn true_by_default() -> bool {
  true
}

fn input_dir_default() -> String {
  "src".to_string()
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InputOptions {
  #[serde(default = "input_dir_default")]
  pub input_dir: String,

  #[serde(default)]
  pub sentinel: Option<String>,

  #[serde(default = "true_by_default")]
  pub strip_dev: bool,

  #[serde(default = "true_by_default")]
  pub normalize_specifiers: bool,

  #[serde(default)]
  pub source_extension: Option<String>,

  #[serde(default)]
  pub compiled_extension: Option<String>,

  #[serde(default)]
  pub source_prefix: Option<String>,

  #[serde(default)]
  pub output_prefix: Option<String>,

  #[serde(default)]
  pub root_entries: Vec<String>,

  #[serde(default)]
  pub source_file_extensions: Option<Vec<String>>,
}

impl_serde_default!(InputOptions);
