use schemars::JsonSchema;
use serde::Deserialize;

use crate::impl_serde_default;

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputOptions {
  /// Relative to the fixture folder. Defaults to `lib`.
  #[serde(default)]
  pub dir: Option<String>,
}

impl_serde_default!(OutputOptions);
