use std::{
  path::PathBuf,
  sync::Arc,
};

use derivative::Derivative;
use prepub_common::{ExtensionConvention, PrefixRedirect, Sentinel};
use sugar_path::SugarPathBuf;

use crate::{BuildError, BuildOutputOptions, UnaryBuildResult, WarningHandler};

pub fn default_source_file_extensions() -> Vec<String> {
  ["js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx"]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct BuildInputOptions {
  pub cwd: PathBuf,
  /// Root of the source tree, relative to `cwd` unless absolute.
  pub input_dir: PathBuf,
  pub sentinel: Sentinel,
  pub strip_dev: bool,
  pub normalize_specifiers: bool,
  pub extensions: ExtensionConvention,
  pub prefix_redirect: PrefixRedirect,
  /// Unit ids, relative to `input_dir`, whose specifiers get the prefix redirect.
  pub root_entries: Vec<String>,
  /// Extensions, without the dot, of the files that are transformed.
  pub source_file_extensions: Vec<String>,
  #[derivative(Debug = "ignore")]
  pub on_warn: WarningHandler,
}

impl Default for BuildInputOptions {
  fn default() -> Self {
    Self {
      cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
      input_dir: PathBuf::from("src"),
      sentinel: Default::default(),
      strip_dev: true,
      normalize_specifiers: true,
      extensions: Default::default(),
      prefix_redirect: Default::default(),
      root_entries: Default::default(),
      source_file_extensions: default_source_file_extensions(),
      on_warn: Arc::new(|err| {
        eprintln!("{}", err);
      }),
    }
  }
}

fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  matches!(chars.next(), Some(c) if c == '_' || c == '$' || c.is_alphabetic())
    && chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric())
}

fn check_extension(name: &str, ext: &str) -> UnaryBuildResult<()> {
  if ext.len() < 2 || !ext.starts_with('.') {
    return Err(BuildError::invalid_option(format!(
      r#"{name} must start with "." and must not be empty, received "{ext}"."#
    )));
  }
  Ok(())
}

impl BuildInputOptions {
  pub fn resolved_input_dir(&self) -> PathBuf {
    self.cwd.join(&self.input_dir).into_normalize()
  }

  /// Normalized form of `root_entries`, comparable with unit ids.
  pub fn root_entry_ids(&self) -> Vec<String> {
    self
      .root_entries
      .iter()
      .map(|entry| {
        let entry = entry.replace('\\', "/");
        entry.trim_start_matches("./").to_string()
      })
      .collect()
  }

  pub fn validate(&self, output_options: &BuildOutputOptions) -> UnaryBuildResult<()> {
    if !is_identifier(self.sentinel.name()) {
      return Err(BuildError::invalid_option(format!(
        r#"sentinel must be a valid identifier, received "{}"."#,
        self.sentinel.name()
      )));
    }
    check_extension("sourceExtension", &self.extensions.source)?;
    check_extension("compiledExtension", &self.extensions.compiled)?;
    if self.source_file_extensions.is_empty() {
      return Err(BuildError::invalid_option(
        "sourceFileExtensions must not be empty.",
      ));
    }
    if !self.root_entries.is_empty() && self.prefix_redirect.source.is_empty() {
      return Err(BuildError::invalid_option(
        "sourcePrefix must not be empty when rootEntries are given.",
      ));
    }

    let input_dir = self.resolved_input_dir();
    if !input_dir.is_dir() {
      return Err(BuildError::invalid_option(format!(
        r#"input directory "{}" does not exist."#,
        input_dir.display()
      )));
    }
    // The output directory is replaced as a whole on publish.
    let output_dir = output_options.dir.clone().into_normalize();
    if input_dir.starts_with(&output_dir) {
      return Err(BuildError::invalid_option(
        "output directory must not be or contain the input directory.",
      ));
    }
    Ok(())
  }
}
