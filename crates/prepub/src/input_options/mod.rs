use std::{path::PathBuf, sync::Arc};

use derivative::Derivative;
use prepub_common::{ExtensionConvention, PrefixRedirect, Sentinel};
use prepub_core::WarningHandler;
mod config_file;
pub use config_file::*;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct InputOptions {
  pub cwd: PathBuf,
  pub input_dir: PathBuf,
  pub sentinel: String,
  pub strip_dev: bool,
  pub normalize_specifiers: bool,
  pub source_extension: String,
  pub compiled_extension: String,
  pub source_prefix: String,
  pub output_prefix: String,
  pub root_entries: Vec<String>,
  pub source_file_extensions: Vec<String>,
  #[derivative(Debug = "ignore")]
  pub on_warn: WarningHandler,
}

pub fn default_warning_handler() -> WarningHandler {
  Arc::new(|err| {
    eprintln!("{}", err);
  })
}

impl Default for InputOptions {
  fn default() -> Self {
    let extensions = ExtensionConvention::default();
    let redirect = PrefixRedirect::default();
    Self {
      cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
      input_dir: PathBuf::from("src"),
      sentinel: Sentinel::default().name().to_string(),
      strip_dev: true,
      normalize_specifiers: true,
      source_extension: extensions.source,
      compiled_extension: extensions.compiled,
      source_prefix: redirect.source,
      output_prefix: redirect.output,
      root_entries: Default::default(),
      source_file_extensions: prepub_core::default_source_file_extensions(),
      on_warn: default_warning_handler(),
    }
  }
}

impl From<InputOptions> for prepub_core::BuildInputOptions {
  fn from(opts: InputOptions) -> Self {
    Self {
      cwd: opts.cwd,
      input_dir: opts.input_dir,
      sentinel: Sentinel::new(opts.sentinel),
      strip_dev: opts.strip_dev,
      normalize_specifiers: opts.normalize_specifiers,
      extensions: ExtensionConvention {
        source: opts.source_extension,
        compiled: opts.compiled_extension,
      },
      prefix_redirect: PrefixRedirect {
        source: opts.source_prefix,
        output: opts.output_prefix,
      },
      root_entries: opts.root_entries,
      source_file_extensions: opts.source_file_extensions,
      on_warn: opts.on_warn,
    }
  }
}
