use std::{
  path::{Path, PathBuf},
  sync::{Arc, Mutex},
};

use prepub_error::Error as BuildError;

use crate::test_config::TestConfig;

pub struct Tester {
  pub config: TestConfig,
  pub warnings: Arc<Mutex<Vec<BuildError>>>,
}

impl Tester {
  pub fn from_config_path(filepath: &Path) -> Self {
    let test_config = TestConfig::from_config_path(filepath);
    Self {
      config: test_config,
      warnings: Default::default(),
    }
  }

  pub fn input_options(&self, cwd: PathBuf) -> prepub::InputOptions {
    let warning_collector = self.warnings.clone();
    let input = &self.config.input;
    let defaults = prepub::InputOptions::default();
    prepub::InputOptions {
      cwd,
      input_dir: PathBuf::from(&input.input_dir),
      sentinel: input.sentinel.clone().unwrap_or(defaults.sentinel),
      strip_dev: input.strip_dev,
      normalize_specifiers: input.normalize_specifiers,
      source_extension: input
        .source_extension
        .clone()
        .unwrap_or(defaults.source_extension),
      compiled_extension: input
        .compiled_extension
        .clone()
        .unwrap_or(defaults.compiled_extension),
      source_prefix: input.source_prefix.clone().unwrap_or(defaults.source_prefix),
      output_prefix: input.output_prefix.clone().unwrap_or(defaults.output_prefix),
      root_entries: input.root_entries.clone(),
      source_file_extensions: input
        .source_file_extensions
        .clone()
        .unwrap_or(defaults.source_file_extensions),
      on_warn: Arc::new(move |err| {
        warning_collector.lock().unwrap().push(err);
      }),
    }
  }

  pub fn output_options(&self) -> prepub::OutputOptions {
    prepub::OutputOptions {
      dir: self.config.output.dir.clone(),
    }
  }
}
