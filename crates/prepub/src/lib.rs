mod input_options;
mod output_options;
mod pipeline;
pub use {
  input_options::{default_warning_handler, ConfigFile, InputOptions},
  output_options::OutputOptions,
  pipeline::Pipeline,
  prepub_core::{AppliedAction, Asset, BuildError, BuildResult, TransformAction, WarningHandler},
  prepub_error::{Error, Errors},
};
