use std::sync::Arc;

use prepub_error::Errors;
use rayon::prelude::*;
use tracing::instrument;

use crate::{
  collect::collect_source_files, unit_loader::UnitLoader, Asset, BuildInputOptions,
  BuildOutputOptions, BuildResult, SharedBuildInputOptions, Transformer,
};

pub struct PipelineCore {
  input_options: SharedBuildInputOptions,
}

impl PipelineCore {
  pub fn new(input_opts: BuildInputOptions) -> Self {
    prepub_tracing::enable_tracing_on_demand();
    Self {
      input_options: Arc::new(input_opts),
    }
  }

  /// Transform every unit of the input tree in memory.
  ///
  /// Either every unit yields an [Asset], or the errors of every failed unit are returned.
  #[instrument(skip_all)]
  pub async fn build(&mut self, output_opts: &BuildOutputOptions) -> BuildResult<Vec<Asset>> {
    tracing::debug!("{:#?}", self.input_options);
    tracing::debug!("{:#?}", output_opts);
    self.input_options.validate(output_opts)?;

    let input_dir = self.input_options.resolved_input_dir();
    let files = collect_source_files(
      &input_dir,
      &output_opts.dir,
      &self.input_options.source_file_extensions,
    )?;
    tracing::debug!("{} source file(s) in {}", files.len(), input_dir.display());

    let units = UnitLoader::new(&self.input_options)
      .fetch_all_units(&input_dir, files)
      .await?;

    let transformer = Transformer::new(&self.input_options)?;
    let results = units
      .par_iter()
      .map(|unit| transformer.transform(unit))
      .collect::<Vec<_>>();

    let mut assets = Vec::with_capacity(results.len());
    let mut errors = vec![];
    for result in results {
      match result {
        Ok(asset) => assets.push(asset),
        Err(unit_errors) => errors.extend(unit_errors.into_vec()),
      }
    }
    if let Some(errors) = Errors::try_from_vec(errors) {
      tracing::debug!("{} error(s), nothing will be published", errors.len());
      return Err(errors);
    }

    assets.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(assets)
  }
}
