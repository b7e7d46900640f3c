use std::path::{Path, PathBuf};

use futures::future::join_all;
use prepub_core::{Asset, BuildError, BuildOutputOptions, BuildResult, PipelineCore};
use prepub_error::Errors;
use sugar_path::SugarPathBuf;

use crate::{InputOptions, OutputOptions};

pub struct Pipeline {
  core: PipelineCore,
  cwd: PathBuf,
}

impl Pipeline {
  pub fn new(input_opts: InputOptions) -> Self {
    let cwd = input_opts.cwd.clone();
    Self {
      core: PipelineCore::new(input_opts.into()),
      cwd,
    }
  }

  fn output_dir(&self, output_options: &OutputOptions) -> PathBuf {
    let dir = output_options.dir.as_deref().unwrap_or("lib");
    self.cwd.join(dir).into_normalize()
  }

  /// Transform the whole tree and publish it as the output directory.
  ///
  /// The tree is written to a hidden staging directory next to the output directory and
  /// swapped in once complete. On any error the previous output stays untouched.
  pub async fn write(&mut self, output_options: OutputOptions) -> BuildResult<Vec<Asset>> {
    let dir = self.output_dir(&output_options);
    let output = self.core.build(&BuildOutputOptions { dir: dir.clone() }).await?;

    let staging = sibling_of(&dir, "staging");
    if let Err(errors) = stage(&staging, &output).await {
      let _ = tokio::fs::remove_dir_all(&staging).await;
      return Err(errors);
    }
    if let Err(err) = swap_in(&staging, &dir).await {
      let _ = tokio::fs::remove_dir_all(&staging).await;
      return Err(err.into());
    }

    tracing::debug!("published {} file(s) to {}", output.len(), dir.display());
    Ok(output)
  }

  /// Same as [Pipeline::write], but keeps the assets in memory.
  pub async fn generate(&mut self, output_options: OutputOptions) -> BuildResult<Vec<Asset>> {
    let dir = self.output_dir(&output_options);
    self.core.build(&BuildOutputOptions { dir }).await
  }
}

/// `<parent>/.<name>.prepub-<suffix>`, hidden so a later collection never picks it up.
fn sibling_of(dir: &Path, suffix: &str) -> PathBuf {
  let name = dir
    .file_name()
    .map(|name| name.to_string_lossy())
    .unwrap_or_default();
  dir.with_file_name(format!(".{name}.prepub-{suffix}"))
}

fn io_failed(path: &Path) -> impl Fn(std::io::Error) -> BuildError + '_ {
  move |e| BuildError::io_error(e).context(format!("Write: {}", path.display()))
}

/// Write every asset below a fresh `staging` directory.
async fn stage(staging: &Path, assets: &[Asset]) -> BuildResult<()> {
  // Only a directory can be a leftover of an earlier run.
  if tokio::fs::metadata(staging).await.map_or(false, |m| m.is_dir()) {
    tokio::fs::remove_dir_all(staging)
      .await
      .map_err(io_failed(staging))?;
  }
  tokio::fs::create_dir_all(staging)
    .await
    .map_err(io_failed(staging))?;

  let results = join_all(
    assets
      .iter()
      .map(|asset| write_asset(staging.join(&asset.filename), &asset.content)),
  )
  .await;
  let errors = results
    .into_iter()
    .filter_map(Result::err)
    .collect::<Vec<_>>();
  match Errors::try_from_vec(errors) {
    Some(errors) => Err(errors),
    None => Ok(()),
  }
}

async fn write_asset(dest: PathBuf, content: &str) -> Result<(), BuildError> {
  if let Some(parent) = dest.parent() {
    tokio::fs::create_dir_all(parent)
      .await
      .map_err(io_failed(&dest))?;
  }
  tokio::fs::write(&dest, content)
    .await
    .map_err(io_failed(&dest))
}

/// Replace `dir` with `staging`. The previous `dir` is restored if the rename fails.
async fn swap_in(staging: &Path, dir: &Path) -> Result<(), BuildError> {
  let backup = sibling_of(dir, "previous");
  let had_previous = tokio::fs::metadata(dir).await.is_ok();
  if had_previous {
    if tokio::fs::metadata(&backup).await.is_ok() {
      tokio::fs::remove_dir_all(&backup)
        .await
        .map_err(io_failed(&backup))?;
    }
    tokio::fs::rename(dir, &backup)
      .await
      .map_err(io_failed(dir))?;
  }
  if let Err(e) = tokio::fs::rename(staging, dir).await {
    if had_previous {
      let _ = tokio::fs::rename(&backup, dir).await;
    }
    return Err(io_failed(dir)(e));
  }
  if had_previous {
    if let Err(e) = tokio::fs::remove_dir_all(&backup).await {
      tracing::debug!("failed to remove {}: {e}", backup.display());
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn staging_dir_is_a_hidden_sibling() {
    assert_eq!(
      sibling_of(Path::new("/project/lib"), "staging"),
      PathBuf::from("/project/.lib.prepub-staging")
    );
  }
}
