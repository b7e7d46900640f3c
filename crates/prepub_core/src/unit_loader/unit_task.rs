use std::path::PathBuf;

use prepub_common::{Loader, SourceUnit, UnitId};
use tracing::instrument;

use super::Msg;
use crate::{BuildError, UnaryBuildResult};

pub(crate) struct UnitTask {
  pub(crate) id: UnitId,
  pub(crate) path: PathBuf,
  pub(crate) loader: Loader,
  pub(crate) is_root_entry: bool,
  pub(crate) tx: tokio::sync::mpsc::UnboundedSender<Msg>,
}

impl UnitTask {
  #[instrument(skip_all)]
  pub(crate) async fn run(self) {
    let tx = self.tx.clone();
    let msg = match self.run_inner().await {
      Ok(unit) => Msg::Loaded(unit),
      Err(err) => Msg::Error(err),
    };
    if tx.send(msg).is_err() {
      tracing::trace!("unit loader is gone, dropping the result");
    }
  }

  async fn run_inner(self) -> UnaryBuildResult<SourceUnit> {
    let original = tokio::fs::read_to_string(&self.path)
      .await
      .map_err(|e| BuildError::io_error(e).context(format!("Read file: {}", self.path.display())))?;

    Ok(SourceUnit {
      id: self.id,
      path: self.path,
      loader: self.loader,
      is_root_entry: self.is_root_entry,
      original,
    })
  }
}
