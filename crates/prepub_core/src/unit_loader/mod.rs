use std::path::{Path, PathBuf};

use prepub_common::{Loader, SourceUnit, UnitId};
use prepub_error::Errors;
use rustc_hash::FxHashSet;

pub(crate) mod unit_task;

use unit_task::UnitTask;

use crate::{collect::unit_id_of, BuildError, BuildInputOptions, BuildResult};

pub(crate) struct UnitLoader<'a> {
  input_options: &'a BuildInputOptions,
  remaining_tasks: usize,
  tx: tokio::sync::mpsc::UnboundedSender<Msg>,
  rx: tokio::sync::mpsc::UnboundedReceiver<Msg>,
  units: Vec<SourceUnit>,
  errors: Vec<BuildError>,
}

#[derive(Debug)]
pub(crate) enum Msg {
  Loaded(SourceUnit),
  Error(BuildError),
}

impl<'a> UnitLoader<'a> {
  pub(crate) fn new(input_options: &'a BuildInputOptions) -> Self {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Msg>();
    Self {
      input_options,
      remaining_tasks: 0,
      tx,
      rx,
      units: Default::default(),
      errors: Default::default(),
    }
  }

  /// Read every file concurrently. Any failed read fails the whole batch.
  pub(crate) async fn fetch_all_units(
    mut self,
    input_dir: &Path,
    files: Vec<PathBuf>,
  ) -> BuildResult<Vec<SourceUnit>> {
    let root_entries = self.input_options.root_entry_ids();
    let mut unmatched_root_entries = root_entries.iter().collect::<FxHashSet<_>>();

    for path in files {
      let id = unit_id_of(input_dir, &path);
      // Collected files always carry a known extension.
      let loader = Loader::from_path(&path).unwrap_or(Loader::Js);
      let is_root_entry = unmatched_root_entries.remove(&id);
      self.spawn_new_unit_task(UnitId::new(id), path, loader, is_root_entry);
    }

    if !unmatched_root_entries.is_empty() {
      let mut entries = unmatched_root_entries
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
      entries.sort();
      (self.input_options.on_warn)(BuildError::unmatched_root_entry(
        entries,
        input_dir.to_path_buf(),
      ));
    }

    while self.remaining_tasks > 0 {
      let Some(msg) = self.rx.recv().await else {
        break;
      };
      self.remaining_tasks -= 1;
      match msg {
        Msg::Loaded(unit) => {
          tracing::trace!("loaded: {}", unit.id);
          self.units.push(unit);
        }
        Msg::Error(err) => {
          self.errors.push(err);
        }
      }
      tracing::trace!("remaining: {}", self.remaining_tasks);
    }

    match Errors::try_from_vec(self.errors) {
      Some(errors) => Err(errors),
      None => {
        self.units.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(self.units)
      }
    }
  }

  fn spawn_new_unit_task(
    &mut self,
    id: UnitId,
    path: PathBuf,
    loader: Loader,
    is_root_entry: bool,
  ) {
    tracing::trace!("spawning new job for {}", id);
    self.remaining_tasks += 1;
    let task = UnitTask {
      id,
      path,
      loader,
      is_root_entry,
      tx: self.tx.clone(),
    };
    tokio::spawn(task.run());
  }
}
