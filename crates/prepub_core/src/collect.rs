use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::{BuildError, UnaryBuildResult};

fn is_hidden(entry: &DirEntry) -> bool {
  entry.file_name().to_str().map_or(false, |name| name.starts_with('.'))
}

/// Every transformable file under `dir`, sorted.
///
/// Hidden entries, `node_modules` and `skip_dir` are not entered. Symlinks are not followed.
pub(crate) fn collect_source_files(
  dir: &Path,
  skip_dir: &Path,
  source_file_extensions: &[String],
) -> UnaryBuildResult<Vec<PathBuf>> {
  let is_skipped = |entry: &DirEntry| {
    entry.depth() > 0
      && (is_hidden(entry)
        || entry.path() == skip_dir
        || (entry.file_type().is_dir() && entry.file_name() == "node_modules"))
  };

  let mut files = vec![];
  let walker = WalkDir::new(dir)
    .follow_links(false)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|entry| !is_skipped(entry));
  for entry in walker {
    let entry = entry.map_err(|e| {
      BuildError::io_error(e.into()).context(format!("Read dir: {}", dir.display()))
    })?;
    if !entry.file_type().is_file() {
      if entry.path_is_symlink() {
        tracing::trace!("skip symlink: {}", entry.path().display());
      }
      continue;
    }
    let Some(name) = entry.file_name().to_str() else {
      tracing::trace!("skip non utf-8 path: {}", entry.path().display());
      continue;
    };
    let is_source = Path::new(name)
      .extension()
      .and_then(|ext| ext.to_str())
      .map_or(false, |ext| source_file_extensions.iter().any(|e| e == ext));
    if is_source {
      files.push(entry.into_path());
    } else {
      tracing::trace!("skip non-source file: {}", entry.path().display());
    }
  }
  Ok(files)
}

/// `a/b/c.ts` relative to `root`, with `/` separators on every platform.
pub(crate) fn unit_id_of(root: &Path, path: &Path) -> String {
  path
    .strip_prefix(root)
    .unwrap_or(path)
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;
  use crate::default_source_file_extensions;

  #[test]
  fn skips_hidden_and_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/core")).unwrap();
    fs::create_dir_all(root.join("src/.cache")).unwrap();
    fs::create_dir_all(root.join("src/node_modules/dep")).unwrap();
    fs::create_dir_all(root.join("src/lib")).unwrap();
    fs::write(root.join("src/index.ts"), "").unwrap();
    fs::write(root.join("src/core/util.js"), "").unwrap();
    fs::write(root.join("src/core/types.d.ts"), "").unwrap();
    fs::write(root.join("src/core/style.css"), "").unwrap();
    fs::write(root.join("src/.eslintrc.js"), "").unwrap();
    fs::write(root.join("src/.cache/a.js"), "").unwrap();
    fs::write(root.join("src/node_modules/dep/index.js"), "").unwrap();
    fs::write(root.join("src/lib/out.js"), "").unwrap();

    let src = root.join("src");
    let files = collect_source_files(&src, &src.join("lib"), &default_source_file_extensions())
      .unwrap()
      .iter()
      .map(|p| unit_id_of(&src, p))
      .collect::<Vec<_>>();
    assert_eq!(files, vec!["core/types.d.ts", "core/util.js", "index.ts"]);
  }

  #[test]
  fn missing_dir_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let err = collect_source_files(&missing, dir.path(), &default_source_file_extensions())
      .unwrap_err();
    assert_eq!(err.kind.code(), "IO_ERROR");
  }

  #[cfg(unix)]
  #[test]
  fn does_not_follow_symlinks() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("elsewhere")).unwrap();
    fs::write(root.join("src/a.ts"), "").unwrap();
    fs::write(root.join("elsewhere/b.ts"), "").unwrap();
    std::os::unix::fs::symlink(root.join("elsewhere"), root.join("src/linked")).unwrap();
    std::os::unix::fs::symlink(root.join("elsewhere/b.ts"), root.join("src/b.ts")).unwrap();

    let src = root.join("src");
    let files = collect_source_files(&src, &root.join("lib"), &default_source_file_extensions())
      .unwrap();
    assert_eq!(files, vec![src.join("a.ts")]);
  }
}
