use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct BuildOutputOptions {
  /// Absolute path of the mirrored output tree.
  pub dir: PathBuf,
}
