#[derive(Debug, Default)]
pub struct OutputOptions {
  /// Where the transformed tree is published, relative to `cwd` unless absolute.
  ///
  /// Defaults to `<cwd>/lib`.
  pub dir: Option<String>,
}
