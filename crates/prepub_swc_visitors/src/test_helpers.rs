use std::path::PathBuf;

use prepub_common::Loader;
use prepub_compiler::Compiler;

use crate::{apply_actions, walk, RewriteRule};

/// Parse `code`, run `rules` over it and return the edited text.
pub(crate) fn rewrite(code: &str, loader: Loader, rules: &[&dyn RewriteRule]) -> String {
  let compiler = Compiler::default();
  let fm = compiler.create_source_file(PathBuf::from("test.ts"), code.to_string());
  let module = compiler
    .parse_by_loader(&fm, loader)
    .unwrap_or_else(|err| panic!("{err}"));
  let actions = walk(&module, &fm, rules);
  apply_actions(&fm.src, fm.start_pos, actions).code
}
