use prepub_common::Sentinel;
use swc_core::ecma::ast;

use crate::{RewriteRule, SyntaxNode, TransformAction};

/// Removes `if (__DEV__) { ... }` statements, alternates included.
///
/// Only a bare reference to the sentinel counts as a guard. `__DEV__ && x`,
/// `!__DEV__` and `typeof __DEV__` are left alone.
#[derive(Debug, Clone, Default)]
pub struct StripDevConditional {
  sentinel: Sentinel,
}

impl StripDevConditional {
  pub const NAME: &'static str = "strip-dev-conditional";

  pub fn new(sentinel: Sentinel) -> Self {
    Self { sentinel }
  }
}

/// Parentheses are transparent, `if ((__DEV__))` is still a bare reference.
pub fn is_sentinel_guard(test: &ast::Expr, sentinel: &str) -> bool {
  match test {
    ast::Expr::Ident(ident) => &*ident.sym == sentinel,
    ast::Expr::Paren(paren) => is_sentinel_guard(&paren.expr, sentinel),
    _ => false,
  }
}

impl RewriteRule for StripDevConditional {
  fn name(&self) -> &'static str {
    Self::NAME
  }

  fn matches(&self, node: SyntaxNode) -> bool {
    match node {
      SyntaxNode::Conditional(if_stmt) => is_sentinel_guard(&if_stmt.test, self.sentinel.name()),
      SyntaxNode::Specifier(_) => false,
    }
  }

  fn apply(&self, node: SyntaxNode) -> TransformAction {
    match node {
      SyntaxNode::Conditional(if_stmt) if self.matches(node) => TransformAction::Remove(if_stmt.span),
      _ => TransformAction::Keep,
    }
  }
}

#[cfg(test)]
mod tests {
  use prepub_common::Loader;

  use super::*;
  use crate::test_helpers::rewrite;

  fn strip(code: &str) -> String {
    rewrite(code, Loader::Js, &[&StripDevConditional::default()])
  }

  #[test]
  fn removes_guarded_block_and_keeps_following_code() {
    assert_eq!(
      strip("if (__DEV__) { console.log('x'); } doStuff();"),
      "doStuff();"
    );
  }

  #[test]
  fn removes_whole_lines() {
    let code = "a();\nif (__DEV__) {\n  check();\n}\nb();\n";
    assert_eq!(strip(code), "a();\nb();\n");
  }

  #[test]
  fn removes_alternate_with_the_conditional() {
    let code = "if (__DEV__) {\n  warn();\n} else {\n  fast();\n}\nrun();\n";
    assert_eq!(strip(code), "run();\n");
  }

  #[test]
  fn compound_guards_are_kept() {
    let code = "if (__DEV__ && verbose) {\n  warn();\n}\nif (!__DEV__) {\n  fast();\n}\n";
    assert_eq!(strip(code), code);
  }

  #[test]
  fn parenthesized_guard_is_still_bare() {
    assert_eq!(strip("if ((__DEV__)) warn();\nrun();"), "run();");
  }

  #[test]
  fn nested_inside_non_matching_conditional() {
    let code = "if (ready) {\n  if (__DEV__) {\n    warn();\n  }\n  go();\n}\n";
    assert_eq!(strip(code), "if (ready) {\n  go();\n}\n");
  }

  #[test]
  fn nested_inside_functions_and_switches() {
    let code = concat!(
      "function f(a) {\n",
      "  switch (a) {\n",
      "    case 1:\n",
      "      if (__DEV__) {\n",
      "        log(a);\n",
      "      }\n",
      "      return 1;\n",
      "  }\n",
      "}\n",
    );
    let expected = concat!(
      "function f(a) {\n",
      "  switch (a) {\n",
      "    case 1:\n",
      "      return 1;\n",
      "  }\n",
      "}\n",
    );
    assert_eq!(strip(code), expected);
  }

  #[test]
  fn nested_sentinel_blocks_collapse_into_the_outer_one() {
    let code = "if (__DEV__) {\n  if (__DEV__) {\n    a();\n  }\n}\nb();\n";
    assert_eq!(strip(code), "b();\n");
  }

  #[test]
  fn single_statement_slot_becomes_empty_block() {
    assert_eq!(
      strip("if (ready) if (__DEV__) warn();\nrun();"),
      "if (ready) {}\nrun();"
    );
    assert_eq!(
      strip("while (next()) if (__DEV__) warn();"),
      "while (next()) {}"
    );
  }

  #[test]
  fn else_if_alternate_is_dropped_with_its_else() {
    let code = "if (a) {\n  x();\n} else if (__DEV__) {\n  y();\n}\nz();\n";
    assert_eq!(strip(code), "if (a) {\n  x();\n}\nz();\n");
  }

  #[test]
  fn custom_sentinel() {
    let rule = StripDevConditional::new(Sentinel::new("__DEBUG__"));
    let code = "if (__DEBUG__) a();\nif (__DEV__) b();\n";
    assert_eq!(rewrite(code, Loader::Js, &[&rule]), "if (__DEV__) b();\n");
  }

  #[test]
  fn idempotent() {
    let code = concat!(
      "import { a } from './a';\n",
      "if (__DEV__) { a(); }\n",
      "if (__DEV__ && a) { a(); }\n",
      "if (x) if (__DEV__) a();\n",
      "export const b = () => { if (__DEV__) { a(); } return 1; };\n",
    );
    let once = strip(code);
    assert_eq!(strip(&once), once);
  }

  #[test]
  fn typescript_input() {
    let code = "export function f(a: number): number {\n  if (__DEV__) {\n    assert(a > 0);\n  }\n  return a;\n}\n";
    assert_eq!(
      rewrite(code, Loader::Ts, &[&StripDevConditional::default()]),
      "export function f(a: number): number {\n  return a;\n}\n"
    );
  }

  fn top_level_items(code: &str) -> usize {
    let compiler = prepub_compiler::Compiler::default();
    let fm = compiler.create_source_file("out.js".into(), code.to_string());
    compiler.parse_by_loader(&fm, Loader::Js).unwrap().body.len()
  }

  #[test]
  fn unterminated_statement_is_not_joined_with_the_next_one() {
    let code = "let a = b\nif (__DEV__) {\n  check();\n}\n(c || d).e()\n";
    let stripped = strip(code);
    assert_eq!(stripped, "let a = b;\n(c || d).e()\n");
    assert_eq!(top_level_items(&stripped), 2);
  }

  #[test]
  fn several_removals_between_unterminated_statements() {
    let code = "function f() {\n  x = y\n  if (__DEV__) { a() }\n  if (__DEV__) { b() }\n  [1, 2].forEach(g)\n}\n";
    assert_eq!(strip(code), "function f() {\n  x = y;\n  [1, 2].forEach(g)\n}\n");
  }

  #[test]
  fn no_semicolon_added_when_not_needed() {
    assert_eq!(
      strip("let a = b;\nif (__DEV__) { c() }\n(d)\n"),
      "let a = b;\n(d)\n"
    );
    assert_eq!(
      strip("let a = b\nif (__DEV__) c()\nd()\n"),
      "let a = b\nd()\n"
    );
  }

  #[test]
  fn unterminated_consequent_keeps_its_end_when_else_goes() {
    let code = "if (a) b()\nelse if (__DEV__) {\n  c()\n}\n(d)()\n";
    let stripped = strip(code);
    assert_eq!(stripped, "if (a) b();\n(d)()\n");
    assert_eq!(top_level_items(&stripped), 2);
  }
}
