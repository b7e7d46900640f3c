use swc_core::{
  common::{BytePos, SourceFile, Span, Spanned, SyntaxContext},
  ecma::{
    ast,
    visit::{Visit, VisitWith},
  },
};

use crate::{AppliedAction, RewriteRule, SyntaxNode, TransformAction};

/// Where a statement sits decides what removing it means.
#[derive(Debug, Clone, Copy)]
enum Position {
  /// An element of a statement list, it can simply disappear.
  Listed,
  /// The body of `if`, `while`, `for`, a label... Removing it would leave the parent
  /// without a body, so it is replaced by an empty block.
  Slot,
  /// The `else` branch of an `if`, removed together with the `else` keyword.
  ///
  /// `cons_open` is set when the consequent lacks its `;`, which then takes the branch's place.
  Alternate { cons_hi: BytePos, cons_open: bool },
}

/// The last kept statement of a list, if a following `(` or `[` would continue it.
#[derive(Debug, Default)]
struct ListState {
  open_end: Option<BytePos>,
  /// Rule that removed statements after `open_end`.
  removed_by: Option<&'static str>,
}

/// Walks a module once and offers every conditional and specifier to each rule.
///
/// Children are visited before their parent is offered, so nested matches are found
/// even when the parent is removed as well.
pub struct RuleWalker<'r> {
  rules: &'r [&'r dyn RewriteRule],
  source: &'r str,
  start_pos: BytePos,
  actions: Vec<AppliedAction>,
}

/// Statements that end in an expression and have no `;` of their own in the grammar.
fn may_be_continued(stmt: &ast::Stmt) -> bool {
  matches!(
    stmt,
    ast::Stmt::Expr(_)
      | ast::Stmt::Decl(ast::Decl::Var(_))
      | ast::Stmt::Return(ast::ReturnStmt { arg: Some(_), .. })
      | ast::Stmt::Throw(_)
  )
}

fn may_be_continued_decl(decl: &ast::ModuleDecl) -> bool {
  matches!(
    decl,
    ast::ModuleDecl::ExportDefaultExpr(_)
      | ast::ModuleDecl::ExportDecl(ast::ExportDecl {
        decl: ast::Decl::Var(_),
        ..
      })
  )
}

impl<'r> RuleWalker<'r> {
  /// `source_file` is the file `module` was parsed from.
  pub fn new(rules: &'r [&'r dyn RewriteRule], source_file: &'r SourceFile) -> Self {
    Self {
      rules,
      source: &source_file.src,
      start_pos: source_file.start_pos,
      actions: Default::default(),
    }
  }

  pub fn into_actions(self) -> Vec<AppliedAction> {
    self.actions
  }

  fn text_from(&self, pos: BytePos) -> &str {
    let offset = pos.0.saturating_sub(self.start_pos.0) as usize;
    self.source.get(offset..).unwrap_or_default()
  }

  fn ends_with_semicolon(&self, hi: BytePos) -> bool {
    let offset = hi.0.saturating_sub(self.start_pos.0) as usize;
    offset > 0 && self.source.as_bytes().get(offset - 1) == Some(&b';')
  }

  /// Whether a statement starting at `lo` would be read as a continuation of an
  /// unterminated previous statement.
  fn continues_expression(&self, lo: BytePos) -> bool {
    matches!(
      self.text_from(lo).chars().next(),
      Some('(' | '[' | '`' | '+' | '-' | '/')
    )
  }

  /// Returns the rule that removed the statement, if one did.
  fn offer(&mut self, node: SyntaxNode, position: Position) -> Option<&'static str> {
    let mut removed_by = None;
    for rule in self.rules {
      let action = match (rule.apply(node), position) {
        (TransformAction::Keep, _) => continue,
        (TransformAction::Remove(span), Position::Slot) => {
          TransformAction::Replace(span, "{}".to_string())
        }
        (TransformAction::Remove(span), Position::Alternate { cons_hi, cons_open: true }) => {
          TransformAction::Replace(span.with_lo(cons_hi), ";".to_string())
        }
        (TransformAction::Remove(span), Position::Alternate { cons_hi, .. }) => {
          TransformAction::Remove(span.with_lo(cons_hi))
        }
        (action @ TransformAction::Remove(_), Position::Listed) => {
          removed_by = Some(rule.name());
          action
        }
        (action, _) => action,
      };
      tracing::trace!(rule = rule.name(), ?action, "rule matched");
      self.actions.push(AppliedAction {
        rule: rule.name(),
        action,
      });
    }
    removed_by
  }

  fn visit_listed_stmt(&mut self, stmt: &ast::Stmt) -> Option<&'static str> {
    stmt.visit_children_with(self);
    match stmt {
      ast::Stmt::If(if_stmt) => self.offer(SyntaxNode::Conditional(if_stmt), Position::Listed),
      _ => None,
    }
  }

  /// Keep a kept statement from being glued onto an unterminated one whose follower was
  /// removed, as in `a = b` + `if (__DEV__) {}` + `(c || d).e()`.
  fn after_list_item(
    &mut self,
    state: &mut ListState,
    span: Span,
    removed_by: Option<&'static str>,
    may_continue: bool,
  ) {
    if removed_by.is_some() {
      state.removed_by = state.removed_by.or(removed_by);
      return;
    }
    if let (Some(open_end), Some(rule)) = (state.open_end, state.removed_by) {
      if self.continues_expression(span.lo) {
        self.actions.push(AppliedAction {
          rule,
          action: TransformAction::Replace(
            Span::new(open_end, open_end, SyntaxContext::empty()),
            ";".to_string(),
          ),
        });
      }
    }
    state.removed_by = None;
    state.open_end = (may_continue && !self.ends_with_semicolon(span.hi)).then_some(span.hi);
  }

  fn offer_specifier(&mut self, src: &ast::Str) {
    self.offer(SyntaxNode::Specifier(src), Position::Listed);
  }
}

pub fn walk(
  module: &ast::Module,
  source_file: &SourceFile,
  rules: &[&dyn RewriteRule],
) -> Vec<AppliedAction> {
  let mut walker = RuleWalker::new(rules, source_file);
  module.visit_with(&mut walker);
  walker.into_actions()
}

/// `import('./x')` and `require('./x')`.
fn specifier_of_call(node: &ast::CallExpr) -> Option<&ast::Str> {
  let loads_module = match &node.callee {
    ast::Callee::Import(_) => true,
    ast::Callee::Expr(callee) => {
      matches!(&**callee, ast::Expr::Ident(ident) if &*ident.sym == "require")
    }
    ast::Callee::Super(_) => false,
  };
  if !loads_module {
    return None;
  }
  match node.args.first() {
    Some(ast::ExprOrSpread { spread: None, expr }) => match &**expr {
      ast::Expr::Lit(ast::Lit::Str(src)) => Some(src),
      _ => None,
    },
    _ => None,
  }
}

impl<'r> Visit for RuleWalker<'r> {
  fn visit_module_items(&mut self, items: &[ast::ModuleItem]) {
    let mut state = ListState::default();
    for item in items {
      match item {
        ast::ModuleItem::Stmt(stmt) => {
          let removed_by = self.visit_listed_stmt(stmt);
          self.after_list_item(&mut state, stmt.span(), removed_by, may_be_continued(stmt));
        }
        ast::ModuleItem::ModuleDecl(decl) => {
          decl.visit_with(self);
          self.after_list_item(&mut state, decl.span(), None, may_be_continued_decl(decl));
        }
      }
    }
  }

  fn visit_stmts(&mut self, stmts: &[ast::Stmt]) {
    let mut state = ListState::default();
    for stmt in stmts {
      let removed_by = self.visit_listed_stmt(stmt);
      self.after_list_item(&mut state, stmt.span(), removed_by, may_be_continued(stmt));
    }
  }

  // Statement lists never get here, see `visit_stmts`.
  fn visit_stmt(&mut self, stmt: &ast::Stmt) {
    stmt.visit_children_with(self);
    if let ast::Stmt::If(if_stmt) = stmt {
      self.offer(SyntaxNode::Conditional(if_stmt), Position::Slot);
    }
  }

  fn visit_if_stmt(&mut self, node: &ast::IfStmt) {
    node.test.visit_with(self);
    node.cons.visit_with(self);
    match node.alt.as_deref() {
      Some(ast::Stmt::If(alt)) => {
        alt.visit_with(self);
        let cons_hi = node.cons.span().hi;
        let cons_open = may_be_continued(&node.cons) && !self.ends_with_semicolon(cons_hi);
        self.offer(
          SyntaxNode::Conditional(alt),
          Position::Alternate { cons_hi, cons_open },
        );
      }
      Some(alt) => alt.visit_with(self),
      None => {}
    }
  }

  fn visit_import_decl(&mut self, node: &ast::ImportDecl) {
    self.offer_specifier(&node.src);
  }

  fn visit_export_all(&mut self, node: &ast::ExportAll) {
    self.offer_specifier(&node.src);
  }

  fn visit_named_export(&mut self, node: &ast::NamedExport) {
    if let Some(src) = &node.src {
      self.offer_specifier(src);
    }
  }

  fn visit_call_expr(&mut self, node: &ast::CallExpr) {
    node.visit_children_with(self);
    if let Some(src) = specifier_of_call(node) {
      self.offer_specifier(src);
    }
  }

  fn visit_ts_external_module_ref(&mut self, node: &ast::TsExternalModuleRef) {
    self.offer_specifier(&node.expr);
  }

  fn visit_ts_import_type(&mut self, node: &ast::TsImportType) {
    node.visit_children_with(self);
    self.offer_specifier(&node.arg);
  }
}
