use swc_core::{common::Span, ecma::ast};

/// The constructs a [RewriteRule] is offered during a walk.
#[derive(Debug, Clone, Copy)]
pub enum SyntaxNode<'a> {
  /// An `if` statement, with its guard, consequent and optional alternate.
  Conditional(&'a ast::IfStmt),
  /// The string literal naming the target of an import, export or require.
  Specifier(&'a ast::Str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformAction {
  Remove(Span),
  Replace(Span, String),
  Keep,
}

impl TransformAction {
  pub fn span(&self) -> Option<Span> {
    match self {
      TransformAction::Remove(span) | TransformAction::Replace(span, _) => Some(*span),
      TransformAction::Keep => None,
    }
  }

  pub fn is_keep(&self) -> bool {
    matches!(self, TransformAction::Keep)
  }
}

/// An action together with the name of the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedAction {
  pub rule: &'static str,
  pub action: TransformAction,
}

/// A stateless rewrite over one kind of [SyntaxNode].
///
/// `apply` on a node that does not match must return [TransformAction::Keep].
pub trait RewriteRule: Send + Sync {
  fn name(&self) -> &'static str;

  fn matches(&self, node: SyntaxNode) -> bool;

  fn apply(&self, node: SyntaxNode) -> TransformAction;
}
