use std::borrow::Cow;

use prepub_common::{ExtensionConvention, PrefixRedirect};
use swc_core::ecma::ast;

use crate::{RewriteRule, SyntaxNode, TransformAction};

/// Gives relative specifiers an explicit compiled extension.
///
/// Root entries also get their source prefix swapped for the output prefix,
/// so `./src/core` in `index.ts` ends up as `./lib/core.js`.
#[derive(Debug, Clone, Default)]
pub struct NormalizeSpecifier {
  extensions: ExtensionConvention,
  redirect: Option<PrefixRedirect>,
}

impl NormalizeSpecifier {
  pub const NAME: &'static str = "normalize-specifier";

  pub fn new(extensions: ExtensionConvention) -> Self {
    Self {
      extensions,
      redirect: None,
    }
  }

  pub fn with_redirect(mut self, redirect: PrefixRedirect) -> Self {
    self.redirect = Some(redirect);
    self
  }

  pub fn normalize<'s>(&self, specifier: &'s str) -> Cow<'s, str> {
    let normalized = add_compiled_extension(specifier, &self.extensions);
    let Some(redirect) = &self.redirect else {
      return normalized;
    };
    if let Cow::Owned(redirected) = redirect_prefix(&normalized, redirect) {
      return Cow::Owned(redirected);
    }
    normalized
  }
}

pub fn add_compiled_extension<'s>(
  specifier: &'s str,
  extensions: &ExtensionConvention,
) -> Cow<'s, str> {
  // Bare specifiers point into packages, never touch them.
  if !specifier.starts_with('.') || specifier.ends_with(&extensions.compiled) {
    return Cow::Borrowed(specifier);
  }
  match specifier.strip_suffix(&extensions.source) {
    Some(stem) => Cow::Owned(format!("{stem}{}", extensions.compiled)),
    None => Cow::Owned(format!("{specifier}{}", extensions.compiled)),
  }
}

pub fn redirect_prefix<'s>(specifier: &'s str, redirect: &PrefixRedirect) -> Cow<'s, str> {
  match specifier.strip_prefix(&redirect.source) {
    Some(rest) if rest.is_empty() || rest.starts_with('/') => {
      Cow::Owned(format!("{}{rest}", redirect.output))
    }
    _ => Cow::Borrowed(specifier),
  }
}

/// Quote `value` the same way the original literal was quoted.
fn requote(original: &ast::Str, value: &str) -> String {
  let quote = match original.raw.as_ref().and_then(|raw| raw.chars().next()) {
    Some('\'') => '\'',
    _ => '"',
  };
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push(quote);
  for c in value.chars() {
    if c == quote || c == '\\' {
      quoted.push('\\');
    }
    quoted.push(c);
  }
  quoted.push(quote);
  quoted
}

impl RewriteRule for NormalizeSpecifier {
  fn name(&self) -> &'static str {
    Self::NAME
  }

  fn matches(&self, node: SyntaxNode) -> bool {
    !self.apply(node).is_keep()
  }

  fn apply(&self, node: SyntaxNode) -> TransformAction {
    match node {
      SyntaxNode::Specifier(specifier) => match self.normalize(&specifier.value) {
        Cow::Owned(normalized) if normalized != *specifier.value => {
          TransformAction::Replace(specifier.span, requote(specifier, &normalized))
        }
        _ => TransformAction::Keep,
      },
      SyntaxNode::Conditional(_) => TransformAction::Keep,
    }
  }
}
