use std::path::Path;

use prepub_common::Sentinel;
use prepub_error::{anyhow, Errors};
use regex::Regex;

use crate::{BuildError, BuildResult, UnaryBuildResult};

/// A sentinel guard found in text that should have none left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
  /// Byte offset of the `if` keyword.
  pub offset: usize,
  pub line: usize,
  pub column: usize,
  pub matched: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
  Ok,
  Violation(Violation),
}

impl VerificationResult {
  pub fn is_ok(&self) -> bool {
    matches!(self, VerificationResult::Ok)
  }
}

/// Text scan run after stripping. It does not parse, so it also catches guards the
/// strip rule deliberately leaves alone, like `if (__DEV__ && x)`.
///
/// Two shapes are allowed to stay:
/// - a match starting with a backtick, i.e. code inside a template string
/// - `if (typeof __DEV__ ...)`, the runtime check for environments without the global
#[derive(Debug, Clone)]
pub struct Verifier {
  sentinel: Sentinel,
  pattern: Regex,
}

fn word_boundary_at(c: Option<char>) -> &'static str {
  match c {
    Some(c) if c == '_' || c.is_alphanumeric() => r"\b",
    _ => "",
  }
}

impl Verifier {
  pub fn new(sentinel: Sentinel) -> UnaryBuildResult<Self> {
    let name = sentinel.name();
    let pattern = format!(
      r"(?m)(?:^|(.))(\bif\s*\(([^()]*?){}{}{})",
      word_boundary_at(name.chars().next()),
      regex::escape(name),
      word_boundary_at(name.chars().last()),
    );
    let pattern = Regex::new(&pattern).map_err(anyhow::Error::from)?;
    Ok(Self { sentinel, pattern })
  }

  fn scan<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Violation> + 't {
    self.pattern.captures_iter(text).filter_map(move |caps| {
      let inside_template = caps.get(1).map_or(false, |c| c.as_str() == "`");
      let typeof_guard = caps.get(3).map_or(false, |c| c.as_str().trim() == "typeof");
      if inside_template || typeof_guard {
        return None;
      }
      let guard = caps.get(2)?;
      let offset = guard.start();
      let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
      Some(Violation {
        offset,
        line: text[..offset].matches('\n').count() + 1,
        column: text[line_start..offset].chars().count() + 1,
        matched: guard.as_str().to_string(),
      })
    })
  }

  pub fn verify(&self, text: &str) -> VerificationResult {
    match self.scan(text).next() {
      Some(violation) => VerificationResult::Violation(violation),
      None => VerificationResult::Ok,
    }
  }

  pub fn violations(&self, text: &str) -> Vec<Violation> {
    self.scan(text).collect()
  }

  /// Every violation in `text` as a build error naming `filename`.
  pub fn check(&self, filename: &Path, text: &str) -> BuildResult<()> {
    let errors = self
      .scan(text)
      .map(|violation| {
        BuildError::dev_not_removed(
          filename,
          violation.line,
          violation.column,
          violation.matched,
          self.sentinel.name(),
        )
      })
      .collect::<Vec<_>>();
    match Errors::try_from_vec(errors) {
      Some(errors) => Err(errors),
      None => Ok(()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn verifier() -> Verifier {
    Verifier::new(Sentinel::default()).unwrap()
  }

  #[test]
  fn catches_leftover_guard() {
    let result = verifier().verify("if (__DEV__) {\n  warn();\n}\n");
    assert_eq!(
      result,
      VerificationResult::Violation(Violation {
        offset: 0,
        line: 1,
        column: 1,
        matched: "if (__DEV__".to_string(),
      })
    );
  }

  #[test]
  fn reports_location() {
    let violations = verifier().violations("a();\nfunction f() {\n  if(__DEV__) g();\n}\n");
    assert_eq!(violations.len(), 1);
    assert_eq!((violations[0].line, violations[0].column), (3, 3));
    assert_eq!(violations[0].matched, "if(__DEV__");
  }

  #[test]
  fn compound_guards_are_violations() {
    assert!(!verifier().verify("if (__DEV__ && verbose) warn();").is_ok());
    assert!(!verifier().verify("x(); if (verbose &&\n  __DEV__) warn();").is_ok());
  }

  #[test]
  fn template_string_is_allowed() {
    assert!(verifier()
      .verify("const code = `if (__DEV__) { check(); }`;")
      .is_ok());
  }

  #[test]
  fn typeof_guard_is_allowed() {
    assert!(verifier()
      .verify("if (typeof __DEV__ === 'undefined') {\n  global.__DEV__ = true;\n}\n")
      .is_ok());
  }

  #[test]
  fn every_occurrence_is_scanned() {
    let text = "if (typeof __DEV__ === 'undefined') {}\nif (__DEV__) {}\n";
    let violations = verifier().violations(text);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, 2);
  }

  #[test]
  fn unrelated_identifiers_do_not_match() {
    let v = verifier();
    assert!(v.verify("if (__DEV__TOOLS) {}").is_ok());
    assert!(v.verify("if (MY__DEV__) {}").is_ok());
    assert!(v.verify("notif (__DEV__) {}").is_ok());
    assert!(v.verify("const dev = __DEV__;").is_ok());
  }

  #[test]
  fn check_reports_file() {
    let errors = verifier()
      .check(Path::new("src/a.js"), "if (__DEV__) {}\nif (__DEV__) {}\n")
      .unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors
      .iter()
      .all(|e| e.kind.code() == "DEV_NOT_REMOVED"));
  }
}
