use std::cmp::Reverse;

use swc_core::common::{BytePos, Span};

use crate::{AppliedAction, TransformAction};

#[derive(Debug)]
pub struct EditedText {
  pub code: String,
  /// The actions that made it into `code`. Actions inside a larger edited range are dropped.
  pub applied: Vec<AppliedAction>,
}

fn is_blank(c: char) -> bool {
  c == ' ' || c == '\t' || c == '\u{feff}'
}

/// Grow a removed range over the whitespace it leaves behind.
///
/// A statement that owns its lines takes those lines with it. Otherwise the blanks on
/// one side go too, so `a(); if (__DEV__) b(); c();` ends up as `a(); c();`.
fn expand_removal(source: &str, lo: usize, hi: usize) -> (usize, usize) {
  let line_start = source[..lo].rfind('\n').map_or(0, |i| i + 1);
  let before = &source[line_start..lo];
  let owns_line_start = before.chars().all(is_blank);

  let after = &source[hi..];
  let trailing = after.len() - after.trim_start_matches(is_blank).len();
  let rest = &after[trailing..];
  let line_break = if rest.starts_with("\r\n") {
    Some(2)
  } else if rest.starts_with('\n') {
    Some(1)
  } else if rest.is_empty() {
    Some(0)
  } else {
    None
  };

  match line_break {
    Some(len) if owns_line_start => (line_start, hi + trailing + len),
    Some(_) => {
      let leading = before.len() - before.trim_end_matches(is_blank).len();
      (lo - leading, hi + trailing)
    }
    None => (lo, hi + trailing),
  }
}

/// Apply span based actions to the text the spans were taken from.
///
/// `start_pos` is the position of the first byte of `source` in the source map.
pub fn apply_actions(
  source: &str,
  start_pos: BytePos,
  actions: Vec<AppliedAction>,
) -> EditedText {
  let to_range = |span: Span| {
    (
      (span.lo.0 - start_pos.0) as usize,
      (span.hi.0 - start_pos.0) as usize,
    )
  };

  let mut ranged = actions
    .into_iter()
    .filter_map(|applied| {
      let range = to_range(applied.action.span()?);
      Some((range, applied))
    })
    .collect::<Vec<_>>();
  // Outer ranges sort before the ranges they contain.
  ranged.sort_by_key(|((lo, hi), _)| (*lo, Reverse(*hi)));

  let mut code = String::with_capacity(source.len());
  let mut cursor = 0;
  let mut covered_until = 0;
  let mut applied = Vec::with_capacity(ranged.len());

  for ((lo, hi), action) in ranged {
    if lo < covered_until {
      tracing::trace!(?action, "dropped, already covered by an outer edit");
      continue;
    }
    let (lo, hi) = match &action.action {
      TransformAction::Remove(_) => expand_removal(source, lo, hi),
      _ => (lo, hi),
    };
    let lo = lo.max(cursor);
    code.push_str(&source[cursor..lo]);
    if let TransformAction::Replace(_, text) = &action.action {
      code.push_str(text);
    }
    cursor = hi.max(lo);
    covered_until = cursor;
    applied.push(action);
  }
  code.push_str(&source[cursor..]);

  EditedText { code, applied }
}
