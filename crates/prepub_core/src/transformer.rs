use prepub_common::SourceUnit;
use prepub_compiler::Compiler;
use prepub_swc_visitors::{
  apply_actions, walk, NormalizeSpecifier, RewriteRule, StripDevConditional,
};
use tracing::instrument;

use crate::{Asset, BuildInputOptions, BuildResult, UnaryBuildResult, Verifier};

const BOM: char = '\u{feff}';

/// Applies the enabled rules to one unit at a time.
///
/// Holds no per-unit state, so a single instance is shared by every worker.
#[derive(Debug)]
pub struct Transformer {
  strip_dev: Option<StripDevConditional>,
  normalize: Option<NormalizeSpecifier>,
  normalize_root_entry: Option<NormalizeSpecifier>,
  verifier: Option<Verifier>,
}

impl Transformer {
  pub fn new(input_options: &BuildInputOptions) -> UnaryBuildResult<Self> {
    let (strip_dev, verifier) = if input_options.strip_dev {
      (
        Some(StripDevConditional::new(input_options.sentinel.clone())),
        Some(Verifier::new(input_options.sentinel.clone())?),
      )
    } else {
      (None, None)
    };
    let normalize = input_options
      .normalize_specifiers
      .then(|| NormalizeSpecifier::new(input_options.extensions.clone()));
    let normalize_root_entry = normalize
      .clone()
      .map(|rule| rule.with_redirect(input_options.prefix_redirect.clone()));
    Ok(Self {
      strip_dev,
      normalize,
      normalize_root_entry,
      verifier,
    })
  }

  fn rules_for(&self, unit: &SourceUnit) -> Vec<&dyn RewriteRule> {
    let normalize = if unit.is_root_entry {
      self.normalize_root_entry.as_ref()
    } else {
      self.normalize.as_ref()
    };
    let mut rules: Vec<&dyn RewriteRule> = vec![];
    if let Some(rule) = &self.strip_dev {
      rules.push(rule);
    }
    if let Some(rule) = normalize {
      rules.push(rule);
    }
    rules
  }

  /// parse -> walk -> edit -> verify. Nothing of the unit is kept on failure.
  #[instrument(skip_all, fields(unit = %unit.id))]
  pub fn transform(&self, unit: &SourceUnit) -> BuildResult<Asset> {
    let compiler = Compiler::default();
    let fm = compiler.create_source_file(unit.path.clone(), unit.original.clone());
    let module = compiler.parse_by_loader(&fm, unit.loader)?;

    let rules = self.rules_for(unit);
    let actions = walk(&module, &fm, &rules);

    let (content, actions) = if actions.is_empty() {
      (unit.original.clone(), actions)
    } else {
      let edited = apply_actions(&fm.src, fm.start_pos, actions);
      let mut content = edited.code;
      // The source map drops the byte order mark, the spans don't account for it.
      if unit.original.starts_with(BOM) && !content.starts_with(BOM) {
        content.insert(0, BOM);
      }
      (content, edited.applied)
    };

    tracing::debug!("{} action(s) applied", actions.len());
    for applied in &actions {
      tracing::trace!(rule = applied.rule, action = ?applied.action);
    }

    if let Some(verifier) = &self.verifier {
      verifier.check(&unit.path, &content)?;
    }

    Ok(Asset {
      filename: unit.id.to_string(),
      content,
      actions,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use prepub_common::{Loader, Sentinel, UnitId};

  use super::*;

  fn unit(id: &str, original: &str) -> SourceUnit {
    SourceUnit {
      id: UnitId::new(id),
      path: PathBuf::from("/project/src").join(id),
      loader: Loader::from_path(id.as_ref()).unwrap(),
      is_root_entry: false,
      original: original.to_string(),
    }
  }

  fn transformer() -> Transformer {
    Transformer::new(&BuildInputOptions::default()).unwrap()
  }

  #[test]
  fn strips_and_normalizes_in_one_pass() {
    let asset = transformer()
      .transform(&unit(
        "chart.ts",
        "import { a } from './a';\nif (__DEV__) {\n  check(import('./debug'));\n}\nexport default a;\n",
      ))
      .unwrap();
    assert_eq!(
      asset.content,
      "import { a } from './a.js';\nexport default a;\n"
    );
    assert_eq!(asset.filename, "chart.ts");
    let rules = asset.actions.iter().map(|a| a.rule).collect::<Vec<_>>();
    assert_eq!(
      rules,
      vec![NormalizeSpecifier::NAME, StripDevConditional::NAME]
    );
  }

  #[test]
  fn untouched_units_are_byte_identical() {
    let original = "// keep me\r\nimport x from 'lodash';\r\nconst  a =   x( 1 );\r\n";
    let asset = transformer().transform(&unit("a.js", original)).unwrap();
    assert_eq!(asset.content, original);
    assert!(asset.actions.is_empty());
  }

  #[test]
  fn root_entries_get_the_prefix_redirect() {
    let transformer = transformer();
    let code = "export * from './src/echarts';\n";
    let mut entry = unit("index.ts", code);
    entry.is_root_entry = true;
    assert_eq!(
      transformer.transform(&entry).unwrap().content,
      "export * from './lib/echarts.js';\n"
    );
    assert_eq!(
      transformer.transform(&unit("other.ts", code)).unwrap().content,
      "export * from './src/echarts.js';\n"
    );
  }

  #[test]
  fn byte_order_mark_survives_edits() {
    let asset = transformer()
      .transform(&unit("a.js", "\u{feff}if (__DEV__) a();\nb();\n"))
      .unwrap();
    assert_eq!(asset.content, "\u{feff}b();\n");
  }

  #[test]
  fn leftover_compound_guard_fails_verification() {
    let errors = transformer()
      .transform(&unit("a.js", "if (__DEV__ && verbose) {\n  log();\n}\n"))
      .unwrap_err();
    let error = errors.iter().next().unwrap();
    assert_eq!(error.kind.code(), "DEV_NOT_REMOVED");
  }

  #[test]
  fn parse_errors_are_reported() {
    let errors = transformer()
      .transform(&unit("broken.ts", "export const = 1;\n"))
      .unwrap_err();
    assert_eq!(errors.iter().next().unwrap().kind.code(), "PARSE_ERROR");
  }

  #[test]
  fn disabled_rules_do_nothing() {
    let transformer = Transformer::new(&BuildInputOptions {
      strip_dev: false,
      normalize_specifiers: false,
      ..Default::default()
    })
    .unwrap();
    let code = "import a from './a';\nif (__DEV__) a();\n";
    assert_eq!(transformer.transform(&unit("a.js", code)).unwrap().content, code);
  }

  #[test]
  fn sentinel_is_shared_with_the_verifier() {
    let transformer = Transformer::new(&BuildInputOptions {
      sentinel: Sentinel::new("__DEBUG__"),
      ..Default::default()
    })
    .unwrap();
    let asset = transformer
      .transform(&unit("a.js", "if (__DEBUG__) a();\nif (__DEV__) b();\n"))
      .unwrap();
    assert_eq!(asset.content, "if (__DEV__) b();\n");
  }
}
