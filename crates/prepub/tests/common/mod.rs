use std::path::{Path, PathBuf};

use prepub::{Asset, BuildResult, Pipeline};
use prepub_test_utils::tester::Tester;

pub struct CompiledFixture {
  pub tester: Tester,
  pub output: BuildResult<Vec<Asset>>,
  pub fixture_path: PathBuf,
}

fn section(title: &str, body: &str) -> String {
  format!("---------- {title} ----------\n{}", body.trim())
}

impl CompiledFixture {
  /// Every asset under a header with its filename, warnings last.
  pub fn to_snapshot(&self) -> String {
    let assets = match &self.output {
      Ok(assets) => assets,
      Err(errors) => panic!("fixture {} failed: {errors:#?}", self.fixture_path.display()),
    };
    let mut sorted = assets.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.filename.cmp(&b.filename));
    let mut sections = sorted
      .into_iter()
      .map(|asset| section(&asset.filename, &asset.content))
      .collect::<Vec<_>>();

    let mut warnings = self.tester.warnings.lock().unwrap();
    if !warnings.is_empty() {
      warnings.sort();
      let lines = warnings
        .iter()
        .map(|w| {
          format!(
            "{}: {}",
            w.kind.code(),
            w.kind.to_readable_string(&self.fixture_path)
          )
        })
        .collect::<Vec<_>>();
      sections.push(section("WARNINGS", &lines.join("\n")));
    }
    sections.join("\n")
  }
}

pub async fn compile_fixture(test_config_path: &Path) -> CompiledFixture {
  let fixture_path = test_config_path.parent().unwrap().to_path_buf();
  let tester = Tester::from_config_path(test_config_path);
  let output = Pipeline::new(tester.input_options(fixture_path.clone()))
    .generate(tester.output_options())
    .await;

  CompiledFixture {
    tester,
    output,
    fixture_path,
  }
}

pub fn run_test(test_config_path: &Path) {
  let runtime = tokio::runtime::Runtime::new().unwrap();
  let compiled_fx = runtime.block_on(compile_fixture(test_config_path));

  if let Some(expected) = &compiled_fx.tester.config.expected_error {
    let errors = match &compiled_fx.output {
      Ok(_) => panic!("expected {} but the build succeeded", expected.code),
      Err(errors) => errors,
    };
    assert_eq!(errors.len(), 1, "{errors:#?}");
    let error = errors.iter().next().unwrap();
    assert_eq!(error.kind.code(), expected.code);
    assert_eq!(
      error.kind.to_readable_string(&compiled_fx.fixture_path),
      expected.message
    );
    return;
  }

  // Snapshots live next to the fixture they belong to.
  let fixture_folder = test_config_path.parent().unwrap();
  let mut settings = insta::Settings::clone_current();
  settings.set_snapshot_path(fixture_folder);
  settings.set_prepend_module_to_snapshot(false);
  settings.set_input_file(fixture_folder);
  settings.bind(|| {
    insta::assert_snapshot!("output", compiled_fx.to_snapshot());
  });
}
