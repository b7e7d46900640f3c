//! `prepub`: strip development-only code and normalize import specifiers
//! of a source tree before it is packaged.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use prepub::{ConfigFile, Errors, InputOptions, OutputOptions, Pipeline};

#[derive(Parser)]
#[command(name = "prepub")]
#[command(about = "Rewrite a source tree for publishing")]
struct Cli {
  /// Config file, `prepub.config.json` in the working directory is used when omitted
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Working directory
  #[arg(long)]
  cwd: Option<PathBuf>,

  /// Source tree, relative to the working directory
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Output directory, relative to the working directory
  #[arg(short, long)]
  out_dir: Option<String>,

  /// Identifier guarding development-only code
  #[arg(long)]
  sentinel: Option<String>,

  #[arg(long)]
  source_ext: Option<String>,

  #[arg(long)]
  compiled_ext: Option<String>,

  /// Specifier prefix that root entries redirect from
  #[arg(long)]
  src_prefix: Option<String>,

  /// Specifier prefix that root entries redirect to
  #[arg(long)]
  out_prefix: Option<String>,

  /// Unit (relative to the source tree) whose specifiers get the prefix redirect, repeatable
  #[arg(long = "root-entry")]
  root_entries: Vec<String>,

  /// Keep sentinel-guarded conditionals
  #[arg(long)]
  no_strip_dev: bool,

  /// Leave import specifiers untouched
  #[arg(long)]
  no_normalize: bool,

  /// Transform and verify only, don't write anything
  #[arg(long)]
  dry_run: bool,
}

impl Cli {
  fn into_options(self) -> prepub::BuildResult<(InputOptions, OutputOptions, bool)> {
    let mut input = InputOptions::default();
    let mut output = OutputOptions::default();
    if let Some(cwd) = self.cwd {
      input.cwd = if cwd.is_absolute() {
        cwd
      } else {
        input.cwd.join(cwd)
      };
    }

    let config = match &self.config {
      Some(path) => Some(ConfigFile::from_path(&input.cwd.join(path))?),
      None => ConfigFile::discover(&input.cwd)?,
    };
    if let Some(config) = config {
      config.apply(&mut input, &mut output);
    }

    // Flags win over the config file.
    if let Some(dir) = self.input {
      input.input_dir = dir;
    }
    if let Some(dir) = self.out_dir {
      output.dir = Some(dir);
    }
    if let Some(sentinel) = self.sentinel {
      input.sentinel = sentinel;
    }
    if let Some(ext) = self.source_ext {
      input.source_extension = ext;
    }
    if let Some(ext) = self.compiled_ext {
      input.compiled_extension = ext;
    }
    if let Some(prefix) = self.src_prefix {
      input.source_prefix = prefix;
    }
    if let Some(prefix) = self.out_prefix {
      input.output_prefix = prefix;
    }
    if !self.root_entries.is_empty() {
      input.root_entries = self.root_entries;
    }
    if self.no_strip_dev {
      input.strip_dev = false;
    }
    if self.no_normalize {
      input.normalize_specifiers = false;
    }
    Ok((input, output, self.dry_run))
  }
}

fn report(errors: Errors, cwd: &std::path::Path) -> ExitCode {
  for err in errors.iter() {
    eprintln!("{}: {}", err.kind.code(), err.kind.to_readable_string(cwd));
    for context in err.contexts() {
      eprintln!("  {context}");
    }
  }
  eprintln!("{} error(s), nothing was published", errors.len());
  ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  let fallback_cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

  let (input, output, dry_run) = match cli.into_options() {
    Ok(options) => options,
    Err(errors) => return report(errors, &fallback_cwd),
  };
  let cwd = input.cwd.clone();
  let mut pipeline = Pipeline::new(input);

  let result = if dry_run {
    pipeline.generate(output).await
  } else {
    pipeline.write(output).await
  };

  match result {
    Ok(assets) => {
      let rewritten = assets.iter().filter(|a| !a.actions.is_empty()).count();
      let action_count = assets.iter().map(|a| a.actions.len()).sum::<usize>();
      let verb = if dry_run { "checked" } else { "published" };
      println!(
        "{verb} {} file(s), {rewritten} rewritten with {action_count} edit(s)",
        assets.len()
      );
      ExitCode::SUCCESS
    }
    Err(errors) => report(errors, &cwd),
  }
}
