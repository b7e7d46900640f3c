use std::{path::Path, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
  Js,
  Jsx,
  Ts,
  Tsx,
  /// TypeScript declaration files, `.d.ts` and friends.
  Dts,
}

impl Loader {
  pub fn from_path(p: &Path) -> Option<Self> {
    let file_name = p.file_name()?.to_str()?;
    if [".d.ts", ".d.mts", ".d.cts"]
      .iter()
      .any(|suffix| file_name.ends_with(suffix))
    {
      return Some(Self::Dts);
    }
    p.extension()
      .and_then(|ext| ext.to_str())
      .and_then(|ext| Self::from_str(ext).ok())
  }

  pub fn is_jsx(&self) -> bool {
    matches!(self, Self::Jsx | Self::Tsx)
  }
}

impl FromStr for Loader {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "js" | "mjs" | "cjs" => Ok(Self::Js),
      "jsx" => Ok(Self::Jsx),
      "ts" | "mts" | "cts" => Ok(Self::Ts),
      "tsx" => Ok(Self::Tsx),
      _ => Err(format!("Unknown loader value \"{}\"", s)),
    }
  }
}
