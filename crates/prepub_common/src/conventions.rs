use swc_core::ecma::atoms::JsWord;

/// The identifier whose bare use as an `if` guard marks development-only code.
///
/// Shared by the strip rule and the verifier so both always agree on the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentinel(JsWord);

impl Sentinel {
  pub fn new(name: impl Into<JsWord>) -> Self {
    Self(name.into())
  }

  pub fn name(&self) -> &str {
    &self.0
  }
}

impl Default for Sentinel {
  fn default() -> Self {
    Self::new("__DEV__")
  }
}

impl AsRef<str> for Sentinel {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

/// Source and compiled file suffixes, both including the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionConvention {
  pub source: String,
  pub compiled: String,
}

impl Default for ExtensionConvention {
  fn default() -> Self {
    Self {
      source: ".ts".to_string(),
      compiled: ".js".to_string(),
    }
  }
}

/// `./src/foo.js` -> `./lib/foo.js` for specifiers of root entry files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRedirect {
  pub source: String,
  pub output: String,
}

impl Default for PrefixRedirect {
  fn default() -> Self {
    Self {
      source: "./src".to_string(),
      output: "./lib".to_string(),
    }
  }
}
