pub mod test_config;
pub mod tester;

/// Implement `Default` by deserializing `{}`, so field-level serde defaults are the only
/// source of truth.
#[macro_export]
macro_rules! impl_serde_default {
  ($t:ty) => {
    impl Default for $t {
      fn default() -> Self {
        serde_json::from_str("{}").expect("serde defaults must cover every field")
      }
    }
  };
}
