use std::sync::atomic::AtomicBool;

use tracing::Level;

static IS_INIT: AtomicBool = AtomicBool::new(false);

/// Install the global subscriber once, and only if `PREPUB_TRACING` is set.
///
/// `RUST_LOG` still narrows the output through [tracing_subscriber::EnvFilter].
pub fn enable_tracing_on_demand() {
  if std::env::var_os("PREPUB_TRACING").is_some() {
    init();
  }
}

pub fn init() {
  use tracing_subscriber::{fmt, prelude::*, EnvFilter};
  if !IS_INIT.swap(true, std::sync::atomic::Ordering::SeqCst) {
    tracing_subscriber::registry()
      .with(fmt::layer())
      .with(EnvFilter::from_default_env())
      .with(
        tracing_subscriber::filter::Targets::new().with_targets(vec![("prepub", Level::TRACE)]),
      )
      .init();
  }
}
