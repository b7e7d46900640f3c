mod rule;
pub use rule::*;
mod strip_dev;
pub use strip_dev::*;
mod normalize_specifier;
pub use normalize_specifier::*;
mod walker;
pub use walker::*;
mod text_edit;
pub use text_edit::*;

#[cfg(test)]
mod test_helpers;
