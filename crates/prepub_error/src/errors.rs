use crate::Error;

/// A collection of prepub [Error].
///
/// Yeah, this is just a wrapper of `Vec<Error>` but with a few promises:
///
/// [Errors] is never empty: it is built from one [Error] or a non-empty `Vec<Error>`.
#[derive(Debug)]
pub struct Errors(Vec<Error>);

impl Errors {
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Error> {
    self.0.iter()
  }

  pub fn into_vec(self) -> Vec<Error> {
    self.0
  }

  /// Returns `None` if the passing Vec<Error> is empty.
  pub fn try_from_vec(mut vec: Vec<Error>) -> Option<Self> {
    if vec.is_empty() {
      None
    } else {
      vec.sort();
      Some(Self(vec))
    }
  }
}

impl From<Error> for Errors {
  fn from(error: Error) -> Self {
    Self(vec![error])
  }
}

impl From<std::io::Error> for Errors {
  fn from(error: std::io::Error) -> Self {
    Self(vec![Error::io_error(error)])
  }
}
