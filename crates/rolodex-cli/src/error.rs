//! Command failures. Each is shown to the user as its `Display` text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
  /// A required argument is missing; the message says which.
  #[error("{0}")]
  Arity(&'static str),

  #[error("Number of days must be a non-negative integer, got {0:?}")]
  InvalidDays(String),

  #[error(transparent)]
  Core(#[from] rolodex_core::Error),
}

impl CommandError {
  /// The user typed something the command cannot act on, as opposed to an
  /// operation failing on a well-formed request.
  pub fn is_bad_input(&self) -> bool {
    match self {
      Self::Arity(_) | Self::InvalidDays(_) => true,
      Self::Core(e) => e.is_validation(),
    }
  }
}

pub type Result<T, E = CommandError> = std::result::Result<T, E>;
