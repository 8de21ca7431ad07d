//! Error types for `rolodex-core`.
//!
//! The `Display` strings are user-facing: the command layer prints them
//! verbatim when an operation fails.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Phone number must be 10 digits long")]
  InvalidPhone(String),

  #[error("Invalid date format. Use DD.MM.YYYY")]
  InvalidBirthday(String),

  #[error("A birthday has already been set for this record.")]
  BirthdayAlreadySet,

  #[error("Contact name must not be empty")]
  EmptyName,

  #[error("Contact {0} not found")]
  ContactNotFound(String),
}

impl Error {
  /// Input was rejected by a field validator or a record invariant.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      Self::InvalidPhone(_)
        | Self::InvalidBirthday(_)
        | Self::BirthdayAlreadySet
        | Self::EmptyName
    )
  }

  pub fn is_not_found(&self) -> bool { matches!(self, Self::ContactNotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
