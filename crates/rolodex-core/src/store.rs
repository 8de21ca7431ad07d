//! The [`BookStore`] trait: the persistence gateway for an [`AddressBook`].
//!
//! Implemented by storage backends (`rolodex-store`). The command layer
//! depends on this abstraction, not on any concrete backend.

use crate::book::AddressBook;

/// Whole-book persistence. There are no partial or incremental writes.
pub trait BookStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load the persisted book.
  ///
  /// A store with no prior state yields an empty book, not an error.
  fn load(&self) -> Result<AddressBook, Self::Error>;

  /// Persist `book`, replacing whatever was stored before.
  fn save(&self, book: &AddressBook) -> Result<(), Self::Error>;
}
