//! Persistence backends for the Rolodex address book.
//!
//! Each backend implements [`rolodex_core::BookStore`] and moves the whole
//! book in one blocking operation. [`Store`] selects a backend at runtime.

mod encode;
mod json;
mod schema;
mod sqlite;

pub mod error;

use std::{fmt, path::Path, str::FromStr};

use rolodex_core::{AddressBook, BookStore};
use serde::Deserialize;

pub use error::{Error, Result};
pub use json::JsonFileStore;
pub use sqlite::SqliteStore;

// ─── Backend selection ───────────────────────────────────────────────────────

/// Which storage format to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  #[default]
  Json,
  Sqlite,
}

impl FromStr for Backend {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "json" => Ok(Self::Json),
      "sqlite" => Ok(Self::Sqlite),
      other => Err(Error::UnknownBackend(other.to_owned())),
    }
  }
}

impl fmt::Display for Backend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Json => "json",
      Self::Sqlite => "sqlite",
    })
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A store of either backend.
#[derive(Debug, Clone)]
pub enum Store {
  Json(JsonFileStore),
  Sqlite(SqliteStore),
}

impl Store {
  pub fn open(backend: Backend, path: impl AsRef<Path>) -> Self {
    let path = path.as_ref().to_path_buf();
    match backend {
      Backend::Json => Self::Json(JsonFileStore::new(path)),
      Backend::Sqlite => Self::Sqlite(SqliteStore::new(path)),
    }
  }

  pub fn path(&self) -> &Path {
    match self {
      Self::Json(s) => s.path(),
      Self::Sqlite(s) => s.path(),
    }
  }
}

impl BookStore for Store {
  type Error = Error;

  fn load(&self) -> Result<AddressBook> {
    match self {
      Self::Json(s) => s.load(),
      Self::Sqlite(s) => s.load(),
    }
  }

  fn save(&self, book: &AddressBook) -> Result<()> {
    match self {
      Self::Json(s) => s.save(book),
      Self::Sqlite(s) => s.save(book),
    }
  }
}
