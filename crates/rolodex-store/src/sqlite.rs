//! [`SqliteStore`]: the book as a single row in an SQLite database.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rolodex_core::{AddressBook, BookStore};
use rusqlite::{Connection, OpenFlags, OptionalExtension as _};
use tracing::info;

use crate::{
  Error, Result,
  encode::{decode_book, encode_book, encode_dt},
  schema::SCHEMA,
};

/// A Rolodex store backed by an SQLite file.
///
/// A connection is opened per load or save. Loading opens the database
/// read-only and never writes to it; a missing file, table or row yields an
/// empty book. The schema is created on the first save.
#[derive(Debug, Clone)]
pub struct SqliteStore {
  path: PathBuf,
}

impl SqliteStore {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  /// Open (or create) the database and run schema initialisation.
  fn open(&self) -> Result<Connection> {
    let conn = Connection::open(&self.path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
  }

  fn open_read_only(&self) -> Result<Connection> {
    Ok(Connection::open_with_flags(
      &self.path,
      OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?)
  }
}

fn has_book_table(conn: &Connection) -> Result<bool> {
  let found = conn
    .query_row(
      "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'address_book'",
      [],
      |_| Ok(()),
    )
    .optional()?;
  Ok(found.is_some())
}

impl BookStore for SqliteStore {
  type Error = Error;

  fn load(&self) -> Result<AddressBook> {
    if !self.path.exists() {
      info!(path = %self.path.display(), "no saved address book; starting empty");
      return Ok(AddressBook::new());
    }

    let conn = self.open_read_only()?;
    let payload: Option<String> = if has_book_table(&conn)? {
      conn
        .query_row("SELECT payload FROM address_book WHERE id = 1", [], |r| {
          r.get(0)
        })
        .optional()?
    } else {
      None
    };

    let book = match payload {
      Some(p) => decode_book(&p)?,
      None => AddressBook::new(),
    };
    info!(path = %self.path.display(), records = book.len(), "loaded address book");
    Ok(book)
  }

  fn save(&self, book: &AddressBook) -> Result<()> {
    let payload = encode_book(book)?;
    let saved_at = encode_dt(Utc::now());

    let mut conn = self.open()?;
    let tx = conn.transaction()?;
    tx.execute(
      "INSERT INTO address_book (id, payload, saved_at) VALUES (1, ?1, ?2)
       ON CONFLICT(id) DO UPDATE SET payload = excluded.payload,
                                     saved_at = excluded.saved_at",
      rusqlite::params![payload, saved_at],
    )?;
    tx.commit()?;

    info!(path = %self.path.display(), records = book.len(), "saved address book");
    Ok(())
  }
}
