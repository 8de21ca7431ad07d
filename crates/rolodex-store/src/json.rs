//! [`JsonFileStore`]: the book as one pretty-printed JSON file.

use std::{
  fs,
  io::ErrorKind,
  path::{Path, PathBuf},
};

use rolodex_core::{AddressBook, BookStore};
use tracing::{debug, info};

use crate::{
  Error, Result,
  encode::{decode_book, encode_book_pretty},
};

/// A Rolodex store backed by a single JSON file.
///
/// Saves write a sibling temporary file and rename it over the target, so an
/// interrupted save leaves the previous file in place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  path: PathBuf,
}

impl JsonFileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  fn temp_path(&self) -> PathBuf {
    let mut name = self.path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    self.path.with_file_name(name)
  }
}

impl BookStore for JsonFileStore {
  type Error = Error;

  fn load(&self) -> Result<AddressBook> {
    let payload = match fs::read_to_string(&self.path) {
      Ok(payload) => payload,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        info!(path = %self.path.display(), "no saved address book; starting empty");
        return Ok(AddressBook::new());
      }
      Err(e) => return Err(Error::io(&self.path, e)),
    };

    let book = decode_book(&payload)?;
    info!(path = %self.path.display(), records = book.len(), "loaded address book");
    Ok(book)
  }

  fn save(&self, book: &AddressBook) -> Result<()> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let payload = encode_book_pretty(book)?;
    let temp = self.temp_path();
    fs::write(&temp, payload).map_err(|e| Error::io(&temp, e))?;
    debug!(temp = %temp.display(), "wrote temporary address book");
    fs::rename(&temp, &self.path).map_err(|e| Error::io(&self.path, e))?;

    info!(path = %self.path.display(), records = book.len(), "saved address book");
    Ok(())
  }
}
