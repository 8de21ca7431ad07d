//! Encoding between an [`AddressBook`] and the persisted payload.
//!
//! Both backends store the same compact JSON document: an object mapping each
//! contact name to its record. Timestamps are RFC 3339 strings.

use chrono::{DateTime, Utc};
use rolodex_core::AddressBook;

use crate::Result;

pub fn encode_book(book: &AddressBook) -> Result<String> {
  Ok(serde_json::to_string(book)?)
}

pub fn encode_book_pretty(book: &AddressBook) -> Result<String> {
  Ok(serde_json::to_string_pretty(book)?)
}

pub fn decode_book(payload: &str) -> Result<AddressBook> {
  Ok(serde_json::from_str(payload)?)
}

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }
