//! Core types for the Rolodex contact manager.
//!
//! Field validation, records, the address book and its birthday query, and
//! the persistence trait. This crate performs no I/O.

pub mod book;
pub mod error;
pub mod field;
pub mod record;
pub mod store;

pub use book::{AddressBook, DEFAULT_UPCOMING_DAYS, UpcomingBirthday};
pub use error::{Error, Result};
pub use field::{BirthdayDate, PhoneNumber};
pub use record::Record;
pub use store::BookStore;
