//! Validated field values, the only way raw user input enters a [`Record`].
//!
//! Each type validates in its constructor and re-validates on
//! deserialisation, so a value of one of these types is always well-formed.
//!
//! [`Record`]: crate::record::Record

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Input and display format for birthdays (`DD.MM.YYYY`).
pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

const PHONE_LEN: usize = 10;

// ─── PhoneNumber ─────────────────────────────────────────────────────────────

/// A phone number of exactly ten ASCII decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
  /// Validate `raw` as a phone number.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidPhone`] unless `raw` is exactly ten digits.
  pub fn parse(raw: &str) -> Result<Self> {
    if raw.len() == PHONE_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
      Ok(Self(raw.to_owned()))
    } else {
      Err(Error::InvalidPhone(raw.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl FromStr for PhoneNumber {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl PartialEq<str> for PhoneNumber {
  fn eq(&self, other: &str) -> bool { self.0 == other }
}

impl fmt::Display for PhoneNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl Serialize for PhoneNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for PhoneNumber {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Self::parse(&raw).map_err(serde::de::Error::custom)
  }
}

// ─── BirthdayDate ────────────────────────────────────────────────────────────

/// A calendar date entered as `DD.MM.YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthdayDate(NaiveDate);

impl BirthdayDate {
  /// Parse `raw` in [`BIRTHDAY_FORMAT`].
  ///
  /// # Errors
  ///
  /// [`Error::InvalidBirthday`] on malformed input or an impossible date
  /// such as `31.04.2020`.
  pub fn parse(raw: &str) -> Result<Self> {
    NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT)
      .map(Self)
      .map_err(|_| Error::InvalidBirthday(raw.to_owned()))
  }

  pub fn date(&self) -> NaiveDate { self.0 }

  pub fn month(&self) -> u32 { self.0.month() }

  pub fn day(&self) -> u32 { self.0.day() }

  /// This birthday's month and day in `year`.
  ///
  /// 29 February falls on 28 February in years without a leap day.
  pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, self.month(), self.day()).or_else(|| {
      (self.month() == 2 && self.day() == 29)
        .then(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .flatten()
    })
  }
}

impl FromStr for BirthdayDate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl fmt::Display for BirthdayDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format(BIRTHDAY_FORMAT))
  }
}

impl Serialize for BirthdayDate {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for BirthdayDate {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Self::parse(&raw).map_err(serde::de::Error::custom)
  }
}
