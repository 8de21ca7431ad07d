//! [`Record`]: one contact, with a name, its phone numbers and an optional
//! birthday.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  field::{BirthdayDate, PhoneNumber},
};

/// A single contact entry.
///
/// The name is fixed at construction. Phones keep insertion order and may
/// repeat. The birthday can be set once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct Record {
  name:     String,
  phones:   Vec<PhoneNumber>,
  birthday: Option<BirthdayDate>,
}

/// Wire shape of a [`Record`]; loading goes through [`Record::new`].
#[derive(Deserialize)]
struct RecordFields {
  name:     String,
  #[serde(default)]
  phones:   Vec<PhoneNumber>,
  #[serde(default)]
  birthday: Option<BirthdayDate>,
}

impl TryFrom<RecordFields> for Record {
  type Error = Error;

  fn try_from(fields: RecordFields) -> Result<Self> {
    let mut record = Self::new(fields.name)?;
    record.phones = fields.phones;
    record.birthday = fields.birthday;
    Ok(record)
  }
}

impl Record {
  /// Create a record with no phones and no birthday.
  ///
  /// # Errors
  ///
  /// [`Error::EmptyName`] if `name` is empty or only whitespace.
  pub fn new(name: impl Into<String>) -> Result<Self> {
    let name = name.into();
    if name.trim().is_empty() {
      return Err(Error::EmptyName);
    }
    Ok(Self {
      name,
      phones: Vec::new(),
      birthday: None,
    })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn phones(&self) -> &[PhoneNumber] { &self.phones }

  pub fn birthday(&self) -> Option<&BirthdayDate> { self.birthday.as_ref() }

  // ── Phones ────────────────────────────────────────────────────────────────

  /// Validate `raw` and append it. Duplicates are kept.
  pub fn add_phone(&mut self, raw: &str) -> Result<()> {
    self.phones.push(PhoneNumber::parse(raw)?);
    Ok(())
  }

  /// Remove every phone equal to `raw`. Removing an absent phone is a no-op.
  pub fn remove_phone(&mut self, raw: &str) {
    self.phones.retain(|p| p != raw);
  }

  /// Replace the first phone equal to `old` with `new`, keeping its position.
  ///
  /// `new` is validated even when `old` is absent. When no phone matches the
  /// record is left unchanged and `Ok(false)` is returned; this is not an
  /// error.
  pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<bool> {
    let replacement = PhoneNumber::parse(new)?;
    match self.phones.iter_mut().find(|p| *p == old) {
      Some(slot) => {
        *slot = replacement;
        Ok(true)
      }
      None => Ok(false),
    }
  }

  /// Replace the phone at `index`, or append when the record has fewer
  /// phones than that.
  pub fn set_phone_at(&mut self, index: usize, raw: &str) -> Result<()> {
    let phone = PhoneNumber::parse(raw)?;
    match self.phones.get_mut(index) {
      Some(slot) => *slot = phone,
      None => self.phones.push(phone),
    }
    Ok(())
  }

  pub fn find_phone(&self, raw: &str) -> Option<&PhoneNumber> {
    self.phones.iter().find(|p| *p == raw)
  }

  // ── Birthday ──────────────────────────────────────────────────────────────

  /// Validate `raw` and set it as this record's birthday.
  ///
  /// # Errors
  ///
  /// [`Error::BirthdayAlreadySet`] if a birthday exists, checked before `raw`
  /// is parsed; otherwise [`Error::InvalidBirthday`] on bad input.
  pub fn add_birthday(&mut self, raw: &str) -> Result<()> {
    if self.birthday.is_some() {
      return Err(Error::BirthdayAlreadySet);
    }
    self.birthday = Some(BirthdayDate::parse(raw)?);
    Ok(())
  }

  /// Phones joined by `"; "`.
  pub fn phones_display(&self) -> String {
    self
      .phones
      .iter()
      .map(PhoneNumber::as_str)
      .collect::<Vec<_>>()
      .join("; ")
  }
}

impl fmt::Display for Record {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Contact name: {}, phones: {}", self.name, self.phones_display())
  }
}
