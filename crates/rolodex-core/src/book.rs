//! [`AddressBook`]: the name-keyed contact store and the upcoming-birthday
//! query.

use std::fmt;

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use serde::{
  Deserialize, Deserializer, Serialize, Serializer,
  de::{self, MapAccess, Visitor},
};

use crate::{Error, Result, record::Record};

/// Window used by [`AddressBook::upcoming_birthdays`] when the caller has no
/// preference.
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// A birthday selected by the upcoming-birthday query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
  pub name: String,
  /// The date to congratulate on, moved off weekends.
  pub date: NaiveDate,
}

/// All contacts, keyed by name. Iteration is in insertion order.
///
/// Persisted as a JSON object from name to record, in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
  records: Vec<Record>,
}

impl AddressBook {
  pub fn new() -> Self { Self::default() }

  fn position(&self, name: &str) -> Option<usize> {
    self.records.iter().position(|r| r.name() == name)
  }

  /// Insert `record` under its name. A record already stored under that name
  /// is replaced in place and returned.
  pub fn add_record(&mut self, record: Record) -> Option<Record> {
    match self.position(record.name()) {
      Some(i) => Some(std::mem::replace(&mut self.records[i], record)),
      None => {
        self.records.push(record);
        None
      }
    }
  }

  pub fn find(&self, name: &str) -> Option<&Record> {
    self.records.iter().find(|r| r.name() == name)
  }

  pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
    self.records.iter_mut().find(|r| r.name() == name)
  }

  pub fn contains(&self, name: &str) -> bool { self.position(name).is_some() }

  /// Remove and return the record for `name`.
  ///
  /// # Errors
  ///
  /// [`Error::ContactNotFound`] if no such record exists.
  pub fn delete(&mut self, name: &str) -> Result<Record> {
    let i = self
      .position(name)
      .ok_or_else(|| Error::ContactNotFound(name.to_owned()))?;
    Ok(self.records.remove(i))
  }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = &Record> { self.records.iter() }

  /// Total number of phones across all records.
  pub fn phone_count(&self) -> usize {
    self.iter().map(|r| r.phones().len()).sum()
  }

  // ── Birthdays ─────────────────────────────────────────────────────────────

  /// Birthdays falling within `days` days from the local calendar date.
  pub fn upcoming_birthdays(&self, days: u32) -> Vec<UpcomingBirthday> {
    self.upcoming_birthdays_from(Local::now().date_naive(), days)
  }

  /// Birthdays falling within `days` days of `today`, inclusive at both ends.
  ///
  /// Each birthday is projected onto `today`'s year, or the next year if it
  /// has already passed. The window test uses that projected date; Saturday
  /// and Sunday results are then moved to the following Monday, which may
  /// land past the window. Results follow the book's iteration order.
  pub fn upcoming_birthdays_from(
    &self,
    today: NaiveDate,
    days: u32,
  ) -> Vec<UpcomingBirthday> {
    self
      .iter()
      .filter_map(|record| {
        let birthday = record.birthday()?;
        let mut candidate = birthday.in_year(today.year())?;
        if candidate < today {
          candidate = birthday.in_year(today.year() + 1)?;
        }
        let delta = (candidate - today).num_days();
        if !(0..=i64::from(days)).contains(&delta) {
          return None;
        }
        Some(UpcomingBirthday {
          name: record.name().to_owned(),
          date: adjust_for_weekend(candidate),
        })
      })
      .collect()
  }
}

/// Move a Saturday or Sunday forward to Monday.
pub fn adjust_for_weekend(date: NaiveDate) -> NaiveDate {
  let shift = match date.weekday() {
    Weekday::Sat => 2,
    Weekday::Sun => 1,
    _ => 0,
  };
  date + Days::new(shift)
}

// ─── Serde ───────────────────────────────────────────────────────────────────

impl Serialize for AddressBook {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(self.records.iter().map(|r| (r.name(), r)))
  }
}

impl<'de> Deserialize<'de> for AddressBook {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_map(BookVisitor)
  }
}

/// Reads entries in document order. Each key must equal its record's name
/// and appear once.
struct BookVisitor;

impl<'de> Visitor<'de> for BookVisitor {
  type Value = AddressBook;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("a map from contact name to record")
  }

  fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<AddressBook, A::Error> {
    let mut book = AddressBook::new();
    while let Some((key, record)) = map.next_entry::<String, Record>()? {
      if key != record.name() {
        return Err(de::Error::custom(format!(
          "entry {key:?} holds a record named {:?}",
          record.name()
        )));
      }
      if book.contains(&key) {
        return Err(de::Error::custom(format!("duplicate contact {key:?}")));
      }
      book.records.push(record);
    }
    Ok(book)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn person(name: &str, birthday: Option<&str>) -> Record {
    let mut r = Record::new(name).unwrap();
    r.add_phone("1234567890").unwrap();
    if let Some(b) = birthday {
      r.add_birthday(b).unwrap();
    }
    r
  }

  fn book(people: &[(&str, Option<&str>)]) -> AddressBook {
    let mut book = AddressBook::new();
    for (name, birthday) in people {
      book.add_record(person(name, *birthday));
    }
    book
  }

  // A Monday.
  fn today() -> NaiveDate { ymd(2024, 6, 10) }

  // ── Map operations ────────────────────────────────────────────────────────

  #[test]
  fn find_missing_is_none() {
    let b = book(&[("Alice", None)]);
    assert!(b.find("Bob").is_none());
    assert!(b.find("Alice").is_some());
    assert!(b.contains("Alice"));
    assert!(!b.contains("Bob"));
  }

  #[test]
  fn add_record_overwrites_same_name() {
    let mut b = book(&[("Alice", None)]);
    let mut replacement = Record::new("Alice").unwrap();
    replacement.add_phone("5555555555").unwrap();

    let previous = b.add_record(replacement.clone());

    assert_eq!(previous.map(|r| r.phones().len()), Some(1));
    assert_eq!(b.len(), 1);
    assert_eq!(b.find("Alice"), Some(&replacement));
  }

  #[test]
  fn replacing_a_record_keeps_its_position() {
    let mut b = book(&[("Carol", None), ("Alice", None), ("Bob", None)]);
    b.add_record(Record::new("Alice").unwrap());
    let names: Vec<_> = b.iter().map(Record::name).collect();
    assert_eq!(names, ["Carol", "Alice", "Bob"]);
  }

  #[test]
  fn iteration_follows_insertion_after_delete() {
    let mut b = book(&[("Carol", None), ("Alice", None), ("Bob", None)]);
    b.delete("Alice").unwrap();
    b.add_record(Record::new("Alice").unwrap());
    let names: Vec<_> = b.iter().map(Record::name).collect();
    assert_eq!(names, ["Carol", "Bob", "Alice"]);
  }

  #[test]
  fn delete_missing_is_not_found() {
    let mut b = book(&[("Alice", None)]);
    let err = b.delete("Bob").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err, Error::ContactNotFound("Bob".into()));
    assert_eq!(b.len(), 1);
  }

  #[test]
  fn delete_returns_removed_record() {
    let mut b = book(&[("Alice", None), ("Bob", None)]);
    let removed = b.delete("Alice").unwrap();
    assert_eq!(removed.name(), "Alice");
    assert!(b.find("Alice").is_none());
    assert_eq!(b.len(), 1);
  }

  #[test]
  fn find_mut_edits_in_place() {
    let mut b = book(&[("Alice", None)]);
    b.find_mut("Alice").unwrap().add_phone("5555555555").unwrap();
    assert_eq!(b.phone_count(), 2);
  }

  // ── Upcoming birthdays ────────────────────────────────────────────────────

  #[test]
  fn weekday_birthday_in_window_is_unchanged() {
    // 2024-06-14 is a Friday.
    let b = book(&[("Alice", Some("14.06.1985"))]);
    assert_eq!(
      b.upcoming_birthdays_from(today(), DEFAULT_UPCOMING_DAYS),
      [UpcomingBirthday { name: "Alice".into(), date: ymd(2024, 6, 14) }]
    );
  }

  #[test]
  fn saturday_birthday_moves_to_monday() {
    // 2024-06-15 is a Saturday.
    let b = book(&[("Alice", Some("15.06.1990"))]);
    let found = b.upcoming_birthdays_from(today(), 7);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].date, ymd(2024, 6, 17));
  }

  #[test]
  fn sunday_birthday_moves_to_monday() {
    let b = book(&[("Alice", Some("16.06.1990"))]);
    let found = b.upcoming_birthdays_from(today(), 7);
    assert_eq!(found[0].date, ymd(2024, 6, 17));
  }

  #[test]
  fn passed_birthday_is_excluded() {
    let b = book(&[("Alice", Some("05.06.1990"))]);
    assert!(b.upcoming_birthdays_from(today(), 7).is_empty());
  }

  #[test]
  fn window_is_inclusive_at_both_ends() {
    let b = book(&[
      ("Today", Some("10.06.1990")),
      ("Edge", Some("17.06.1990")),
      ("Beyond", Some("18.06.1990")),
    ]);
    let names: Vec<_> = b
      .upcoming_birthdays_from(today(), 7)
      .into_iter()
      .map(|u| u.name)
      .collect();
    assert_eq!(names, ["Today", "Edge"]);
  }

  #[test]
  fn adjustment_happens_after_window_test() {
    // Saturday at delta 5 is selected by a 5-day window, then moved to
    // Monday at delta 7.
    let b = book(&[("Alice", Some("15.06.1990"))]);
    let found = b.upcoming_birthdays_from(today(), 5);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].date, ymd(2024, 6, 17));
    assert!(b.upcoming_birthdays_from(today(), 4).is_empty());
  }

  #[test]
  fn records_without_birthday_are_skipped() {
    let b = book(&[("Alice", None), ("Bob", Some("12.06.2000"))]);
    let found = b.upcoming_birthdays_from(today(), 7);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Bob");
  }

  #[test]
  fn window_wraps_into_next_year() {
    // 2024-12-30 is a Monday; 2025-01-02 a Thursday.
    let b = book(&[("Alice", Some("02.01.1970"))]);
    let found = b.upcoming_birthdays_from(ymd(2024, 12, 30), 7);
    assert_eq!(found[0].date, ymd(2025, 1, 2));
  }

  #[test]
  fn leap_day_birthday_in_common_year() {
    // 2025-02-28 is a Friday.
    let b = book(&[("Alice", Some("29.02.2000"))]);
    let found = b.upcoming_birthdays_from(ymd(2025, 2, 25), 7);
    assert_eq!(found[0].date, ymd(2025, 2, 28));
  }

  #[test]
  fn zero_day_window_only_matches_today() {
    let b = book(&[("Alice", Some("10.06.1990")), ("Bob", Some("11.06.1990"))]);
    let found = b.upcoming_birthdays_from(today(), 0);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Alice");
  }

  #[test]
  fn empty_book_has_no_birthdays() {
    assert!(AddressBook::new().upcoming_birthdays(7).is_empty());
  }

  #[test]
  fn weekend_adjustment() {
    assert_eq!(adjust_for_weekend(ymd(2024, 6, 22)), ymd(2024, 6, 24));
    assert_eq!(adjust_for_weekend(ymd(2024, 6, 23)), ymd(2024, 6, 24));
    assert_eq!(adjust_for_weekend(ymd(2024, 6, 14)), ymd(2024, 6, 14));
  }

  // ── Serialisation ─────────────────────────────────────────────────────────

  #[test]
  fn json_round_trip_preserves_everything() {
    let mut b = book(&[("Alice", Some("15.06.1990")), ("Bob", None)]);
    b.find_mut("Alice").unwrap().add_phone("0987654321").unwrap();

    let json = serde_json::to_string(&b).unwrap();
    let back: AddressBook = serde_json::from_str(&json).unwrap();

    assert_eq!(back, b);
    assert_eq!(back.phone_count(), 3);
  }

  #[test]
  fn json_round_trip_keeps_insertion_order() {
    let b = book(&[("Zed", None), ("Alice", None), ("Mia", None)]);
    let json = serde_json::to_string(&b).unwrap();
    assert!(json.find("Zed").unwrap() < json.find("Alice").unwrap());

    let back: AddressBook = serde_json::from_str(&json).unwrap();
    let names: Vec<_> = back.iter().map(Record::name).collect();
    assert_eq!(names, ["Zed", "Alice", "Mia"]);
  }

  #[test]
  fn key_must_match_record_name() {
    let json = r#"{"Alice":{"name":"Bob","phones":[]}}"#;
    let err = serde_json::from_str::<AddressBook>(json).unwrap_err();
    assert!(err.to_string().contains("holds a record named"), "{err}");
  }

  #[test]
  fn blank_record_name_is_rejected_on_load() {
    let json = r#"{"  ":{"name":"  ","phones":[]}}"#;
    assert!(serde_json::from_str::<AddressBook>(json).is_err());
  }

  #[test]
  fn duplicate_keys_are_rejected() {
    let json = r#"{"Bob":{"name":"Bob"},"Bob":{"name":"Bob"}}"#;
    let err = serde_json::from_str::<AddressBook>(json).unwrap_err();
    assert!(err.to_string().contains("duplicate contact"), "{err}");
  }

  #[test]
  fn serialised_shape_is_a_name_map() {
    let b = book(&[("Alice", Some("15.06.1990"))]);
    let value = serde_json::to_value(&b).unwrap();
    assert_eq!(
      value,
      serde_json::json!({
        "Alice": { "name": "Alice", "phones": ["1234567890"], "birthday": "15.06.1990" }
      })
    );
  }
}
