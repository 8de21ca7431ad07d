//! Command parsing and dispatch.
//!
//! A line is split on whitespace; the first token names the command and the
//! rest are its arguments. Every handler returns the text to print. Failures
//! are turned into their message here, so a bad line never ends the session.

use chrono::NaiveDate;
use rolodex_core::{AddressBook, Record, field::BIRTHDAY_FORMAT};
use strum::{EnumIter, EnumMessage, EnumString, IntoEnumIterator};
use tracing::{debug, info, warn};

use crate::error::{CommandError, Result};

// ─── Command ─────────────────────────────────────────────────────────────────

/// Every command the REPL understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, EnumMessage)]
#[strum(serialize_all = "kebab-case")]
pub enum Command {
  #[strum(message = "hello                            greet the bot")]
  Hello,
  #[strum(
    serialize = "add",
    serialize = "add-contact",
    message = "add <name> <phone>               add a contact, or a phone to one"
  )]
  AddContact,
  #[strum(
    serialize = "change",
    serialize = "change-contact",
    message = "change <name> [<old>] <new>      replace a phone"
  )]
  ChangeContact,
  #[strum(
    serialize = "phone",
    serialize = "show-phone",
    message = "phone <name>                     show a contact's phones"
  )]
  ShowPhone,
  #[strum(
    serialize = "all",
    serialize = "show-all",
    message = "all                              list every contact"
  )]
  ShowAll,
  #[strum(message = "remove-phone <name> <phone>      remove a phone from a contact")]
  RemovePhone,
  #[strum(message = "delete <name>                    delete a contact")]
  Delete,
  #[strum(message = "add-birthday <name> <DD.MM.YYYY> set a contact's birthday")]
  AddBirthday,
  #[strum(message = "show-birthday <name>             show a contact's birthday")]
  ShowBirthday,
  #[strum(message = "birthdays [<days>]               birthdays coming up soon")]
  Birthdays,
  #[strum(message = "help                             show this list")]
  Help,
  #[strum(
    serialize = "exit",
    serialize = "close",
    message = "exit | close                     save and quit"
  )]
  Exit,
}

/// Split `line` into a lower-cased command word and its arguments.
/// Returns `None` for a blank line.
pub fn parse_input(line: &str) -> Option<(String, Vec<&str>)> {
  let mut tokens = line.split_whitespace();
  let command = tokens.next()?.to_lowercase();
  Some((command, tokens.collect()))
}

// ─── Dispatcher ──────────────────────────────────────────────────────────────

/// What the REPL should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
  /// Print the message and read the next line.
  Continue(String),
  /// Print the message and end the session.
  Exit(String),
}

/// Routes input lines to handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
  /// Window for `birthdays` when no argument is given.
  upcoming_days: u32,
}

impl Dispatcher {
  pub fn new(upcoming_days: u32) -> Self { Self { upcoming_days } }

  /// Handle one input line against `book`.
  ///
  /// `today` anchors the birthday window. Returns `None` for a blank line.
  pub fn handle_line(
    &self,
    line: &str,
    book: &mut AddressBook,
    today: NaiveDate,
  ) -> Option<Reply> {
    let (word, args) = parse_input(line)?;

    let Ok(command) = word.parse::<Command>() else {
      debug!(command = %word, "unknown command");
      return Some(Reply::Continue("Invalid command.".into()));
    };
    debug!(?command, args = args.len(), "dispatching");

    let result = match command {
      Command::Exit => return Some(Reply::Exit("Good bye!".into())),
      Command::Hello => Ok("How can I help you?".to_owned()),
      Command::AddContact => add_contact(&args, book),
      Command::ChangeContact => change_contact(&args, book),
      Command::ShowPhone => show_phone(&args, book),
      Command::ShowAll => Ok(show_all(book)),
      Command::RemovePhone => remove_phone(&args, book),
      Command::Delete => delete_contact(&args, book),
      Command::AddBirthday => add_birthday(&args, book),
      Command::ShowBirthday => show_birthday(&args, book),
      Command::Birthdays => birthdays(&args, book, today, self.upcoming_days),
      Command::Help => Ok(help()),
    };

    Some(Reply::Continue(result.unwrap_or_else(|e| {
      match &e {
        CommandError::Core(core) if core.is_not_found() => {
          info!(?command, error = %e, "contact not found");
        }
        e if e.is_bad_input() => debug!(?command, error = %e, "input rejected"),
        _ => warn!(?command, error = %e, "command failed"),
      }
      e.to_string()
    })))
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `add <name> <phone>`: create the contact if needed, then append the phone.
///
/// The phone is validated before anything is inserted, so a rejected phone
/// never leaves an empty contact behind.
pub fn add_contact(args: &[&str], book: &mut AddressBook) -> Result<String> {
  let [name, phone, ..] = args else {
    return Err(CommandError::Arity("Add name and phone"));
  };

  if let Some(record) = book.find_mut(name) {
    record.add_phone(phone)?;
    return Ok("Contact updated.".into());
  }

  let mut record = Record::new(*name)?;
  record.add_phone(phone)?;
  book.add_record(record);
  Ok("Contact added.".into())
}

/// `change <name> <new>` replaces the contact's first phone (or adds it when
/// there is none). `change <name> <old> <new>` replaces `old`; an absent
/// `old` leaves the contact unchanged.
pub fn change_contact(args: &[&str], book: &mut AddressBook) -> Result<String> {
  let (name, old, new) = match args {
    [name, old, new, ..] => (*name, Some(*old), *new),
    [name, new] => (*name, None, *new),
    _ => return Err(CommandError::Arity("Add name and new phone")),
  };

  let Some(record) = book.find_mut(name) else {
    return Ok("Contact not found.".into());
  };

  match old {
    Some(old) => {
      if !record.edit_phone(old, new)? {
        debug!(contact = name, phone = old, "no matching phone to edit");
      }
    }
    None => record.set_phone_at(0, new)?,
  }
  Ok("Contact updated.".into())
}

/// `phone <name>`
pub fn show_phone(args: &[&str], book: &AddressBook) -> Result<String> {
  let [name, ..] = args else {
    return Err(CommandError::Arity("Add name"));
  };
  Ok(match book.find(name) {
    None => format!("Contact {name} not found"),
    Some(r) if r.phones().is_empty() => format!("Contact {name} has no phones"),
    Some(r) => r.phones_display(),
  })
}

/// `all`: one line per contact.
pub fn show_all(book: &AddressBook) -> String {
  if book.is_empty() {
    return "No contacts found.".into();
  }
  book
    .iter()
    .map(|r| {
      let birthday = r
        .birthday()
        .map_or_else(|| "not set".to_owned(), ToString::to_string);
      format!("{r}, birthday: {birthday}")
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// `remove-phone <name> <phone>`
pub fn remove_phone(args: &[&str], book: &mut AddressBook) -> Result<String> {
  let [name, phone, ..] = args else {
    return Err(CommandError::Arity("Add name and phone to remove"));
  };
  match book.find_mut(name) {
    Some(record) => {
      record.remove_phone(phone);
      Ok("Phone removed.".into())
    }
    None => Ok("Contact is not found".into()),
  }
}

/// `delete <name>`
pub fn delete_contact(args: &[&str], book: &mut AddressBook) -> Result<String> {
  let [name, ..] = args else {
    return Err(CommandError::Arity("Add name"));
  };
  book.delete(name)?;
  Ok("Contact deleted.".into())
}

/// `add-birthday <name> <DD.MM.YYYY>`
pub fn add_birthday(args: &[&str], book: &mut AddressBook) -> Result<String> {
  let [name, date, ..] = args else {
    return Err(CommandError::Arity("Add name and birthday"));
  };
  match book.find_mut(name) {
    Some(record) => {
      record.add_birthday(date)?;
      Ok("Birthday is added".into())
    }
    None => Ok("Contact is not found".into()),
  }
}

/// `show-birthday <name>`
pub fn show_birthday(args: &[&str], book: &AddressBook) -> Result<String> {
  let [name, ..] = args else {
    return Err(CommandError::Arity("Enter name"));
  };
  Ok(match book.find(name) {
    None => "Contact is not found".into(),
    Some(r) => match r.birthday() {
      Some(b) => format!("{name}: {b}"),
      None => "Birthday is not set".into(),
    },
  })
}

/// `birthdays [<days>]`: upcoming birthdays within the window.
pub fn birthdays(
  args: &[&str],
  book: &AddressBook,
  today: NaiveDate,
  default_days: u32,
) -> Result<String> {
  let days = match args.first() {
    Some(raw) => raw
      .parse::<u32>()
      .map_err(|_| CommandError::InvalidDays((*raw).to_owned()))?,
    None => default_days,
  };

  let upcoming = book.upcoming_birthdays_from(today, days);
  if upcoming.is_empty() {
    return Ok("There are no birthdays this week".into());
  }

  let entries = upcoming
    .iter()
    .map(|u| format!("{} : {}", u.name, u.date.format(BIRTHDAY_FORMAT)))
    .collect::<Vec<_>>()
    .join(", ");
  Ok(format!("Birthdays this week: {entries}"))
}

/// `help`: one line per command.
pub fn help() -> String {
  Command::iter()
    .filter_map(|c| c.get_message())
    .collect::<Vec<_>>()
    .join("\n")
}
