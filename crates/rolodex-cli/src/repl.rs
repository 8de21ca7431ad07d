//! The interactive read-eval-print loop.

use std::io::{self, BufRead, Write};

use chrono::Local;
use rolodex_core::AddressBook;

use crate::command::{Dispatcher, Reply};

const PROMPT: &str = "Enter a command: ";

/// Read commands from `input` until `exit`/`close` or end of input, writing
/// replies to `output`. Mutates `book` in place; saving is the caller's job.
pub fn run<R: BufRead, W: Write>(
  input: R,
  mut output: W,
  book: &mut AddressBook,
  dispatcher: &Dispatcher,
) -> io::Result<()> {
  writeln!(output, "Welcome to the assistant bot!")?;

  let mut lines = input.lines();
  loop {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    let Some(line) = lines.next() else {
      writeln!(output)?;
      break;
    };
    let line = line?;

    match dispatcher.handle_line(&line, book, Local::now().date_naive()) {
      None => {}
      Some(Reply::Continue(message)) => writeln!(output, "{message}")?,
      Some(Reply::Exit(message)) => {
        writeln!(output, "{message}")?;
        break;
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use super::*;

  fn session(input: &str, book: &mut AddressBook) -> String {
    let mut out = Vec::new();
    run(Cursor::new(input), &mut out, book, &Dispatcher::new(7)).unwrap();
    String::from_utf8(out).unwrap()
  }

  #[test]
  fn runs_until_exit() {
    let mut book = AddressBook::new();
    let out = session("hello\nadd John 1234567890\n\nexit\nadd Ann 5555555555\n", &mut book);

    assert_eq!(
      out,
      "Welcome to the assistant bot!\n\
       Enter a command: How can I help you?\n\
       Enter a command: Contact added.\n\
       Enter a command: \
       Enter a command: Good bye!\n"
    );
    assert!(book.contains("John"));
    assert!(!book.contains("Ann"), "input after exit must be ignored");
  }

  #[test]
  fn end_of_input_ends_session() {
    let mut book = AddressBook::new();
    let out = session("add John 1234567890", &mut book);
    assert!(out.ends_with("Contact added.\nEnter a command: \n"));
    assert_eq!(book.len(), 1);
  }

  #[test]
  fn errors_do_not_end_session() {
    let mut book = AddressBook::new();
    let out = session("add John 12\nbogus\nphone John\nclose\n", &mut book);
    assert!(out.contains("Phone number must be 10 digits long\n"));
    assert!(out.contains("Invalid command.\n"));
    assert!(out.contains("Contact John not found\n"));
    assert!(out.ends_with("Good bye!\n"));
  }
}
