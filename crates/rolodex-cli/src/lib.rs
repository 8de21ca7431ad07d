//! Command layer for the Rolodex contact manager: dispatcher, settings and
//! the REPL loop driven by the `rolodex` binary.

pub mod command;
pub mod error;
pub mod repl;
pub mod settings;

pub use command::{Command, Dispatcher, Reply};
pub use error::CommandError;
pub use settings::{Overrides, Settings};
