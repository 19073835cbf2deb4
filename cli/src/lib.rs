//! Console front end for a skirmish: parse operator commands and carry them out.

pub mod command;
pub mod console;
pub mod logger;
pub mod output;

pub use command::{Command, CommandError};
pub use console::{Console, Flow};
