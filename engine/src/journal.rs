//! The journal: the human-readable record of a skirmish.
//!
//! Two kinds of lines are ever written, and their wording is fixed:
//!
//! ```text
//! orc hit hero. hero health is 39.
//! Player hero lost the game.
//! ```
//!
//! Diagnostics do not belong here; they go through `log`.

use std::{
    fmt,
    io::{self, Write},
};

use crossbeam::channel::{Receiver, Sender, unbounded};

/// One line of the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// `attacker` hit `victim`, leaving it at `health`.
    Hit {
        attacker: String,
        victim: String,
        health: u32,
    },
    /// A player's health reached zero.
    PlayerLost { player: String },
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Hit {
                attacker,
                victim,
                health,
            } => write!(f, "{attacker} hit {victim}. {victim} health is {health}."),
            Entry::PlayerLost { player } => write!(f, "Player {player} lost the game."),
        }
    }
}

enum Sink {
    Stdout,
    Channel(Sender<Entry>),
}

/// Destination for journal entries. Shared by every thread writing to the same manager.
pub struct Journal {
    sink: Sink,
}

impl Journal {
    /// A journal printing each entry as a line on stdout.
    pub fn stdout() -> Self {
        Self { sink: Sink::Stdout }
    }

    /// A journal forwarding entries to `sender`.
    pub fn new(sender: Sender<Entry>) -> Self {
        Self {
            sink: Sink::Channel(sender),
        }
    }

    /// A journal plus the receiving end of its entries.
    pub fn with_receiver() -> (Self, Receiver<Entry>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender), receiver)
    }

    /// Write one entry, returning whether it reached its destination. Entries nobody is
    /// listening for anymore are dropped.
    pub fn record(&self, entry: Entry) -> bool {
        match &self.sink {
            Sink::Stdout => writeln!(io::stdout().lock(), "{entry}").is_ok(),
            Sink::Channel(sender) => sender.try_send(entry).is_ok(),
        }
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sink {
            Sink::Stdout => f.write_str("Journal(stdout)"),
            Sink::Channel(_) => f.write_str("Journal(channel)"),
        }
    }
}
