use thiserror::Error;

/// An operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `attack <name>`: the player attacks the entity called `name`.
    Attack(String),
    /// `exit` or `quit`: leave the command loop.
    Exit,
}

/// Why a line is not a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
}

impl Command {
    /// Parse one line of input. Tokens are separated by any amount of whitespace.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => Err(CommandError::Empty),
            ["attack", name] => Ok(Command::Attack((*name).to_owned())),
            ["exit" | "quit"] => Ok(Command::Exit),
            _ => Err(CommandError::Unknown(line.trim().to_owned())),
        }
    }
}
