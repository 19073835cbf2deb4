use std::{
    fmt,
    io::{self, Write},
};

use crossbeam::channel::{Receiver, Sender, unbounded};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

#[derive(Debug)]
pub struct LogMessage {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.level, self.message)
    }
}

/// A `log` backend that hands every record to a channel, so that timer threads never write to
/// the terminal themselves.
pub struct ChannelLogger {
    sender: Sender<LogMessage>,
    level: LevelFilter,
}

impl log::Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = self.sender.try_send(LogMessage {
                level: record.metadata().level(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

impl ChannelLogger {
    pub fn new(sender: Sender<LogMessage>, level: LevelFilter) -> Self {
        Self { sender, level }
    }

    pub fn with_receiver(level: LevelFilter) -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender, level), receiver)
    }
}

/// Install a [`ChannelLogger`] as the global logger and return the receiving end.
///
/// Fails if a global logger has already been set.
pub fn install(level: LevelFilter) -> Result<Receiver<LogMessage>, SetLoggerError> {
    let (logger, receiver) = ChannelLogger::with_receiver(level);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(receiver)
}

/// Write every record already waiting in `records` to `out`, one per line, without blocking.
///
/// Returns how many records were written.
pub fn flush(records: &Receiver<LogMessage>, out: &mut impl Write) -> io::Result<usize> {
    let mut written = 0;
    for message in records.try_iter() {
        writeln!(out, "{message}")?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}
