use std::{io, thread};

use anyhow::Context;
use clap::Parser;
use crossbeam::channel::Receiver;
use log::LevelFilter;
use rustyline::{DefaultEditor, ExternalPrinter, error::ReadlineError};

use skirmish_cli::{Console, Flow, logger, output};
use skirmish_engine::{
    ecs::EntityManager,
    journal::{Entry, Journal},
    scenario::{DEFAULT_MAX_COMPONENTS, PLAYER_DAMAGE, Skirmish},
};

/// Fight off an orc and a dragon. Type `attack <name>` to strike back.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of component slots each entity gets.
    #[arg(long, default_value_t = DEFAULT_MAX_COMPONENTS)]
    max_components: usize,

    /// Divide every attack interval by this factor.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    speedup: u32,

    /// Diagnostics level written to stderr.
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_recv = logger::install(args.log_level).context("installing the logger")?;
    thread::Builder::new()
        .name("log".into())
        .spawn({
            let log_recv = log_recv.clone();
            move || {
                for message in log_recv {
                    eprintln!("{message}");
                }
            }
        })
        .context("starting the log thread")?;

    let mut editor = DefaultEditor::new().context("opening the console")?;

    // Journal lines come from timer threads while a command is being typed; the external printer
    // redraws the prompt around them. Without a terminal there is nothing to redraw.
    let printer = match editor.create_external_printer() {
        Ok(printer) => Some(printer),
        Err(err) => {
            log::debug!("printing the journal straight to stdout: {err}");
            None
        }
    };
    let (journal, entries) = Journal::with_receiver();
    let journal_thread = thread::Builder::new()
        .name("journal".into())
        .spawn(move || print_journal(&entries, printer))
        .context("starting the journal thread")?;

    let manager = EntityManager::with_journal(args.max_components, journal);
    let skirmish = Skirmish::build(&manager, args.speedup);
    let console = Console::new(manager.clone(), skirmish.hero, PLAYER_DAMAGE);

    loop {
        match editor.readline("") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if console.handle_line(&line) == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => return Err(err).context("reading a command"),
        }
    }

    manager.stop_timers();

    // The journal thread ends once the last manager handle, and with it the journal, is gone.
    drop(console);
    drop(manager);
    if journal_thread.join().is_err() {
        log::error!("journal thread panicked");
    }

    logger::flush(&log_recv, &mut io::stderr().lock()).context("flushing the log")?;
    Ok(())
}

fn print_journal(entries: &Receiver<Entry>, mut printer: Option<impl ExternalPrinter>) {
    output::forward_entries(entries, |line| {
        if let Some(printer) = printer.as_mut()
            && printer.print(line.clone()).is_ok()
        {
            return;
        }
        println!("{line}");
    });
}
