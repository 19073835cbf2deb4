//! Getting journal entries onto the terminal without tearing the line being typed.

use crossbeam::channel::Receiver;
use skirmish_engine::journal::Entry;

/// Hand every journal entry to `print` as a line, in the order recorded.
///
/// Blocks until every journal feeding `entries` has been dropped, and returns how many lines
/// were printed.
pub fn forward_entries(entries: &Receiver<Entry>, mut print: impl FnMut(String)) -> usize {
    let mut printed = 0;
    for entry in entries.iter() {
        print(entry.to_string());
        printed += 1;
    }
    printed
}
