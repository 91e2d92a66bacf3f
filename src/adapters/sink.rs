//! Preset `log::Log` implementation: filter, encode, write

use super::encoder::Encoder;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::io::Write;

/// A `log::Log` that encodes each enabled record onto one line of a
/// single destination.
///
/// Writes are serialized by an internal lock, so the sink is safe to share
/// across threads. Write failures are reported on stderr and otherwise
/// ignored; logging never fails the caller.
pub struct EncodedLog {
    filter: LevelFilter,
    encoder: Encoder,
    destination: Mutex<Box<dyn Write + Send>>,
}

impl EncodedLog {
    pub fn new(filter: LevelFilter, encoder: Encoder, destination: Box<dyn Write + Send>) -> Self {
        Self {
            filter,
            encoder,
            destination: Mutex::new(destination),
        }
    }

    /// Sink writing to the process's standard error stream
    pub fn stderr(filter: LevelFilter, encoder: Encoder) -> Self {
        Self::new(filter, encoder, Box::new(std::io::stderr()))
    }

    pub fn filter(&self) -> LevelFilter {
        self.filter
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }
}

impl std::fmt::Debug for EncodedLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedLog")
            .field("filter", &self.filter)
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

impl Log for EncodedLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.encoder.encode(record);
        let mut destination = self.destination.lock();
        if let Err(e) = writeln!(destination, "{}", line) {
            eprintln!("[LOGGER ERROR] Failed to write log record: {}", e);
        }
    }

    fn flush(&self) {
        if let Err(e) = self.destination.lock().flush() {
            eprintln!("[LOGGER ERROR] Failed to flush log destination: {}", e);
        }
    }
}
