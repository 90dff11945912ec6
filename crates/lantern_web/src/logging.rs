//! Console logging
//!
//! A `tracing-subscriber` fmt subscriber whose writer hands each formatted
//! event to a console sink, one call per event, tagged with the event level
//! so the browser can pick `console.error`, `console.warn` and so on.

use std::io;

use lantern_core::LogLevel;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Receives one formatted event
pub type ConsoleSink = fn(Level, &str);

/// [`MakeWriter`] producing a [`ConsoleWriter`] per event
#[derive(Clone, Copy)]
pub struct ConsoleMakeWriter {
    sink: ConsoleSink,
}

impl ConsoleMakeWriter {
    pub fn new(sink: ConsoleSink) -> Self {
        Self { sink }
    }

    fn writer(&self, level: Level) -> ConsoleWriter {
        ConsoleWriter {
            level,
            sink: self.sink,
            buffer: Vec::new(),
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.writer(*meta.level())
    }
}

/// Buffers one event and flushes it to the sink when dropped
pub struct ConsoleWriter {
    level: Level,
    sink: ConsoleSink,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end();
        if !line.is_empty() {
            (self.sink)(self.level, line);
        }
    }
}

/// Filter admitting `level` and everything more severe
pub fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.as_str())
}

/// Install the global subscriber
///
/// Returns `false` when a subscriber was already installed.
pub fn init(level: LogLevel, sink: ConsoleSink) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(ConsoleMakeWriter::new(sink))
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init()
        .is_ok()
}
