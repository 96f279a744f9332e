//! `tracing` output for the browser console.
//!
//! The fmt subscriber formats each event into a [`ConsoleWriter`], which
//! forwards the finished line to the console method matching the event's
//! level when it is dropped.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Log,
    Debug,
}

fn console_method(level: Level) -> ConsoleMethod {
    match level {
        Level::ERROR => ConsoleMethod::Error,
        Level::WARN => ConsoleMethod::Warn,
        Level::INFO => ConsoleMethod::Log,
        _ => ConsoleMethod::Debug,
    }
}

fn max_level() -> Level {
    if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO }
}

/// Buffers one formatted event.
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self { level, buf: Vec::new() }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let text = text.trim_end();
        if text.is_empty() {
            return;
        }
        let msg = wasm_bindgen::JsValue::from_str(text);
        match console_method(self.level) {
            ConsoleMethod::Error => web_sys::console::error_1(&msg),
            ConsoleMethod::Warn => web_sys::console::warn_1(&msg),
            ConsoleMethod::Log => web_sys::console::log_1(&msg),
            ConsoleMethod::Debug => web_sys::console::debug_1(&msg),
        }
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> ConsoleWriter {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> ConsoleWriter {
        ConsoleWriter::new(*meta.level())
    }
}

/// Install the console subscriber. Call once at startup.
pub fn init() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(max_level())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(ConsoleMakeWriter)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        web_sys::console::warn_1(&format!("tracing subscriber already installed: {err}").into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(console_method(Level::ERROR), ConsoleMethod::Error);
        assert_eq!(console_method(Level::WARN), ConsoleMethod::Warn);
        assert_eq!(console_method(Level::INFO), ConsoleMethod::Log);
        assert_eq!(console_method(Level::DEBUG), ConsoleMethod::Debug);
        assert_eq!(console_method(Level::TRACE), ConsoleMethod::Debug);
    }

    #[test]
    fn writer_buffers_every_write() {
        use std::io::Write;

        let mut w = ConsoleWriter::new(Level::INFO);
        w.write_all(b"order served").unwrap();
        w.write_all(b" combo=2\n").unwrap();
        assert_eq!(w.buf, b"order served combo=2\n");
        // Dropping would call into the browser console.
        w.buf.clear();
    }
}
