/*
`log` backend for the browser build.

macroquad's web loader has no wasm-bindgen, so the usual console loggers
cannot link. Records are handed to macroquad's own logging macros instead,
which reach `console.log` on the web and stdout natively.
*/

use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            Level::Error => macroquad::logging::error!("{}", line),
            Level::Warn => macroquad::logging::warn!("{}", line),
            Level::Info => macroquad::logging::info!("{}", line),
            Level::Debug | Level::Trace => macroquad::logging::debug!("{}", line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Info);

/// Install the console logger. A second call is a no-op.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}
