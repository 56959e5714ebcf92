use std::{fmt, io::Write};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

pub struct Entry {
    pub time: String,
    pub level: Level,
    pub message: String,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:<5} {}", self.time, self.level, self.message)
    }
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level_filter(verbosity)))
}

#[must_use]
pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = Entry {
                time: Local::now().format("%b %d %H:%M:%S").to_string(),
                level: record.level(),
                message: record.args().to_string(),
            };
            let _ = writeln!(std::io::stderr().lock(), "{entry}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
