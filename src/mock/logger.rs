use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "CHESS_LOG";

/// Minimal `log` backend writing to stderr, so it does not interleave
/// with the board drawn on stdout.
#[derive(Debug)]
pub struct TerminalLogger;

static LOGGER: TerminalLogger = TerminalLogger;

impl TerminalLogger {
    /// Install the logger with the level from [`LOG_ENV`] (default `warn`).
    pub fn init_from_env() -> Result<(), SetLoggerError> {
        let level = level_from(std::env::var(LOG_ENV).ok().as_deref());
        Self::init(level)
    }

    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for TerminalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr(),
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}
