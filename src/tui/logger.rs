use log::{Level, Log, Metadata, Record, SetLoggerError};
use std::sync::{Arc, Mutex};

/// Lines kept in the overlay buffer.
pub const LOG_CAPACITY: usize = 100;

pub type LogBuffer = Arc<Mutex<Vec<String>>>;

/// Buffers formatted records for the log overlay instead of writing to the
/// terminal, which is owned by the TUI while it runs.
pub struct TuiLogger {
    log_buffer: LogBuffer,
    level: Level,
}

impl TuiLogger {
    pub fn new(level: Level) -> (Self, LogBuffer) {
        let log_buffer = Arc::new(Mutex::new(Vec::new()));
        (TuiLogger { log_buffer: log_buffer.clone(), level }, log_buffer)
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let msg = format!("{:<5} {}", record.level(), record.args());
            if let Ok(mut buffer) = self.log_buffer.lock() {
                buffer.push(msg);
                if buffer.len() > LOG_CAPACITY {
                    buffer.remove(0);
                }
            }
        }
    }

    fn flush(&self) {}
}

/// Install a [`TuiLogger`] as the global logger. Can only succeed once per process.
pub fn install(level: Level) -> Result<LogBuffer, SetLoggerError> {
    let (logger, buffer) = TuiLogger::new(level);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level.to_level_filter());
    Ok(buffer)
}

/// The last `n` buffered lines, oldest first.
pub fn tail(buffer: &LogBuffer, n: usize) -> Vec<String> {
    match buffer.lock() {
        Ok(lines) => {
            let start = lines.len().saturating_sub(n);
            lines[start..].to_vec()
        }
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(logger: &TuiLogger, level: Level, msg: &str) {
        logger.log(&Record::builder().level(level).args(format_args!("{msg}")).build());
    }

    #[test]
    fn buffer_is_bounded() {
        let (logger, buffer) = TuiLogger::new(Level::Debug);
        for i in 0..(LOG_CAPACITY + 5) {
            emit(&logger, Level::Info, &format!("line {i}"));
        }
        let lines = tail(&buffer, usize::MAX);
        assert_eq!(lines.len(), LOG_CAPACITY);
        assert!(lines[0].ends_with("line 5"));
    }

    #[test]
    fn level_filters_records() {
        let (logger, buffer) = TuiLogger::new(Level::Info);
        emit(&logger, Level::Debug, "hidden");
        emit(&logger, Level::Warn, "shown");
        let lines = tail(&buffer, 10);
        assert_eq!(lines, vec!["WARN  shown".to_string()]);
    }
}
