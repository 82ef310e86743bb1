use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

/// Appends `timestamp [LEVEL] target: message` lines to a file.
pub struct Logger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl Logger {
    pub fn new(log_file: &str, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }

    pub fn format_line(record: &Record) -> String {
        format!(
            "{} [{}] {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // A poisoned lock or a full disk must never take the process down.
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", Self::format_line(record));
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Routes the `log` facade to `log_file`.
pub fn init_file(log_file: &str, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let logger = Logger::new(log_file, level)?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

/// Routes the `log` facade to stderr via `env_logger`; `RUST_LOG` still wins.
pub fn init_stderr(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter(None, LevelFilter::Warn)
        .filter(Some("cryptoflow"), level)
        .parse_default_env()
        .try_init();
}
