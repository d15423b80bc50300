//! Debug log file and `log` facade bridge for tab-switcher.
//!
//! All `log::*!` output goes to /tmp/tab_switcher_debug.log on Unix/macOS, or
//! %TEMP%\tab_switcher_debug.log on Windows, so a host embedding the switcher
//! in a terminal UI keeps its stdout/stderr clean. When `RUST_LOG` is set the
//! same lines are mirrored to stderr.
//!
//! Level precedence: `--log-level` CLI flag, then `RUST_LOG`, then
//! `log_level` from config.yaml.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use tab_switcher_config::LogLevel;

/// Debug log file writer
struct DebugLogger {
    file: Option<File>,
    mirror_stderr: bool,
}

impl DebugLogger {
    fn open(level: log::LevelFilter, mirror_stderr: bool) -> Self {
        if level == log::LevelFilter::Off {
            return Self {
                file: None,
                mirror_stderr,
            };
        }

        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            // Silently run without a file; debug output must never break the host
            .ok();

        let mut logger = Self {
            file,
            mirror_stderr,
        };
        logger.write_raw(&format!(
            "\n{}\ntab-switcher debug session started at {} (level={})\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            level,
            "=".repeat(80)
        ));
        logger
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn write_line(&mut self, line: &str) {
        self.write_raw(line);
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

/// `log::Log` implementation that routes records into the debug log file
struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(logger) = LOGGER.get() {
            let line = format!(
                "[{}] [{:<5}] [{}] {}\n",
                get_timestamp(),
                record.level(),
                record.target(),
                record.args()
            );
            logger.lock().write_line(&line);
        }
    }

    fn flush(&self) {
        if let Some(logger) = LOGGER.get() {
            let mut logger = logger.lock();
            if let Some(file) = logger.file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

static BRIDGE: LogBridge = LogBridge;

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/tab_switcher_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("tab_switcher_debug.log")
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Pick the effective level filter from the three configuration sources
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    rust_log: Option<&str>,
    config_level: LogLevel,
) -> log::LevelFilter {
    if let Some(level) = cli_level {
        return level.to_level_filter();
    }
    if let Some(filter) = rust_log.and_then(|value| log::LevelFilter::from_str(value.trim()).ok())
    {
        return filter;
    }
    config_level.to_level_filter()
}

/// Install the log bridge as the global `log` logger
///
/// Only the first call installs the bridge; later calls just adjust the
/// maximum level. Returns the effective level.
pub fn init_log_bridge(cli_level: Option<LogLevel>, config_level: LogLevel) -> log::LevelFilter {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref(), config_level);

    LOGGER.get_or_init(|| Mutex::new(DebugLogger::open(level, rust_log.is_some())));
    // Already installed if this is a repeat call
    let _ = log::set_logger(&BRIDGE);
    log::set_max_level(level);
    level
}
