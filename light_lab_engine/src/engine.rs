/// Light Lab Engine - process-wide logging facade
///
/// Holds the global logger and its severity filter. Scene and render state
/// never live here: they are owned by the caller and passed by reference
/// into the orchestrator each frame.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<LoggerState>> = OnceLock::new();

struct LoggerState {
    logger: Box<dyn Logger>,
    min_severity: LogSeverity,
}

impl LoggerState {
    fn new() -> Self {
        Self {
            logger: Box::new(DefaultLogger),
            min_severity: LogSeverity::Info,
        }
    }
}

fn logger_state() -> &'static RwLock<LoggerState> {
    LOGGER.get_or_init(|| RwLock::new(LoggerState::new()))
}

// ===== PUBLIC API =====

/// Engine facade for process-wide services
///
/// # Example
///
/// ```no_run
/// use light_lab_engine::lightlab::{Engine, log::LogSeverity};
///
/// Engine::set_min_severity(LogSeverity::Debug);
/// ```
pub struct Engine;

impl Engine {
    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// test capture, etc.). The severity filter is kept.
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_state().write() {
            lock.logger = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger) and the filter to Info
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_state().write() {
            *lock = LoggerState::new();
        }
    }

    /// Drop every entry below `severity`
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut lock) = logger_state().write() {
            lock.min_severity = severity;
        }
    }

    /// Current severity filter
    pub fn min_severity() -> LogSeverity {
        logger_state()
            .read()
            .map(|lock| lock.min_severity)
            .unwrap_or(LogSeverity::Info)
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source component (e.g., "lightlab::FrameOrchestrator")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if let Ok(lock) = logger_state().read() {
            if severity < lock.min_severity {
                return;
            }
            lock.logger.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
