//! Console Logger
//!
//! `log` backend for browser builds. Records go to `console.error`,
//! `console.warn`, `console.info` or `console.debug` depending on level,
//! prefixed with their target the same way the app tags its own messages
//! (`[board] Loaded 12 todos`).

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use wasm_bindgen::JsValue;

/// Logger writing to the browser console
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
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
        let line = JsValue::from_str(&format_line(record.level(), record.target(), &record.args().to_string()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger as the global `log` backend.
///
/// Fails if another logger was installed first.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}

/// Parse a level name ("error", "WARN", "off", ...), falling back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Render one console line: `[target] message`, with the level for warnings and errors.
fn format_line(level: Level, target: &str, message: &str) -> String {
    // Crate-path targets are noisy in the console; keep the last segment
    let tag = target.rsplit("::").next().unwrap_or(target);
    match level {
        Level::Error | Level::Warn => format!("[{}] {}: {}", tag, level, message),
        _ => format!("[{}] {}", tag, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_uses_last_target_segment() {
        let line = format_line(Level::Info, "todo_board_ui::actions", "Loaded 3 todos");
        assert_eq!(line, "[actions] Loaded 3 todos");
    }

    #[test]
    fn test_format_line_marks_errors() {
        let line = format_line(Level::Error, "dnd", "update failed");
        assert_eq!(line, "[dnd] ERROR: update failed");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = ConsoleLogger::new(LevelFilter::Warn);
        let warn = Metadata::builder().level(Level::Warn).build();
        let info = Metadata::builder().level(Level::Info).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }
}
