//! JSON-lines file logger.
//!
//! The terminal is in raw mode while playing, so nothing may go to stderr. When
//! `TYPEFALL_LOG_PATH` is set every `log` record is appended to that file as one JSON
//! object per line.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LogLine<'a> {
    ts_ms: u64,
    level: &'a str,
    target: &'a str,
    msg: String,
}

pub struct JsonlLogger {
    level: LevelFilter,
    out: Mutex<BufWriter<File>>,
}

impl JsonlLogger {
    pub fn open(path: &str, level: LevelFilter) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {path}"))?;
        Ok(Self {
            level,
            out: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl Log for JsonlLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let ts_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let line = LogLine {
            ts_ms,
            level: record.level().as_str(),
            target: record.target(),
            msg: record.args().to_string(),
        };
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if serde_json::to_writer(&mut *out, &line).is_ok() {
            let _ = out.write_all(b"\n");
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

/// Install the file logger if `TYPEFALL_LOG_PATH` is set; returns whether it was.
pub fn init_from_env() -> Result<bool> {
    let path = std::env::var("TYPEFALL_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) });
    let Some(path) = path else {
        return Ok(false);
    };

    let level = LevelFilter::Debug;
    let logger = JsonlLogger::open(&path, level)?;
    log::set_boxed_logger(Box::new(logger)).context("installing logger")?;
    log::set_max_level(level);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_writes_one_json_object_per_line() {
        let path = std::env::temp_dir().join(format!("typefall-log-{}.jsonl", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let _ = std::fs::remove_file(&path);

        let logger = JsonlLogger::open(&path_str, LevelFilter::Info).unwrap();
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("typefall")
                .args(format_args!("game over, score {}", 250))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("typefall")
                .args(format_args!("filtered"))
                .build(),
        );
        logger.flush();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["msg"], "game over, score 250");
        let _ = std::fs::remove_file(&path);
    }
}
