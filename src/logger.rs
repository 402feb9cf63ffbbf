/*============================================================
  Synavera Project: Syn-Pub
  Module: synpub_core::logger
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    Structured, append-only diagnostics for Syn-Pub-Core runs,
    kept off stdout so package reports stay clean.

  Security / Safety Notes:
    Only package names, URLs and status codes are logged.

  Dependencies:
    std::sync::Mutex, chrono for timestamps, sha2 for sealing.

  Operational Scope:
    Shared by the entry point and the report loop; optional
    session file sealed with a SHA-256 digest on exit.

  Revision History:
    2026-10-18 COD  Carried Synavera log cadence into Syn-Pub.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Append-only logging with UTC timestamps
    - Deterministic formatting for auditability
    - Graceful error propagation on I/O failures
============================================================*/

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::error::{Result, SynpubError};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Warnings and errors reach stderr even without `--verbose`.
    fn always_visible(self) -> bool {
        matches!(self, LogLevel::Warn | LogLevel::Error)
    }
}

/// Stderr logger with an optional append-only session file.
pub struct Logger {
    sink: Option<(PathBuf, Mutex<BufWriter<File>>)>,
    verbose: bool,
}

impl Logger {
    /// Stderr only.
    pub fn console(verbose: bool) -> Self {
        Self {
            sink: None,
            verbose,
        }
    }

    /// Stderr plus the given file, creating parent directories as needed.
    pub fn with_file(path: PathBuf, verbose: bool) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                SynpubError::Filesystem(format!(
                    "Failed to create log directory {}: {err}",
                    parent.display()
                ))
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| {
                SynpubError::Filesystem(format!(
                    "Failed to open log file {}: {err}",
                    path.display()
                ))
            })?;
        Ok(Self {
            sink: Some((path, Mutex::new(BufWriter::new(file)))),
            verbose,
        })
    }

    pub fn log<S: AsRef<str>>(&self, level: LogLevel, code: &str, message: S) {
        let line = format_line(level, code, message.as_ref());

        if self.verbose || level.always_visible() {
            eprintln!("{line}");
        }

        let Some((_, writer)) = &self.sink else {
            return;
        };
        if let Ok(mut guard) = writer.lock() {
            if writeln!(guard, "{line}").and_then(|_| guard.flush()).is_err() {
                eprintln!(
                    "{}",
                    format_line(LogLevel::Error, "LOGGER", "Failed to write to log file")
                );
            }
        }
    }

    pub fn info<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Info, code, message);
    }

    pub fn warn<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Warn, code, message);
    }

    pub fn error<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Error, code, message);
    }

    pub fn debug<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Debug, code, message);
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|(path, _)| path.as_path())
    }

    /// Write `<log>.hash` holding the SHA-256 of the session file in
    /// `sha256sum` format. No-op for console-only loggers.
    pub fn seal(&self) -> Result<Option<PathBuf>> {
        let Some(path) = self.path() else {
            return Ok(None);
        };
        let data = std::fs::read(path).map_err(|err| {
            SynpubError::Filesystem(format!(
                "Failed to read log for hashing {}: {err}",
                path.display()
            ))
        })?;
        let digest = Sha256::digest(&data);

        let mut hash_os = path.as_os_str().to_os_string();
        hash_os.push(".hash");
        let hash_path = PathBuf::from(hash_os);
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        std::fs::write(&hash_path, format!("{digest:x}  {file_name}\n")).map_err(|err| {
            SynpubError::Filesystem(format!(
                "Failed to write hash file {}: {err}",
                hash_path.display()
            ))
        })?;
        Ok(Some(hash_path))
    }
}

fn format_line(level: LogLevel, code: &str, message: &str) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    format!("{timestamp} [{}] [{code}] {message}", level.as_str())
}
