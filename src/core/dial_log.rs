use chrono::Local;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Number written to the log when a line is not about a specific contact
pub const NO_NUMBER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialStatus {
    Success,
    Failed,
    Error,
}

impl fmt::Display for DialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DialStatus::Success => "SUCCESS",
            DialStatus::Failed => "FAILED",
            DialStatus::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Append-only text log of dial outcomes.
///
/// The file is opened, appended to and closed on every record, so nothing
/// is held open between calls.
#[derive(Debug, Clone)]
pub struct DialLog {
    path: PathBuf,
}

impl DialLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `[timestamp] STATUS - NUMBER DETAIL`, creating the log directory if needed
    pub fn record(&self, status: DialStatus, number: &str, detail: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "{}", format_entry(&timestamp.to_string(), status, number, detail))
    }
}

fn format_entry(timestamp: &str, status: DialStatus, number: &str, detail: &str) -> String {
    // Trailing space after the number is kept even without a detail
    format!("[{}] {} - {} {}", timestamp, status, number, detail)
}
