//! Structured log of scorecard refresh outcomes (JSONL).
//!
//! Every refresh attempt — from the panel, the plugin activation ping, or
//! the `jupysec refresh` command — appends one line to
//! `~/.jupysec/refresh-log.jsonl`. The `jupysec history` command reads it
//! back. Writes are best-effort: a logging failure must never break a
//! refresh.

use std::fs::{OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config;

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

/// A single entry in the refresh log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshLogEntry {
    pub timestamp: String,
    /// Endpoint path relative to the namespace (e.g. `scorecard_update`).
    pub endpoint: String,
    /// Fully resolved request URL.
    pub url: String,
    pub success: bool,
    /// HTTP status, present whenever the server produced a response.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
    /// Short human-readable outcome: body summary or error message.
    pub detail: String,
    pub latency_ms: u64,
}

impl RefreshLogEntry {
    pub fn success(endpoint: &str, url: &str, detail: String, latency_ms: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            endpoint: endpoint.to_string(),
            url: url.to_string(),
            success: true,
            status: Some(200),
            detail,
            latency_ms,
        }
    }

    pub fn failure(
        endpoint: &str,
        url: &str,
        status: Option<u16>,
        detail: String,
        latency_ms: u64,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            endpoint: endpoint.to_string(),
            url: url.to_string(),
            success: false,
            status,
            detail,
            latency_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Append / read
// ---------------------------------------------------------------------------

/// Path to the refresh log file: `~/.jupysec/refresh-log.jsonl`.
pub fn refresh_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".jupysec").join("refresh-log.jsonl"))
}

/// Append an entry to the refresh log, best-effort.
///
/// Skipped entirely when `[log] enabled = false`. All I/O errors are
/// swallowed.
pub fn record(entry: &RefreshLogEntry) {
    if !config::load().log.enabled {
        return;
    }
    let Some(path) = refresh_log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = create_dir_all(parent);
    }
    let Ok(line) = serde_json::to_string(entry) else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
        let _ = writeln!(file, "{line}");
    }
}

/// Read every entry from the refresh log, oldest first.
///
/// Malformed lines are skipped. Returns an empty vec when the log does not
/// exist.
pub fn read_all_entries() -> Vec<RefreshLogEntry> {
    let Some(path) = refresh_log_path() else {
        return Vec::new();
    };
    let Ok(file) = std::fs::File::open(&path) else {
        return Vec::new();
    };
    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str(&line).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
