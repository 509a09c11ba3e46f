//! Diagnostics and finished-round recording.
//!
//! The terminal belongs to the UI, so diagnostics go to
//! `<log_dir>/pollboard.log` and only when enabled. Finished rounds are
//! appended to a daily `results_<date>.toml` file as `[[round]]` tables, so
//! the whole file stays valid TOML no matter how many rounds it holds.

use crate::config::{expand_home, LoggingConfig};
use crate::poll::PollSnapshot;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the file-backed tracing subscriber. No-op when disabled.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }
    let log_dir = expand_home(&config.log_dir);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let path = log_dir.join("pollboard.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundEnd {
    /// The countdown reached zero.
    Expired,
    /// The host reset while votes were still on the board.
    Reset,
}

/// One finished round as written to the results file.
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    pub ended_at: String,
    pub reason: RoundEnd,
    #[serde(flatten)]
    pub snapshot: PollSnapshot,
}

impl RoundRecord {
    pub fn new(reason: RoundEnd, snapshot: PollSnapshot) -> Self {
        Self {
            ended_at: chrono::Local::now().to_rfc3339(),
            reason,
            snapshot,
        }
    }
}

#[derive(Serialize)]
struct RoundTable<'a> {
    round: Vec<&'a RoundRecord>,
}

/// Render a record as a standalone `[[round]]` table.
pub fn format_round(record: &RoundRecord) -> Result<String> {
    let table = RoundTable {
        round: vec![record],
    };
    toml::to_string(&table).context("Failed to serialize round")
}

/// Appends finished rounds to per-day TOML files.
///
/// File handles are cached for the lifetime of the logger. A file that
/// cannot be opened is reported through tracing and the record is dropped.
pub struct ResultsLogger {
    enabled: bool,
    log_dir: PathBuf,
    file_handles: HashMap<String, fs::File>,
}

impl ResultsLogger {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.record_results,
            log_dir: expand_home(&config.log_dir),
            file_handles: HashMap::new(),
        }
    }

    pub fn record(&mut self, record: &RoundRecord) {
        if !self.enabled {
            return;
        }
        let text = match format_round(record) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("dropping round record: {:#}", e);
                return;
            }
        };

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let filename = format!("results_{}.toml", date);

        if !self.file_handles.contains_key(&filename) {
            let path = self.log_dir.join(&filename);
            let opened = fs::create_dir_all(&self.log_dir)
                .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));
            match opened {
                Ok(file) => {
                    self.file_handles.insert(filename.clone(), file);
                }
                Err(e) => {
                    tracing::warn!("cannot open results file {}: {}", path.display(), e);
                    return;
                }
            }
        }

        if let Some(handle) = self.file_handles.get_mut(&filename) {
            if let Err(e) = writeln!(handle, "{}", text) {
                tracing::warn!("failed to write round record: {}", e);
            }
        }
    }
}
