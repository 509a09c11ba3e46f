//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML. Every field has a
//! default so the board runs with no config file at all.

use crate::i18n::Language;
use crate::poll::color::Rgb;
use crate::poll::option::NewOption;
use crate::poll::theme::ThemeColors;
use crate::poll::{default_seed, Poll, PollError, DEFAULT_TIMER_DURATION};
use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub theme: ThemeColors,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Build the starting poll from the configured seed, duration and theme.
    pub fn build_poll(&self) -> Result<Poll, PollError> {
        let seed = self
            .poll
            .options
            .iter()
            .map(|o| NewOption {
                name: o.name.clone(),
                votes: o.votes,
                color: o.color,
            })
            .collect();
        Poll::new(seed, self.poll.duration_secs, self.theme)
    }
}

/// Countdown length and the options a fresh poll starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_duration")]
    pub duration_secs: u32,
    #[serde(default = "default_options")]
    pub options: Vec<SeedOptionConfig>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration(),
            options: default_options(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOptionConfig {
    pub name: String,
    #[serde(default)]
    pub votes: u32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub language: Language,
}

/// Diagnostic tracing and finished-round recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default)]
    pub record_results: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_level(),
            log_dir: default_log_dir(),
            record_results: false,
        }
    }
}

fn default_duration() -> u32 {
    DEFAULT_TIMER_DURATION
}
fn default_options() -> Vec<SeedOptionConfig> {
    default_seed()
        .into_iter()
        .map(|o| SeedOptionConfig {
            name: o.name,
            votes: o.votes,
            color: o.color,
        })
        .collect()
}
fn default_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "~/.local/share/pollboard/logs".to_string()
}
