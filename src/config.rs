//! Runtime settings.
//!
//! Settings are layered, highest precedence first:
//! 1. CLI flags (and the environment variables clap binds to them)
//! 2. The optional YAML config file
//! 3. Built-in defaults
//!
//! ```yaml
//! base_url: https://cdn.jsdelivr.net/gh/LongDriveMarketing/tn-governor-race-2026@main/data
//! output_dir: ./site
//! deadline: 2026-04-02T12:00:00-05:00
//! site_title: Tennessee Governor Race 2026
//! ```

use crate::cli::Cli;
use crate::countdown::parse_deadline;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, info, instrument};

pub const DEFAULT_BASE_URL: &str =
    "https://cdn.jsdelivr.net/gh/LongDriveMarketing/tn-governor-race-2026@main/data";
pub const DEFAULT_OUTPUT_DIR: &str = "./site";
pub const DEFAULT_DEADLINE: &str = "2026-04-02T12:00:00-05:00";
pub const DEFAULT_SITE_TITLE: &str = "Tennessee Governor Race 2026";

/// Contents of `config.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub output_dir: Option<String>,
    pub deadline: Option<String>,
    pub site_title: Option<String>,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub output_dir: String,
    /// Countdown deadline unless the watchlist document supplies its own.
    pub deadline: DateTime<Utc>,
    pub site_title: String,
}

impl Settings {
    /// Resolve settings from the CLI, reading the config file it names.
    #[instrument(level = "info", skip_all, fields(config = ?cli.config))]
    pub async fn resolve(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let file = match &cli.config {
            Some(path) => {
                let text = tokio::fs::read_to_string(path).await?;
                info!(%path, "Loaded config file");
                FileConfig::from_yaml(&text)?
            }
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Apply precedence: CLI, then file, then defaults.
    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self, Box<dyn Error>> {
        let deadline_text = cli
            .deadline
            .clone()
            .or(file.deadline)
            .unwrap_or_else(|| DEFAULT_DEADLINE.to_string());
        let deadline = parse_deadline(&deadline_text)
            .ok_or_else(|| format!("invalid deadline {deadline_text:?}; expected RFC 3339 or YYYY-MM-DD"))?;

        let settings = Settings {
            base_url: cli
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            output_dir: cli
                .output_dir
                .clone()
                .or(file.output_dir)
                .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            deadline,
            site_title: file
                .site_title
                .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string()),
        };
        debug!(?settings, "Resolved settings");
        Ok(settings)
    }
}
