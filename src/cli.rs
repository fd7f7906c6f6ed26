//! Command-line interface definitions for the race tracker renderer.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most options can also be provided via environment variables or the YAML
//! config file; see [`crate::config`] for precedence.

use clap::Parser;

/// Command-line arguments for the race tracker renderer.
///
/// # Examples
///
/// ```sh
/// # Render the news page (all filter variants) into ./site
/// race_tracker --page news
///
/// # Render polls from a different data location
/// race_tracker -p polls --base-url https://example.com/data -o /var/www/race
///
/// # Keep the watchlist countdown fresh until Ctrl-C
/// race_tracker -p watchlist --follow
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page to render: news, endorsements, timeline, polls, or watchlist
    #[arg(short, long)]
    pub page: String,

    /// Output directory for rendered HTML (default: ./site)
    #[arg(short, long, env = "RACE_TRACKER_OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Base URL the JSON resources are served from
    #[arg(long, env = "RACE_TRACKER_BASE_URL")]
    pub base_url: Option<String>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Countdown deadline (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<String>,

    /// After rendering the watchlist, re-render its countdown every minute until Ctrl-C
    #[arg(long)]
    pub follow: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "race_tracker",
            "--page",
            "news",
            "--output-dir",
            "./out",
            "--base-url",
            "https://example.com/data",
        ]);

        assert_eq!(cli.page, "news");
        assert_eq!(cli.output_dir.as_deref(), Some("./out"));
        assert_eq!(cli.base_url.as_deref(), Some("https://example.com/data"));
        assert!(!cli.follow);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "race_tracker",
            "-p",
            "watchlist",
            "-c",
            "/etc/race.yaml",
            "--follow",
        ]);

        assert_eq!(cli.page, "watchlist");
        assert_eq!(cli.config.as_deref(), Some("/etc/race.yaml"));
        assert!(cli.follow);
    }

    #[test]
    fn test_page_is_required() {
        assert!(Cli::try_parse_from(["race_tracker"]).is_err());
    }
}
