//! # Race Tracker
//!
//! Renders the JSON data feeds of a political race tracker (news,
//! endorsements, timeline, polls, and the candidate watchlist) into static
//! HTML pages.
//!
//! ## Usage
//!
//! ```sh
//! race_tracker --page news -o ./site
//! race_tracker --page watchlist --follow
//! ```
//!
//! ## Architecture
//!
//! One run renders one page:
//! 1. **Resolve**: settings from CLI, config file, and defaults; page token
//!    to page kind
//! 2. **Loading**: the page's documents are written with a loading placeholder
//! 3. **Fetch**: the page's single JSON resource is retrieved and decoded
//! 4. **Render**: the page renderer produces the final documents, or an error
//!    state when the fetch or decode failed
//! 5. **Follow** (watchlist only, optional): the countdown is recomputed every
//!    minute and the page rewritten until the deadline passes or Ctrl-C

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod countdown;
mod error;
mod format;
mod models;
mod outputs;
mod page;
mod utils;

use api::HttpSource;
use cli::Cli;
use config::Settings;
use page::{PageKind, follow_countdown, initialize, loading_pages, write_pages};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("race_tracker starting up");

    let args = Cli::parse();
    debug!(page = %args.page, ?args.output_dir, ?args.config, follow = args.follow, "Parsed CLI arguments");

    let settings = Settings::resolve(&args).await?;

    let Some(kind) = PageKind::from_token(&args.page) else {
        error!(page = %args.page, "Unknown page; expected one of news, endorsements, timeline, polls, watchlist");
        return Err(format!("unknown page {:?}", args.page).into());
    };

    // Early check: ensure output dir is writable
    if let Err(e) = ensure_writable_dir(&settings.output_dir).await {
        error!(
            path = %settings.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let source = match HttpSource::new(&settings.base_url) {
        Ok(source) => source,
        Err(e) => {
            error!(base_url = %settings.base_url, error = %e, "Invalid base URL");
            return Err(e.into());
        }
    };

    write_pages(&settings.output_dir, &loading_pages(kind, &settings)).await?;

    let outcome = initialize(&source, kind, &settings).await;
    write_pages(&settings.output_dir, &outcome.pages).await?;

    match outcome.data {
        Some(data) if args.follow && kind == PageKind::Watchlist => {
            info!("Following countdown; press Ctrl-C to stop");
            follow_countdown(&data, &settings, countdown::TICK, tokio::signal::ctrl_c()).await?;
        }
        Some(_) if args.follow => {
            warn!(page = kind.resource(), "--follow only applies to the watchlist; ignoring");
        }
        Some(_) => {}
        None => warn!(page = kind.resource(), "Page rendered in its error state"),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
