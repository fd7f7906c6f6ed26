//! Page initialization: resolve a page token, fetch its resource, render,
//! and wrap the fragment in the site's container document.
//!
//! # Flow
//!
//! 1. [`PageKind::from_token`] maps the token to a page (unknown tokens are
//!    logged and the run aborts)
//! 2. [`loading_pages`] produces the loading placeholder, written before the
//!    fetch starts
//! 3. [`initialize`] fetches and decodes the resource and runs the page's
//!    renderer; on success the last-updated label is filled in
//! 4. [`write_pages`] puts every produced document on disk
//!
//! A failed fetch or a malformed document replaces the loading placeholder
//! with an explicit error state. Nothing here returns an error to the caller
//! except file output.

use crate::api::{self, ResourceSource};
use crate::config::Settings;
use crate::countdown::{self, Remaining};
use crate::error::FetchError;
use crate::format::format_date;
use crate::models::{EndorsementsData, NewsData, PollsData, Resource, TimelineData, WatchlistData};
use crate::outputs::endorsements::render_endorsements;
use crate::outputs::news::{NewsFilter, render_news};
use crate::outputs::placeholder;
use crate::outputs::polls::render_polls;
use crate::outputs::timeline::render_timeline;
use crate::outputs::watchlist::render_watchlist;
use crate::utils::escape_html;
use chrono::{DateTime, Local, Utc};
use std::error::Error;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{error, info, instrument, warn};

pub const LOADING: &str = "Loading…";
pub const FETCH_FAILED: &str = "Unable to load data right now. Reload the page to try again.";
pub const MALFORMED: &str =
    "The data for this page could not be read. Reload the page later to try again.";

/// The five page types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    News,
    Endorsements,
    Timeline,
    Polls,
    Watchlist,
}

impl PageKind {
    pub const ALL: [PageKind; 5] = [
        PageKind::News,
        PageKind::Endorsements,
        PageKind::Timeline,
        PageKind::Polls,
        PageKind::Watchlist,
    ];

    /// Look up a page by its token; `None` for anything unrecognized.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.resource().eq_ignore_ascii_case(token.trim()))
    }

    /// Resource name fetched for this page (also its token).
    pub fn resource(self) -> &'static str {
        match self {
            PageKind::News => "news",
            PageKind::Endorsements => "endorsements",
            PageKind::Timeline => "timeline",
            PageKind::Polls => "polls",
            PageKind::Watchlist => "watchlist",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PageKind::News => "News",
            PageKind::Endorsements => "Endorsements",
            PageKind::Timeline => "Timeline",
            PageKind::Polls => "Polls",
            PageKind::Watchlist => "Watchlist",
        }
    }

    /// Primary output file, the one navigation links point at.
    pub fn file_name(self) -> String {
        format!("{}.html", self.resource())
    }

    /// Every output file this page produces. The news page has one per filter.
    pub fn file_names(self) -> Vec<String> {
        match self {
            PageKind::News => NewsFilter::ALL.iter().map(|f| f.file_name()).collect(),
            other => vec![other.file_name()],
        }
    }
}

/// One finished HTML document awaiting output.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub file_name: String,
    pub html: String,
}

/// Decoded data for whichever page ran.
#[derive(Debug)]
pub enum PageData {
    News(NewsData),
    Endorsements(EndorsementsData),
    Timeline(TimelineData),
    Polls(PollsData),
    Watchlist(WatchlistData),
}

impl PageData {
    fn decode(kind: PageKind, value: serde_json::Value) -> Result<Self, FetchError> {
        let resource = kind.resource();
        Ok(match kind {
            PageKind::News => PageData::News(api::decode(resource, value)?),
            PageKind::Endorsements => PageData::Endorsements(api::decode(resource, value)?),
            PageKind::Timeline => PageData::Timeline(api::decode(resource, value)?),
            PageKind::Polls => PageData::Polls(api::decode(resource, value)?),
            PageKind::Watchlist => PageData::Watchlist(api::decode(resource, value)?),
        })
    }

    pub fn kind(&self) -> PageKind {
        match self {
            PageData::News(_) => PageKind::News,
            PageData::Endorsements(_) => PageKind::Endorsements,
            PageData::Timeline(_) => PageKind::Timeline,
            PageData::Polls(_) => PageKind::Polls,
            PageData::Watchlist(_) => PageKind::Watchlist,
        }
    }

    fn resource(&self) -> &dyn Resource {
        match self {
            PageData::News(d) => d,
            PageData::Endorsements(d) => d,
            PageData::Timeline(d) => d,
            PageData::Polls(d) => d,
            PageData::Watchlist(d) => d,
        }
    }

    /// Countdown deadline: the watchlist document's own, else the configured one.
    pub fn deadline(&self, settings: &Settings) -> DateTime<Utc> {
        let own = match self {
            PageData::Watchlist(w) => w.deadline.as_deref(),
            _ => None,
        };
        match own.map(|s| (s, countdown::parse_deadline(s))) {
            Some((_, Some(dt))) => dt,
            Some((raw, None)) => {
                warn!(deadline = %raw, "Unparseable deadline in watchlist data; using configured deadline");
                settings.deadline
            }
            None => settings.deadline,
        }
    }

    /// Render every document for this page. `countdown` only affects the
    /// watchlist.
    pub fn render(&self, settings: &Settings, countdown: Option<Remaining>) -> Vec<RenderedPage> {
        let kind = self.kind();
        let label = last_updated_label(self.resource().last_updated());
        let doc = |file_name: String, fragment: String| RenderedPage {
            html: document(&settings.site_title, kind, &fragment, Some(&label)),
            file_name,
        };

        match self {
            PageData::News(d) => NewsFilter::ALL
                .into_iter()
                .map(|f| doc(f.file_name(), render_news(Some(d), f)))
                .collect(),
            PageData::Endorsements(d) => vec![doc(kind.file_name(), render_endorsements(Some(d)))],
            PageData::Timeline(d) => vec![doc(kind.file_name(), render_timeline(Some(d)))],
            PageData::Polls(d) => vec![doc(kind.file_name(), render_polls(Some(d)))],
            PageData::Watchlist(d) => vec![doc(kind.file_name(), render_watchlist(Some(d), countdown))],
        }
    }
}

/// Result of initializing one page.
#[derive(Debug)]
pub struct PageOutcome {
    pub pages: Vec<RenderedPage>,
    /// Present when the fetch and decode succeeded.
    pub data: Option<PageData>,
}

/// Loading-state documents for `kind`, shown until the fetch settles.
pub fn loading_pages(kind: PageKind, settings: &Settings) -> Vec<RenderedPage> {
    state_pages(kind, settings, LOADING)
}

fn state_pages(kind: PageKind, settings: &Settings, message: &str) -> Vec<RenderedPage> {
    kind.file_names()
        .into_iter()
        .map(|file_name| RenderedPage {
            html: document(&settings.site_title, kind, &placeholder(message), None),
            file_name,
        })
        .collect()
}

/// Fetch, decode and render `kind`.
#[instrument(level = "info", skip(source, settings), fields(resource = kind.resource()))]
pub async fn initialize<S: ResourceSource>(
    source: &S,
    kind: PageKind,
    settings: &Settings,
) -> PageOutcome {
    let Some(value) = api::fetch(source, kind.resource()).await else {
        return PageOutcome {
            pages: state_pages(kind, settings, FETCH_FAILED),
            data: None,
        };
    };

    let data = match PageData::decode(kind, value) {
        Ok(data) => data,
        Err(e) => {
            error!(error = %e, malformed = e.is_malformed(), "Rejected resource at decode");
            return PageOutcome {
                pages: state_pages(kind, settings, MALFORMED),
                data: None,
            };
        }
    };

    let countdown = match &data {
        PageData::Watchlist(_) => Some(countdown::remaining(data.deadline(settings), Utc::now())),
        _ => None,
    };
    let pages = data.render(settings, countdown);
    info!(documents = pages.len(), "Page rendered");
    PageOutcome {
        pages,
        data: Some(data),
    }
}

/// Rewrite the page's documents on every countdown tick.
///
/// Returns once the deadline has passed (after writing that state once) or
/// as soon as `shutdown` completes, whichever comes first. `shutdown` is
/// polled across writes, so a signal arriving mid-write is not lost.
#[instrument(level = "info", skip_all, fields(page = data.kind().resource(), ?period))]
pub async fn follow_countdown<F: Future>(
    data: &PageData,
    settings: &Settings,
    period: Duration,
    shutdown: F,
) -> Result<(), Box<dyn Error>> {
    let deadline = data.deadline(settings);
    let (ticker, mut rx) = countdown::spawn_ticker(deadline, period);
    info!(%deadline, "Following countdown");

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested; stopping countdown");
                ticker.cancel();
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    info!(finished = ticker.is_finished(), "Countdown ended");
                    break;
                }
                let state = *rx.borrow_and_update();
                write_pages(&settings.output_dir, &data.render(settings, Some(state))).await?;
            }
        }
    }
    Ok(())
}

/// Long-form date for the last-updated label, falling back to today.
pub fn last_updated_label(stamp: Option<&str>) -> String {
    match stamp.map(format_date).filter(|s| !s.is_empty()) {
        Some(date) => date,
        None => format_date(&Local::now().date_naive().to_string()),
    }
}

/// Wrap a page fragment in the container document.
pub fn document(site_title: &str, active: PageKind, fragment: &str, last_updated: Option<&str>) -> String {
    let title = escape_html(site_title);
    let mut html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} · {title}</title>\n<link rel=\"stylesheet\" href=\"style.css\">\n</head>\n<body>\n\
         <header class=\"site-header\"><h1>{title}</h1>\n<nav class=\"site-nav\">\n",
        active.title()
    );
    for kind in PageKind::ALL {
        let class = if kind == active { " class=\"active\"" } else { "" };
        html.push_str(&format!(
            "<a href=\"{}\"{class}>{}</a>\n",
            kind.file_name(),
            kind.title()
        ));
    }
    html.push_str("</nav>\n</header>\n<main id=\"content\">\n");
    html.push_str(fragment);
    html.push_str("</main>\n");
    if let Some(stamp) = last_updated {
        html.push_str(&format!(
            "<p id=\"last-updated\">Last updated: {}</p>\n",
            escape_html(stamp)
        ));
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Write documents into `output_dir`, replacing any previous contents.
#[instrument(level = "info", skip_all, fields(%output_dir, count = pages.len()))]
pub async fn write_pages(output_dir: &str, pages: &[RenderedPage]) -> Result<(), Box<dyn Error>> {
    for page in pages {
        let path = Path::new(output_dir).join(&page.file_name);
        if let Err(e) = fs::write(&path, &page.html).await {
            error!(path = %path.display(), error = %e, "Failed to write page");
            return Err(e.into());
        }
        info!(path = %path.display(), bytes = page.html.len(), "Wrote page");
    }
    Ok(())
}
