//! Page renderers, one per resource.
//!
//! Each renderer maps one typed document to an HTML fragment destined for
//! the page container. Renderers never fail: when the document is absent or
//! its expected top-level collection is missing they return a single
//! explanatory placeholder instead.
//!
//! # Submodules
//!
//! - [`news`]: month-grouped article cards with filter state
//! - [`endorsements`]: score cards, per-candidate sections, holdouts
//! - [`timeline`]: ordered, party-marked events
//! - [`polls`]: race ratings and per-poll bar charts
//! - [`watchlist`]: countdown, likelihood meters, declined list

pub mod endorsements;
pub mod news;
pub mod polls;
pub mod timeline;
pub mod watchlist;

use crate::utils::{escape_html, slugify};

/// A single explanatory message in place of a section's content.
pub fn placeholder(message: &str) -> String {
    format!("<p class=\"placeholder\">{}</p>\n", escape_html(message))
}

/// ` id="<prefix>-<slug>"` for a record carrying its own id, else empty.
pub(crate) fn anchor_attr(prefix: &str, id: Option<&str>) -> String {
    match id.map(slugify).filter(|s| !s.is_empty()) {
        Some(slug) => format!(" id=\"{prefix}-{slug}\""),
        None => String::new(),
    }
}

/// Percentages print without a trailing `.0` when whole.
pub(crate) fn fmt_pct(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{pct:.0}")
    } else {
        format!("{pct}")
    }
}

/// `<p class="analysis">` for optional free text; empty when absent or blank.
pub(crate) fn analysis_paragraph(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => format!("<p class=\"analysis\">{}</p>\n", escape_html(t)),
        _ => String::new(),
    }
}
