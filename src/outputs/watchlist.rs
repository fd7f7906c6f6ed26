//! Watchlist page: prospective candidates still weighing a run, and those
//! who have ruled one out.

use crate::countdown::{self, Remaining};
use crate::models::{DeclinedEntry, WatchlistData, WatchlistEntry};
use crate::outputs::{fmt_pct, placeholder};
use crate::utils::escape_html;
use tracing::{debug, warn};

pub const UNAVAILABLE: &str = "Unable to load the watchlist right now.";

const WATCHING_ANALYSIS: &str = "None of the figures above has filed a qualifying petition. \
Likelihood scores reflect public statements, fundraising activity, and reporting, and are revised \
as the filing deadline approaches.";

const DECLINED_ANALYSIS: &str = "These figures have publicly ruled out a 2026 run for governor. \
Several remain influential, and their endorsements could still shape the primary field.";

/// Verbal band for a 0-100 likelihood score.
pub fn likelihood_label(score: f64) -> &'static str {
    if score >= 50.0 {
        "Moderate"
    } else if score >= 25.0 {
        "Low"
    } else {
        "Very Low"
    }
}

/// Render the watchlist. `countdown` is the current countdown state, or
/// `None` to omit the countdown block entirely.
pub fn render_watchlist(data: Option<&WatchlistData>, countdown: Option<Remaining>) -> String {
    let Some((data, watching)) = data.and_then(|d| Some((d, d.watching.as_deref()?))) else {
        warn!("Watchlist data missing `watching`; rendering placeholder");
        return placeholder(UNAVAILABLE);
    };
    let declined = data.declined.as_deref().unwrap_or_default();

    let mut html = String::new();
    if let Some(state) = countdown {
        html.push_str(&format!(
            "<div class=\"countdown\" id=\"countdown\">{}</div>\n",
            countdown::render(state)
        ));
    }

    if !watching.is_empty() {
        html.push_str("<section class=\"watching\">\n<h2>Still Watching</h2>\n<div class=\"watch-grid\">\n");
        for entry in watching {
            html.push_str(&watching_card(entry));
        }
        html.push_str("</div>\n");
        html.push_str(&format!("<p class=\"analysis\">{WATCHING_ANALYSIS}</p>\n"));
        html.push_str("</section>\n");
    }

    if !declined.is_empty() {
        html.push_str("<section class=\"declined\">\n<h2>Declined to Run</h2>\n<div class=\"watch-grid\">\n");
        for entry in declined {
            html.push_str(&declined_card(entry));
        }
        html.push_str("</div>\n");
        html.push_str(&format!("<p class=\"analysis\">{DECLINED_ANALYSIS}</p>\n"));
        html.push_str("</section>\n");
    }

    if watching.is_empty() && declined.is_empty() {
        html.push_str("<p class=\"empty-state\">No one is on the watchlist right now.</p>\n");
    }

    debug!(
        watching = watching.len(),
        declined = declined.len(),
        countdown = countdown.is_some(),
        "Rendered watchlist"
    );
    html
}

fn watching_card(entry: &WatchlistEntry) -> String {
    let score = entry.likelihood.clamp(0.0, 100.0);
    format!(
        "<div class=\"watch-card\" style=\"border-left-color: {}\">\
         <div class=\"watch-name\">{}</div>\
         <div class=\"watch-role\">{}</div>\
         <div class=\"watch-status\">{}</div>\
         <div class=\"likelihood\"><div class=\"likelihood-label\">Likelihood: {}</div>\
         <div class=\"meter\"><div class=\"meter-fill\" style=\"width: {}%\"></div></div></div>\
         <p class=\"watch-detail\">{}</p></div>\n",
        entry.party.color(),
        escape_html(&entry.name),
        escape_html(&entry.role),
        escape_html(&entry.status),
        likelihood_label(score),
        fmt_pct(score),
        escape_html(&entry.detail)
    )
}

fn declined_card(entry: &DeclinedEntry) -> String {
    format!(
        "<div class=\"watch-card declined\" style=\"border-left-color: {}\">\
         <div class=\"watch-name\">{}</div>\
         <div class=\"watch-role\">{}</div>\
         <div class=\"watch-status\">{}</div>\
         <p class=\"watch-detail\">{}</p></div>\n",
        entry.party.color(),
        escape_html(&entry.name),
        escape_html(&entry.role),
        escape_html(&entry.status),
        escape_html(&entry.detail)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Party;

    fn sample() -> WatchlistData {
        serde_json::from_str(
            r#"{
                "deadline": "2026-04-02T12:00:00-05:00",
                "watching": [
                    {"name": "Glenn Jacobs", "role": "Knox County Mayor", "party": "rep",
                     "status": "Exploring", "likelihood": 60, "detail": "Has not ruled it out."}
                ],
                "declined": [
                    {"name": "Tim Burchett", "role": "U.S. Representative", "party": "rep",
                     "status": "Declined", "detail": "Staying in Congress."}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_likelihood_thresholds() {
        assert_eq!(likelihood_label(60.0), "Moderate");
        assert_eq!(likelihood_label(30.0), "Low");
        assert_eq!(likelihood_label(10.0), "Very Low");
        assert_eq!(likelihood_label(50.0), "Moderate");
        assert_eq!(likelihood_label(25.0), "Low");
        assert_eq!(likelihood_label(24.9), "Very Low");
    }

    #[test]
    fn test_missing_data_renders_placeholder() {
        assert!(render_watchlist(None, None).contains(UNAVAILABLE));
        assert!(render_watchlist(Some(&WatchlistData::default()), None).contains(UNAVAILABLE));
    }

    #[test]
    fn test_full_render() {
        let html = render_watchlist(
            Some(&sample()),
            Some(Remaining::Left {
                days: 3,
                hours: 2,
                minutes: 1,
            }),
        );
        assert!(html.contains("id=\"countdown\""));
        assert!(html.contains("Likelihood: Moderate"));
        assert!(html.contains("width: 60%"));
        assert!(html.contains("Staying in Congress."));
        assert!(html.contains(WATCHING_ANALYSIS));
        assert!(html.contains(DECLINED_ANALYSIS));
        assert!(html.contains(Party::Rep.color()));
    }

    #[test]
    fn test_countdown_optional_and_passed() {
        let html = render_watchlist(Some(&sample()), None);
        assert!(!html.contains("id=\"countdown\""));

        let html = render_watchlist(Some(&sample()), Some(Remaining::Passed));
        assert!(html.contains(countdown::PASSED_MESSAGE));
    }

    #[test]
    fn test_declined_section_optional() {
        let mut data = sample();
        data.declined = None;
        let html = render_watchlist(Some(&data), None);
        assert!(!html.contains("Declined to Run"));
        assert!(!html.contains(DECLINED_ANALYSIS));
        assert!(html.contains(WATCHING_ANALYSIS));
    }

    #[test]
    fn test_meter_is_clamped() {
        let entry = WatchlistEntry {
            likelihood: 140.0,
            ..Default::default()
        };
        assert!(watching_card(&entry).contains("width: 100%"));
        let entry = WatchlistEntry {
            likelihood: -5.0,
            ..Default::default()
        };
        assert!(watching_card(&entry).contains("width: 0%"));
    }

    #[test]
    fn test_fractional_likelihood_decodes_and_renders() {
        let data: WatchlistData = serde_json::from_str(
            r#"{"watching": [{"name": "X", "likelihood": 35.5}, {"name": "Y", "likelihood": 49.9}]}"#,
        )
        .unwrap();
        let html = render_watchlist(Some(&data), None);
        assert!(html.contains("width: 35.5%"));
        assert!(html.contains("width: 49.9%"));
        assert_eq!(html.matches("Likelihood: Low").count(), 2);
    }
}
