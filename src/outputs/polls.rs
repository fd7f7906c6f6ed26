//! Polls page: race ratings, then one card per poll with a horizontal bar
//! per candidate. A bar's width is the candidate's percentage verbatim.

use crate::format::format_date_short;
use crate::models::{Party, Poll, PollResult, PollsData, RaceRating};
use crate::outputs::{analysis_paragraph, anchor_attr, fmt_pct, placeholder};
use crate::utils::escape_html;
use tracing::{debug, warn};

pub const UNAVAILABLE: &str = "Unable to load polling data right now.";
pub const NO_POLLS: &str = "No public polls have been released for this race yet.";

const UNDECIDED_COLOR: &str = "#b8bcc4";

pub fn render_polls(data: Option<&PollsData>) -> String {
    let Some((data, polls)) = data.and_then(|d| Some((d, d.polls.as_deref()?))) else {
        warn!("Polling data missing `polls`; rendering placeholder");
        return placeholder(UNAVAILABLE);
    };

    let mut html = String::new();
    if let Some(ratings) = data.raceRatings.as_deref().filter(|r| !r.is_empty()) {
        html.push_str(&rating_cards(ratings));
    }

    if polls.is_empty() {
        html.push_str(&format!("<p class=\"empty-state\">{NO_POLLS}</p>\n"));
    } else {
        html.push_str("<div class=\"poll-list\">\n");
        for poll in polls {
            html.push_str(&poll_card(poll));
        }
        html.push_str("</div>\n");
    }

    html.push_str(&analysis_paragraph(data.analysis.as_deref()));

    debug!(polls = polls.len(), "Rendered polls");
    html
}

fn rating_cards(ratings: &[RaceRating]) -> String {
    let mut html = String::from("<section class=\"race-ratings\">\n<h2>Race Ratings</h2>\n<div class=\"rating-cards\">\n");
    for r in ratings {
        html.push_str(&format!(
            "<div class=\"rating-card\"><div class=\"rating-source\">{}</div><div class=\"rating-value\">{}</div></div>\n",
            escape_html(&r.source),
            escape_html(&r.rating)
        ));
    }
    html.push_str("</div>\n</section>\n");
    html
}

fn poll_meta(poll: &Poll) -> String {
    let mut parts = Vec::new();
    let date = format_date_short(&poll.date);
    if !date.is_empty() {
        parts.push(date);
    }
    if let Some(n) = poll.sampleSize {
        parts.push(format!("n={n}"));
    }
    if let Some(moe) = poll.margin {
        parts.push(format!("±{}%", fmt_pct(moe)));
    }
    parts.join(" · ")
}

fn poll_card(poll: &Poll) -> String {
    let mut html = format!(
        "<div class=\"poll-card\"{}>\n<div class=\"poll-header\"><h3>{}</h3><span class=\"poll-type\">{}</span></div>\n\
         <div class=\"poll-meta\">{}</div>\n",
        anchor_attr("poll", poll.id.as_deref()),
        escape_html(&poll.pollster),
        poll.kind.label(),
        escape_html(&poll_meta(poll))
    );
    for row in &poll.results {
        html.push_str(&result_row(row));
    }
    html.push_str("</div>\n");
    html
}

fn result_row(row: &PollResult) -> String {
    let (class, color) = if row.is_undecided() {
        ("poll-row undecided", UNDECIDED_COLOR)
    } else {
        ("poll-row", row.party.color())
    };
    let pct = fmt_pct(row.pct);
    let label = match row.party {
        Party::General => escape_html(&row.candidate),
        party => format!("{} ({})", escape_html(&row.candidate), party.label()),
    };
    format!(
        "<div class=\"{class}\"><span class=\"poll-candidate\">{label}</span>\
         <div class=\"poll-bar-track\"><div class=\"poll-bar\" style=\"width: {pct}%; background: {color}\"></div></div>\
         <span class=\"poll-pct\">{pct}%</span></div>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn sample() -> PollsData {
        serde_json::from_str(
            r#"{
                "raceRatings": [{"source": "Cook Political Report", "rating": "Solid R"}],
                "polls": [{
                    "pollster": "Beacon Center / TennSight", "date": "2026-01-20",
                    "sampleSize": 1200, "margin": 2.77, "type": "general",
                    "results": [
                        {"candidate": "A", "party": "rep", "pct": 45},
                        {"candidate": "B", "party": "dem", "pct": 40},
                        {"candidate": "Undecided", "pct": 15}
                    ]
                }],
                "analysis": "The frontrunner holds a steady lead."
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_missing_data_renders_placeholder() {
        assert!(render_polls(None).contains(UNAVAILABLE));
        assert!(render_polls(Some(&PollsData::default())).contains(UNAVAILABLE));
    }

    #[test]
    fn test_bar_widths_are_literal_percentages() {
        let html = render_polls(Some(&sample()));
        let doc = Html::parse_fragment(&html);
        let widths: Vec<String> = doc
            .select(&Selector::parse(".poll-bar").unwrap())
            .map(|el| {
                let style = el.value().attr("style").unwrap();
                style.split(';').next().unwrap().trim().to_string()
            })
            .collect();
        assert_eq!(widths, vec!["width: 45%", "width: 40%", "width: 15%"]);
    }

    #[test]
    fn test_undecided_row_styled_distinctly() {
        let html = render_polls(Some(&sample()));
        let doc = Html::parse_fragment(&html);
        let undecided: Vec<_> = doc
            .select(&Selector::parse(".poll-row.undecided").unwrap())
            .collect();
        assert_eq!(undecided.len(), 1);
        assert!(undecided[0].html().contains(UNDECIDED_COLOR));
    }

    #[test]
    fn test_ratings_meta_and_analysis() {
        let html = render_polls(Some(&sample()));
        assert!(html.contains("Solid R"));
        assert!(html.contains("Jan 20, 2026 · n=1200 · ±2.77%"));
        assert!(html.contains("General Election"));
        assert!(html.contains("class=\"analysis\""));
    }

    #[test]
    fn test_poll_card_anchor() {
        let poll = Poll {
            id: Some("tennsight-jan".into()),
            pollster: "TennSight".into(),
            ..Default::default()
        };
        assert!(poll_card(&poll).starts_with("<div class=\"poll-card\" id=\"poll-tennsight-jan\">"));
        assert!(poll_card(&Poll::default()).starts_with("<div class=\"poll-card\">"));
    }

    #[test]
    fn test_no_polls_empty_state() {
        let data = PollsData {
            polls: Some(vec![]),
            ..Default::default()
        };
        let html = render_polls(Some(&data));
        assert!(html.contains(NO_POLLS));
        assert!(!html.contains("Race Ratings"));
    }
}
