//! Timeline page: an ordered list of dated, party-marked events.

use crate::format::format_date;
use crate::models::TimelineData;
use crate::outputs::placeholder;
use crate::utils::escape_html;
use tracing::{debug, warn};

pub const UNAVAILABLE: &str = "Unable to load the timeline right now.";

pub fn render_timeline(data: Option<&TimelineData>) -> String {
    let Some(events) = data.and_then(|d| d.events.as_deref()) else {
        warn!("Timeline data missing `events`; rendering placeholder");
        return placeholder(UNAVAILABLE);
    };
    if events.is_empty() {
        return "<p class=\"empty-state\">No events on the calendar yet.</p>\n".to_string();
    }

    let mut html = String::from("<ol class=\"timeline\">\n");
    for event in events {
        let mut classes = String::from("timeline-item");
        if event.future {
            classes.push_str(" future");
        }
        if event.major {
            classes.push_str(" major");
        }
        let badge = if event.future {
            " <span class=\"badge badge-upcoming\">UPCOMING</span>"
        } else {
            ""
        };

        html.push_str(&format!(
            "<li class=\"{classes}\" data-party=\"{}\">\
             <span class=\"timeline-marker\" style=\"background: {}\"></span>\
             <div class=\"timeline-content\">\
             <div class=\"timeline-date\">{}{badge}</div>\
             <h3 class=\"timeline-title\">{}</h3>\
             <p class=\"timeline-description\">{}</p>\
             </div></li>\n",
            event.party.tag(),
            event.party.color(),
            escape_html(&format_date(&event.date)),
            escape_html(&event.title),
            escape_html(&event.description)
        ));
    }
    html.push_str("</ol>\n");

    debug!(events = events.len(), "Rendered timeline");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Party, TimelineEvent};
    use scraper::{Html, Selector};

    fn data() -> TimelineData {
        TimelineData {
            lastUpdated: Some("2026-02-01".into()),
            events: Some(vec![
                TimelineEvent {
                    date: "2025-08-06".into(),
                    title: "Blackburn announces".into(),
                    description: "Senator enters the race.".into(),
                    party: Party::Rep,
                    future: false,
                    major: true,
                },
                TimelineEvent {
                    date: "2026-08-06".into(),
                    title: "Primary election".into(),
                    description: "Statewide primaries.".into(),
                    party: Party::General,
                    future: true,
                    major: true,
                },
            ]),
        }
    }

    #[test]
    fn test_missing_data_renders_placeholder() {
        assert!(render_timeline(None).contains(UNAVAILABLE));
        assert!(render_timeline(Some(&TimelineData::default())).contains(UNAVAILABLE));
    }

    #[test]
    fn test_order_and_flags() {
        let html = render_timeline(Some(&data()));
        let doc = Html::parse_fragment(&html);
        let items: Vec<_> = doc
            .select(&Selector::parse("ol.timeline > li").unwrap())
            .collect();
        assert_eq!(items.len(), 2);

        let classes = |i: usize| -> Vec<String> {
            items[i]
                .value()
                .attr("class")
                .unwrap_or_default()
                .split_whitespace()
                .map(String::from)
                .collect()
        };
        assert_eq!(classes(0), vec!["timeline-item", "major"]);
        assert_eq!(classes(1), vec!["timeline-item", "future", "major"]);
        assert!(!items[0].html().contains("UPCOMING"));
        assert!(items[0].html().contains("August 6, 2025"));
        assert!(items[0].html().contains(Party::Rep.color()));

        assert!(items[1].html().contains("UPCOMING"));
    }

    #[test]
    fn test_empty_events() {
        let data = TimelineData {
            lastUpdated: None,
            events: Some(vec![]),
        };
        assert!(render_timeline(Some(&data)).contains("No events"));
    }
}
