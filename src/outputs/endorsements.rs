//! Endorsements page.
//!
//! Layout, top to bottom: one score card per candidate plus a holdout
//! tally, a section per candidate (initials avatar, endorsement cards
//! grouped by type, optional analysis), then the holdouts.

use crate::models::{Candidate, Endorsement, EndorsementType, EndorsementsData, Holdout, Party};
use crate::outputs::{analysis_paragraph, placeholder};
use crate::utils::{escape_html, initials};
use tracing::{debug, warn};

pub const UNAVAILABLE: &str = "Unable to load endorsement data right now.";

pub fn render_endorsements(data: Option<&EndorsementsData>) -> String {
    let Some((data, candidates)) = data.and_then(|d| Some((d, d.candidates.as_deref()?))) else {
        warn!("Endorsement data missing `candidates`; rendering placeholder");
        return placeholder(UNAVAILABLE);
    };
    let endorsements = data.endorsements.as_deref().unwrap_or_default();
    let holdouts = data.holdouts.as_deref().unwrap_or_default();

    let mut html = score_cards(candidates, holdouts.len());

    for (key, candidate) in candidates {
        let theirs: Vec<&Endorsement> = endorsements
            .iter()
            .filter(|e| &e.candidate == key)
            .collect();
        html.push_str(&candidate_section(
            key,
            candidate,
            &theirs,
            data.analysis_for(key),
        ));
    }

    if !holdouts.is_empty() {
        html.push_str(&holdout_section(holdouts));
    }

    debug!(
        candidates = candidates.len(),
        endorsements = endorsements.len(),
        holdouts = holdouts.len(),
        "Rendered endorsements"
    );
    html
}

fn score_cards(candidates: &[(String, Candidate)], holdout_count: usize) -> String {
    let mut html = String::from("<div class=\"score-cards\">\n");
    for (key, c) in candidates {
        html.push_str(&format!(
            "<a class=\"score-card\" href=\"#candidate-{}\" style=\"border-top-color: {}\">\
             <div class=\"score-count\">{}</div>\
             <div class=\"score-name\">{}</div>\
             <div class=\"score-label\">{}</div></a>\n",
            escape_html(key),
            c.party.color(),
            escape_html(&c.count.to_string()),
            escape_html(&c.name),
            escape_html(&c.label)
        ));
    }
    html.push_str(&format!(
        "<a class=\"score-card score-holdouts\" href=\"#holdouts\">\
         <div class=\"score-count\">{holdout_count}</div>\
         <div class=\"score-name\">Holdouts</div>\
         <div class=\"score-label\">Not yet endorsed</div></a>\n"
    ));
    html.push_str("</div>\n");
    html
}

fn candidate_section(
    key: &str,
    candidate: &Candidate,
    endorsements: &[&Endorsement],
    analysis: Option<&str>,
) -> String {
    let color = candidate.party.color();
    let mut html = format!(
        "<section class=\"candidate-section\" id=\"candidate-{}\">\n\
         <header class=\"candidate-header\">\
         <div class=\"avatar\" style=\"background: {color}\">{}</div>\
         <div><h2>{}</h2><p class=\"candidate-meta\">{}</p></div></header>\n",
        escape_html(key),
        escape_html(&initials(&candidate.name)),
        escape_html(&candidate.name),
        escape_html(&candidate_meta(candidate))
    );

    if endorsements.is_empty() {
        html.push_str("<p class=\"empty-state\">No endorsements tracked yet.</p>\n");
    }

    for kind in EndorsementType::ORDER {
        let group: Vec<&&Endorsement> = endorsements.iter().filter(|e| e.kind == kind).collect();
        if group.is_empty() {
            continue;
        }
        html.push_str(&format!(
            "<h3 class=\"endorsement-group\">{} <span class=\"group-count\">({})</span></h3>\n\
             <div class=\"endorsement-grid\">\n",
            kind.heading(),
            group.len()
        ));
        for e in group {
            html.push_str(&endorsement_card(
                &e.name,
                &e.role,
                e.note.as_deref(),
                kind.tag(),
                color,
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str(&analysis_paragraph(analysis));
    html.push_str("</section>\n");
    html
}

fn candidate_meta(candidate: &Candidate) -> String {
    let party = match candidate.party.label() {
        "" => None,
        label => Some(format!("({label})")),
    };
    [
        party,
        Some(candidate.label.clone()).filter(|l| !l.is_empty()),
        Some(format!("{} endorsements", candidate.count)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ")
}

fn endorsement_card(name: &str, role: &str, note: Option<&str>, kind: &str, color: &str) -> String {
    let mut html = format!(
        "<div class=\"endorsement-card type-{kind}\" style=\"border-left-color: {color}\">\
         <div class=\"endorser-name\">{}</div><div class=\"endorser-role\">{}</div>",
        escape_html(name),
        escape_html(role)
    );
    if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
        html.push_str(&format!("<p class=\"endorser-note\">{}</p>", escape_html(note)));
    }
    html.push_str("</div>\n");
    html
}

fn holdout_section(holdouts: &[Holdout]) -> String {
    let mut html = String::from(
        "<section class=\"holdouts\" id=\"holdouts\">\n<h2>Notable Holdouts</h2>\n<div class=\"endorsement-grid\">\n",
    );
    for h in holdouts {
        html.push_str(&endorsement_card(
            &h.name,
            &h.role,
            h.note.as_deref(),
            "holdout",
            Party::General.color(),
        ));
    }
    html.push_str("</div>\n</section>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn sample() -> EndorsementsData {
        serde_json::from_str(
            r#"{
                "lastUpdated": "2026-02-14",
                "candidates": {
                    "blackburn": {"name": "Marsha Blackburn", "party": "rep", "count": "24+", "label": "Frontrunner"},
                    "green": {"name": "Jerri Green", "party": "dem", "count": 2, "label": "Democrat"}
                },
                "endorsements": [
                    {"candidate": "blackburn", "name": "Tennessee Farm Bureau PAC", "role": "PAC", "type": "org"},
                    {"candidate": "blackburn", "name": "Jane Doe", "role": "State Senator", "type": "elected", "note": "Announced at rally"},
                    {"candidate": "green", "name": "John Roe", "role": "Mayor", "type": "elected"}
                ],
                "holdouts": [
                    {"name": "Bill Lee", "role": "Governor", "note": "Term-limited"}
                ],
                "analysis": {"blackburn": "Dominant institutional support."}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_missing_data_renders_placeholder() {
        assert!(render_endorsements(None).contains(UNAVAILABLE));
        assert!(render_endorsements(Some(&EndorsementsData::default())).contains(UNAVAILABLE));
    }

    #[test]
    fn test_score_cards_include_holdout_count() {
        let html = render_endorsements(Some(&sample()));
        let doc = Html::parse_fragment(&html);
        let counts: Vec<String> = doc
            .select(&Selector::parse(".score-card .score-count").unwrap())
            .map(|el| el.text().collect())
            .collect();
        assert_eq!(counts, vec!["24+", "2", "1"]);
    }

    #[test]
    fn test_candidate_sections_group_by_type_in_order() {
        let html = render_endorsements(Some(&sample()));
        let doc = Html::parse_fragment(&html);
        let section = doc
            .select(&Selector::parse("#candidate-blackburn").unwrap())
            .next()
            .unwrap();
        let cards: Vec<String> = section
            .select(&Selector::parse(".endorsement-card .endorser-name").unwrap())
            .map(|el| el.text().collect())
            .collect();
        // elected before org regardless of input order
        assert_eq!(cards, vec!["Jane Doe", "Tennessee Farm Bureau PAC"]);

        let avatar: String = section
            .select(&Selector::parse(".avatar").unwrap())
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(avatar, "MB");
        assert!(section.html().contains("Dominant institutional support."));
        assert!(section.html().contains("Announced at rally"));
    }

    #[test]
    fn test_analysis_only_where_provided() {
        let html = render_endorsements(Some(&sample()));
        let doc = Html::parse_fragment(&html);
        let green = doc
            .select(&Selector::parse("#candidate-green").unwrap())
            .next()
            .unwrap();
        assert!(!green.html().contains("class=\"analysis\""));
    }

    #[test]
    fn test_holdouts_section_optional() {
        let html = render_endorsements(Some(&sample()));
        assert!(html.contains("id=\"holdouts\""));
        assert!(html.contains("Term-limited"));

        let mut data = sample();
        data.holdouts = None;
        let html = render_endorsements(Some(&data));
        assert!(!html.contains("<section class=\"holdouts\""));
        assert!(html.contains("<div class=\"score-count\">0</div>"));
    }

    #[test]
    fn test_candidate_without_endorsements() {
        let mut data = sample();
        data.endorsements = None;
        let html = render_endorsements(Some(&data));
        assert_eq!(html.matches("No endorsements tracked yet.").count(), 2);
    }
}
