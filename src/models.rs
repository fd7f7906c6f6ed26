//! Typed records for the race tracker's JSON resources.
//!
//! Each resource (`news`, `endorsements`, `timeline`, `polls`, `watchlist`)
//! has one top-level document type here. The top-level collection of every
//! document is an `Option` so that a payload missing its expected key still
//! decodes; the renderer for that page substitutes a placeholder instead.
//!
//! Field names follow the camelCase keys of the published JSON, hence the
//! `#[allow(non_snake_case)]` attributes on documents that carry them.
//!
//! Enumerated fields (party, endorsement type, poll type) accept unknown
//! values and map them onto a catch-all variant rather than rejecting the
//! whole payload.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;

/// Party affiliation tag used for color-coding throughout the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Rep,
    Dem,
    Ind,
    /// Unaffiliated or unknown.
    #[default]
    #[serde(other)]
    General,
}

impl Party {
    /// The wire tag for this party (`"rep"`, `"dem"`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            Party::Rep => "rep",
            Party::Dem => "dem",
            Party::Ind => "ind",
            Party::General => "general",
        }
    }

    /// Border/marker color for this party.
    pub fn color(self) -> &'static str {
        match self {
            Party::Rep => "#c0392b",
            Party::Dem => "#2166ac",
            Party::Ind => "#7b4fa0",
            Party::General => "#8a8f98",
        }
    }

    /// Short human label, e.g. `"R"` or `"D"`.
    pub fn label(self) -> &'static str {
        match self {
            Party::Rep => "R",
            Party::Dem => "D",
            Party::Ind => "I",
            Party::General => "",
        }
    }
}

/// Capability shared by every resource document.
pub trait Resource {
    /// The document's own `lastUpdated` stamp, when it carries one.
    fn last_updated(&self) -> Option<&str>;
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

/// `news.json`
#[allow(non_snake_case)]
#[derive(Debug, Default, Deserialize)]
pub struct NewsData {
    #[serde(default)]
    pub lastUpdated: Option<String>,
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
}

/// A single news item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub party: Party,
    /// Originally-authored (first-party) content rather than aggregated coverage.
    #[serde(default)]
    pub tnfirefly: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub candidate: Option<String>,
}

impl Article {
    /// All tags joined by a single space, the form filter matching runs against.
    pub fn joined_tags(&self) -> String {
        self.tags.as_deref().unwrap_or_default().join(" ")
    }
}

impl Resource for NewsData {
    fn last_updated(&self) -> Option<&str> {
        self.lastUpdated.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Endorsements
// ---------------------------------------------------------------------------

/// `endorsements.json`
#[allow(non_snake_case)]
#[derive(Debug, Default, Deserialize)]
pub struct EndorsementsData {
    #[serde(default)]
    pub lastUpdated: Option<String>,
    /// Candidates keyed by short key, in document order.
    #[serde(default, deserialize_with = "ordered_map_opt")]
    pub candidates: Option<Vec<(String, Candidate)>>,
    #[serde(default)]
    pub endorsements: Option<Vec<Endorsement>>,
    #[serde(default)]
    pub holdouts: Option<Vec<Holdout>>,
    /// Optional analysis paragraph per candidate key.
    #[serde(default, deserialize_with = "ordered_map_opt")]
    pub analysis: Option<Vec<(String, String)>>,
}

impl EndorsementsData {
    pub fn analysis_for(&self, key: &str) -> Option<&str> {
        self.analysis
            .as_deref()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, text)| text.as_str())
    }
}

impl Resource for EndorsementsData {
    fn last_updated(&self) -> Option<&str> {
        self.lastUpdated.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub party: Party,
    #[serde(default)]
    pub count: EndorsementCount,
    #[serde(default)]
    pub label: String,
}

/// Endorsement tally, published either as a number or as a display string
/// such as `"12+"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EndorsementCount {
    Number(u64),
    Text(String),
}

impl Default for EndorsementCount {
    fn default() -> Self {
        EndorsementCount::Number(0)
    }
}

impl fmt::Display for EndorsementCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndorsementCount::Number(n) => write!(f, "{n}"),
            EndorsementCount::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndorsementType {
    Elected,
    Org,
    Notable,
    #[default]
    #[serde(other)]
    Other,
}

impl EndorsementType {
    /// Display order of type groups inside a candidate section.
    pub const ORDER: [EndorsementType; 4] = [
        EndorsementType::Elected,
        EndorsementType::Org,
        EndorsementType::Notable,
        EndorsementType::Other,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            EndorsementType::Elected => "elected",
            EndorsementType::Org => "org",
            EndorsementType::Notable => "notable",
            EndorsementType::Other => "other",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            EndorsementType::Elected => "Elected Officials",
            EndorsementType::Org => "Organizations",
            EndorsementType::Notable => "Notable Figures",
            EndorsementType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Endorsement {
    /// Key of the endorsed candidate.
    #[serde(default)]
    pub candidate: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, rename = "type")]
    pub kind: EndorsementType,
    #[serde(default)]
    pub note: Option<String>,
}

/// A notable figure who has not endorsed anyone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Holdout {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// `timeline.json`
#[allow(non_snake_case)]
#[derive(Debug, Default, Deserialize)]
pub struct TimelineData {
    #[serde(default)]
    pub lastUpdated: Option<String>,
    #[serde(default)]
    pub events: Option<Vec<TimelineEvent>>,
}

impl Resource for TimelineData {
    fn last_updated(&self) -> Option<&str> {
        self.lastUpdated.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub party: Party,
    #[serde(default)]
    pub future: bool,
    #[serde(default)]
    pub major: bool,
}

// ---------------------------------------------------------------------------
// Polls
// ---------------------------------------------------------------------------

/// `polls.json`
#[allow(non_snake_case)]
#[derive(Debug, Default, Deserialize)]
pub struct PollsData {
    #[serde(default)]
    pub lastUpdated: Option<String>,
    #[serde(default)]
    pub raceRatings: Option<Vec<RaceRating>>,
    #[serde(default)]
    pub polls: Option<Vec<Poll>>,
    #[serde(default)]
    pub analysis: Option<String>,
}

impl Resource for PollsData {
    fn last_updated(&self) -> Option<&str> {
        self.lastUpdated.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaceRating {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub rating: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PollType {
    RepPrimary,
    DemPrimary,
    General,
    #[default]
    #[serde(other)]
    Other,
}

impl PollType {
    pub fn label(self) -> &'static str {
        match self {
            PollType::RepPrimary => "Republican Primary",
            PollType::DemPrimary => "Democratic Primary",
            PollType::General => "General Election",
            PollType::Other => "Poll",
        }
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Poll {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub pollster: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub sampleSize: Option<u64>,
    #[serde(default)]
    pub margin: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: PollType,
    #[serde(default)]
    pub results: Vec<PollResult>,
}

/// One candidate's share in a poll.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PollResult {
    #[serde(default)]
    pub candidate: String,
    #[serde(default)]
    pub party: Party,
    #[serde(default)]
    pub pct: f64,
}

impl PollResult {
    pub fn is_undecided(&self) -> bool {
        self.candidate.eq_ignore_ascii_case("undecided")
    }
}

// ---------------------------------------------------------------------------
// Watchlist
// ---------------------------------------------------------------------------

/// `watchlist.json`
#[allow(non_snake_case)]
#[derive(Debug, Default, Deserialize)]
pub struct WatchlistData {
    #[serde(default)]
    pub lastUpdated: Option<String>,
    /// Filing deadline driving the countdown, RFC 3339.
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub watching: Option<Vec<WatchlistEntry>>,
    #[serde(default)]
    pub declined: Option<Vec<DeclinedEntry>>,
}

impl Resource for WatchlistData {
    fn last_updated(&self) -> Option<&str> {
        self.lastUpdated.as_deref()
    }
}

/// A prospective candidate still considering a run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchlistEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub party: Party,
    #[serde(default)]
    pub status: String,
    /// 0-100, fractional scores allowed.
    #[serde(default)]
    pub likelihood: f64,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeclinedEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub party: Party,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Ordered maps
// ---------------------------------------------------------------------------

/// Deserialize a JSON object into `(key, value)` pairs, keeping document order.
fn ordered_map_opt<'de, D, T>(deserializer: D) -> Result<Option<Vec<(String, T)>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct OrderedMapVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<T> {
        type Value = Option<Vec<(String, T)>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a JSON object or null")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_map(self)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, T>()? {
                entries.push((key, value));
            }
            Ok(Some(entries))
        }
    }

    deserializer.deserialize_option(OrderedMapVisitor(PhantomData))
}
