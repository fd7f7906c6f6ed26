//! News page: articles grouped by month behind a row of filter buttons.
//!
//! Visibility is derived, never mutated: a [`NewsFilter`] is the whole
//! filter state and [`NewsFilter::matches`] is the only rule deciding
//! whether a card shows. Every card is always emitted; non-matching cards
//! carry the `hidden` attribute, and a month group whose cards are all
//! hidden is hidden too.
//!
//! The page is static, so each filter button links to the pre-rendered
//! variant of the page for that filter (see [`NewsFilter::file_name`]).

use crate::format::{format_date_short, format_month};
use crate::models::{Article, NewsData, Party};
use crate::outputs::{anchor_attr, placeholder};
use crate::utils::{escape_html, slugify};
use itertools::Itertools;
use tracing::{debug, warn};

pub const UNAVAILABLE: &str = "Unable to load news right now.";
pub const NO_ARTICLES: &str = "No articles yet.";
pub const NO_MATCHES: &str = "No articles match this filter.";

/// One filter button's worth of selection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NewsFilter {
    #[default]
    All,
    /// First-party content only.
    Tnfirefly,
    Rep,
    Dem,
    Finance,
    Policy,
}

impl NewsFilter {
    /// Button order.
    pub const ALL: [NewsFilter; 6] = [
        NewsFilter::All,
        NewsFilter::Tnfirefly,
        NewsFilter::Rep,
        NewsFilter::Dem,
        NewsFilter::Finance,
        NewsFilter::Policy,
    ];

    pub fn key(self) -> &'static str {
        match self {
            NewsFilter::All => "all",
            NewsFilter::Tnfirefly => "tnfirefly",
            NewsFilter::Rep => "rep",
            NewsFilter::Dem => "dem",
            NewsFilter::Finance => "finance",
            NewsFilter::Policy => "policy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NewsFilter::All => "All",
            NewsFilter::Tnfirefly => "TNFirefly Originals",
            NewsFilter::Rep => "Republican",
            NewsFilter::Dem => "Democrat",
            NewsFilter::Finance => "Finance",
            NewsFilter::Policy => "Policy",
        }
    }

    /// Output file holding the page rendered under this filter.
    pub fn file_name(self) -> String {
        match self {
            NewsFilter::All => "news.html".to_string(),
            other => format!("news-{}.html", other.key()),
        }
    }

    /// Whether `article` is visible under this filter.
    ///
    /// Party filters compare the exact party tag; tag filters look for the
    /// key anywhere in the space-joined tag string.
    pub fn matches(self, article: &Article) -> bool {
        match self {
            NewsFilter::All => true,
            NewsFilter::Tnfirefly => article.tnfirefly,
            NewsFilter::Rep => article.party == Party::Rep,
            NewsFilter::Dem => article.party == Party::Dem,
            NewsFilter::Finance | NewsFilter::Policy => article.joined_tags().contains(self.key()),
        }
    }
}

/// Partition articles into month groups, ordered by each month's first
/// appearance in the input. Every article lands in exactly one group.
pub fn group_by_month(articles: &[Article]) -> Vec<(String, Vec<&Article>)> {
    let months: Vec<String> = articles
        .iter()
        .map(|a| format_month(&a.date))
        .unique()
        .collect();

    months
        .into_iter()
        .map(|month| {
            let items = articles
                .iter()
                .filter(|a| format_month(&a.date) == month)
                .collect();
            (month, items)
        })
        .collect()
}

/// Articles visible under `filter`, in input order.
pub fn visible_articles(articles: &[Article], filter: NewsFilter) -> Vec<&Article> {
    articles.iter().filter(|a| filter.matches(a)).collect()
}

/// Render the news fragment under the given filter selection.
pub fn render_news(data: Option<&NewsData>, filter: NewsFilter) -> String {
    let Some(articles) = data.and_then(|d| d.articles.as_deref()) else {
        warn!("News data missing `articles`; rendering placeholder");
        return placeholder(UNAVAILABLE);
    };

    let mut html = filter_bar(filter);
    let groups = group_by_month(articles);
    let mut shown = 0usize;

    for (month, items) in &groups {
        let visible = items.iter().filter(|a| filter.matches(a)).count();
        shown += visible;
        let heading = if month.is_empty() { "Undated" } else { month.as_str() };
        let hidden = if visible == 0 { " hidden" } else { "" };

        html.push_str(&format!(
            "<section class=\"month-group\" id=\"month-{}\"{hidden}>\n<h2 class=\"month-heading\">{}</h2>\n",
            slugify(heading),
            escape_html(heading)
        ));
        for article in items {
            html.push_str(&card(article, filter.matches(article)));
        }
        html.push_str("</section>\n");
    }

    if articles.is_empty() {
        html.push_str(&format!("<p class=\"empty-state\">{NO_ARTICLES}</p>\n"));
    } else if shown == 0 {
        html.push_str(&format!("<p class=\"empty-state\">{NO_MATCHES}</p>\n"));
    }

    debug!(
        filter = filter.key(),
        total = articles.len(),
        shown,
        groups = groups.len(),
        "Rendered news"
    );
    html
}

fn filter_bar(active: NewsFilter) -> String {
    let mut html = String::from("<nav class=\"news-filters\">\n");
    for f in NewsFilter::ALL {
        let class = if f == active { "filter-btn active" } else { "filter-btn" };
        html.push_str(&format!(
            "<a class=\"{class}\" href=\"{}\" data-filter=\"{}\">{}</a>\n",
            f.file_name(),
            f.key(),
            f.label()
        ));
    }
    html.push_str("</nav>\n");
    html
}

fn card(article: &Article, visible: bool) -> String {
    let mut classes = String::from("news-card");
    if article.featured {
        classes.push_str(" featured");
    }
    let hidden = if visible { "" } else { " hidden" };

    let mut html = format!(
        "<article class=\"{classes}\"{} style=\"border-left-color: {}\" data-party=\"{}\" data-tags=\"{}\" data-tnfirefly=\"{}\"{hidden}>\n",
        anchor_attr("article", article.id.as_deref()),
        article.party.color(),
        article.party.tag(),
        escape_html(&article.joined_tags()),
        article.tnfirefly
    );

    html.push_str(&format!(
        "<div class=\"news-meta\"><span class=\"news-date\">{}</span> · <span class=\"news-source\">{}</span>",
        escape_html(&format_date_short(&article.date)),
        escape_html(&article.source)
    ));
    if article.tnfirefly {
        html.push_str(" <span class=\"badge badge-origin\">TNFirefly</span>");
    }
    if article.featured {
        html.push_str(" <span class=\"badge badge-featured\">Featured</span>");
    }
    html.push_str("</div>\n");

    let title = escape_html(&article.title);
    match article.url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => html.push_str(&format!(
            "<h3 class=\"news-title\"><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{title}</a></h3>\n",
            escape_html(url)
        )),
        None => html.push_str(&format!("<h3 class=\"news-title\">{title}</h3>\n")),
    }

    if !article.summary.is_empty() {
        html.push_str(&format!(
            "<p class=\"news-summary\">{}</p>\n",
            escape_html(&article.summary)
        ));
    }

    if let Some(candidate) = article.candidate.as_deref().filter(|c| !c.is_empty()) {
        html.push_str(&format!(
            "<div class=\"news-candidate\">{}</div>\n",
            escape_html(candidate)
        ));
    }

    let tags = article.tags.as_deref().unwrap_or_default();
    if !tags.is_empty() {
        html.push_str("<div class=\"news-tags\">");
        for tag in tags {
            html.push_str(&format!("<span class=\"tag\">{}</span>", escape_html(tag)));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</article>\n");
    html
}
