//! Link Enrichment Pipeline: rewrites every list-item line of a reply as
//! `- <query> 🎵 <link>`, resolving the link through the search collaborator.
//!
//! Lookups never fail the reply: an empty search becomes `No result found` and a
//! collaborator error becomes `(link not available: ...)`, independently per line.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::ports::{MediaKind, MediaSearch};

/// Sentinel when neither a playlist nor a video matched.
pub const NO_RESULT: &str = "No result found";

pub const MUSIC_MARKER: &str = "🎵";
pub const MEDITATION_MARKER: &str = "🧘";
pub const MEDITATION_HEADER: &str = "🌿 Meditation & Yoga Recommendations:";

/// Fixed wellness searches appended for distress and sad-tone replies.
pub const MEDITATION_QUERIES: [&str; 4] = [
    "Guided Meditation for Stress Relief",
    "Yoga Asanas for Depression",
    "Meditation for Positive Energy",
    "Yoga Nidra for Relaxation",
];

/// Hyphen, en-dash, bullet.
const BULLETS: &[char] = &['-', '\u{2013}', '\u{2022}'];

static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("query filter pattern is valid"));

/// True when the trimmed line starts with a bullet marker.
pub fn is_list_item(line: &str) -> bool {
    line.trim().starts_with(BULLETS)
}

/// Search query for a list-item line: bullets and punctuation removed, trimmed.
/// `None` for non-list lines and for list lines with nothing searchable left.
pub fn playlist_query(line: &str) -> Option<String> {
    let raw = line.trim();
    if !raw.starts_with(BULLETS) {
        return None;
    }
    let name = raw.trim_start_matches(BULLETS).trim_start();
    let name = NON_WORD_RE.replace_all(name, "");
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Resolves playlist lines to media links.
#[derive(Clone)]
pub struct LinkEnricher {
    search: Arc<dyn MediaSearch>,
    max_results: u32,
    concurrency: usize,
}

impl LinkEnricher {
    pub fn new(search: Arc<dyn MediaSearch>) -> Self {
        Self {
            search,
            max_results: 1,
            concurrency: 1,
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Number of lookups in flight per reply. 1 keeps calls strictly sequential.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Link for a query, or a sentinel. Playlists take precedence over videos.
    pub async fn resolve(&self, query: &str) -> String {
        match self.find(query).await {
            Ok(Some(link)) => link,
            Ok(None) => NO_RESULT.to_string(),
            Err(e) => {
                warn!(query, error = %e, "media search failed, using sentinel");
                format!("(link not available: {})", e)
            }
        }
    }

    async fn find(&self, query: &str) -> Result<Option<String>, SearchError> {
        for kind in [MediaKind::Playlist, MediaKind::Video] {
            if let Some(id) = self.search.search(query, kind, self.max_results).await? {
                debug!(query, kind = kind.as_str(), id = %id, "media resolved");
                return Ok(Some(kind.link(&id)));
            }
        }
        Ok(None)
    }

    async fn enrich_line(&self, line: &str) -> String {
        match playlist_query(line) {
            Some(query) => {
                let link = self.resolve(&query).await;
                format!("- {} {} {}", query, MUSIC_MARKER, link)
            }
            None => line.to_string(),
        }
    }

    /// Rewrites list-item lines; every other line passes through untouched.
    /// Output order always matches input order, whatever the concurrency.
    pub async fn enrich(&self, body: &str) -> String {
        let lines: Vec<String> = stream::iter(body.lines().map(str::to_owned))
            .map(|line| async move { self.enrich_line(&line).await })
            .buffered(self.concurrency)
            .collect()
            .await;
        lines.join("\n")
    }

    /// Header plus one `- <query> 🧘 <link>` line per wellness query.
    pub async fn meditation_block(&self) -> String {
        let links: Vec<String> = stream::iter(MEDITATION_QUERIES.map(str::to_owned))
            .map(|query| async move {
                let link = self.resolve(&query).await;
                format!("- {} {} {}", query, MEDITATION_MARKER, link)
            })
            .buffered(self.concurrency)
            .collect()
            .await;
        format!("{}\n{}", MEDITATION_HEADER, links.join("\n"))
    }
}
