//! YouTube Data API v3 search: media search collaborator.

use std::time::Duration;

use serde::Deserialize;

use crate::error::SearchError;
use crate::ports::{MediaKind, MediaSearch};

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    playlist_id: Option<String>,
    video_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct YouTubeSearch {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl YouTubeSearch {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key: api_key.into().trim().to_string(),
            base_url: YOUTUBE_API_BASE.to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait::async_trait]
impl MediaSearch for YouTubeSearch {
    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        limit: u32,
    ) -> Result<Option<String>, SearchError> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(query, kind = kind.as_str(), "YouTube search.list");
        let limit = limit.to_string();

        let res = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("maxResults", limit.as_str()),
                ("type", kind.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(SearchError::Api(status.as_u16(), text));
        }

        let parsed: SearchListResponse =
            serde_json::from_str(&text).map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        let Some(first) = parsed.items.into_iter().next() else {
            return Ok(None);
        };
        let id = match kind {
            MediaKind::Playlist => first.id.playlist_id,
            MediaKind::Video => first.id.video_id,
        };
        id.map(Some).ok_or_else(|| {
            SearchError::MalformedResponse(format!("first {} result has no id", kind.as_str()))
        })
    }
}
