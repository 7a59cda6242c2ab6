//! Collaborator seams. Each external service sits behind one narrow async trait
//! so composition, enrichment and speech can run against fakes.

use crate::error::{GenerationError, SearchError, SynthesisError};

/// Result-type filter for media search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Playlist,
    Video,
}

impl MediaKind {
    /// YouTube Data API `type` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Playlist => "playlist",
            MediaKind::Video => "video",
        }
    }

    /// Public link for a resolved identifier.
    pub fn link(&self, id: &str) -> String {
        match self {
            MediaKind::Playlist => format!("https://www.youtube.com/playlist?list={}", id),
            MediaKind::Video => format!("https://www.youtube.com/watch?v={}", id),
        }
    }
}

/// Generation collaborator: prompt in, completion text out.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Search collaborator: returns the identifier of the top hit, if any.
#[async_trait::async_trait]
pub trait MediaSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        limit: u32,
    ) -> Result<Option<String>, SearchError>;
}

/// Speech-synthesis collaborator: text and language tag in, encoded audio (MP3) out.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SynthesisError>;
}
