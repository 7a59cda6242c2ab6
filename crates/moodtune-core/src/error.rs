//! Error types for the Moodtune core.

use thiserror::Error;

/// Failure of the generation collaborator. Aborts the `/generate` request.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Gemini request: {0}")]
    Http(reqwest::Error),

    #[error("Gemini {0}: {1}")]
    Api(u16, String),

    #[error("Gemini response parse: {0}")]
    MalformedResponse(String),

    #[error("model returned an empty completion")]
    EmptyCompletion,
}

/// Failure of the search collaborator. Never surfaced to callers: enrichment
/// turns it into a per-line sentinel.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("YouTube request: {0}")]
    Http(reqwest::Error),

    #[error("YouTube {0}: {1}")]
    Api(u16, String),

    #[error("YouTube response parse: {0}")]
    MalformedResponse(String),
}

/// Failure of the speech path. Aborts the `/speak` request.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("No text to speak")]
    EmptyText,

    #[error("TTS request: {0}")]
    Http(reqwest::Error),

    #[error("TTS API error {0}: {1}")]
    Api(u16, String),

    #[error("TTS returned no audio")]
    EmptyAudio,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Request URLs may carry an API key or user text; transport errors drop the URL.
impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Http(e.without_url())
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::Http(e.without_url())
    }
}

impl From<reqwest::Error> for SynthesisError {
    fn from(e: reqwest::Error) -> Self {
        SynthesisError::Http(e.without_url())
    }
}

/// Startup configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config load: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Set {0} before running.")]
    MissingKey(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
