//! Speech-synthesis collaborators.
//!
//! - [`TranslateTts`]: Google Translate's `translate_tts` endpoint (no key). Text is sent
//!   in chunks of at most 100 characters and the MP3 payloads are concatenated.
//! - [`OpenAiTts`]: any OpenAI-compatible `/audio/speech` API (OpenAI, OpenRouter, ...).

use std::time::Duration;

use crate::error::SynthesisError;
use crate::ports::SpeechSynthesizer;

pub const TRANSLATE_TTS_URL: &str = "https://translate.google.com/translate_tts";
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Longest chunk the translate endpoint accepts.
pub const TRANSLATE_CHUNK_CHARS: usize = 100;

fn http_client(timeout: Duration) -> Result<reqwest::Client, SynthesisError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

async fn audio_bytes(res: reqwest::Response) -> Result<Vec<u8>, SynthesisError> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(SynthesisError::Api(status.as_u16(), body));
    }
    Ok(res.bytes().await?.to_vec())
}

/// Splits on word boundaries into chunks of at most `max_chars` characters;
/// words longer than that are hard-split.
pub fn split_for_tts(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(max_chars) {
            let needed = if current.is_empty() { piece.len() } else { current_len + 1 + piece.len() };
            if needed > max_chars && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.extend(piece.iter());
            current_len += piece.len();
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Google Translate TTS.
#[derive(Debug, Clone)]
pub struct TranslateTts {
    url: String,
    client: reqwest::Client,
}

impl TranslateTts {
    pub fn new(timeout: Duration) -> Result<Self, SynthesisError> {
        Ok(Self {
            url: TRANSLATE_TTS_URL.to_string(),
            client: http_client(timeout)?,
        })
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for TranslateTts {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SynthesisError> {
        let chunks = split_for_tts(text, TRANSLATE_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyText);
        }
        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let res = self
                .client
                .get(&self.url)
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", lang),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                    ("client", "tw-ob"),
                ])
                .send()
                .await?;
            audio.extend(audio_bytes(res).await?);
        }
        Ok(audio)
    }
}

/// OpenAI-compatible TTS backend.
#[derive(Debug, Clone)]
pub struct OpenAiTts {
    /// Base URL without trailing slash (e.g. https://api.openai.com/v1).
    pub base_url: String,
    pub api_key: String,
    /// tts-1 (fast) or tts-1-hd.
    pub model: String,
    /// alloy, echo, fable, onyx, nova, shimmer, ...
    pub voice: String,
    client: reqwest::Client,
}

impl OpenAiTts {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        voice: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SynthesisError> {
        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            voice: voice.into(),
            client: http_client(timeout)?,
        })
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for OpenAiTts {
    /// The voice carries the language; `lang` is not sent.
    async fn synthesize(&self, text: &str, _lang: &str) -> Result<Vec<u8>, SynthesisError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SynthesisError::EmptyText);
        }
        let url = format!("{}/audio/speech", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "input": text,
            "voice": self.voice,
            "response_format": "mp3",
        });
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        audio_bytes(res).await
    }
}
