//! In-memory collaborators for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{GenerationError, SearchError, SynthesisError};
use crate::ports::{MediaKind, MediaSearch, SpeechSynthesizer, TextGenerator};

/// Returns a canned completion, or `Api(503, ..)` when none is set.
pub struct FakeGenerator {
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(r) => Ok(r.clone()),
            None => Err(GenerationError::Api(503, "quota exceeded".to_string())),
        }
    }
}

/// Search fake. Hits are keyed by `(query, kind)`; unknown queries find nothing.
#[derive(Default)]
pub struct FakeSearch {
    pub hits: HashMap<(String, MediaKind), String>,
    pub fail: bool,
    pub calls: Mutex<Vec<(String, MediaKind)>>,
}

impl FakeSearch {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_hit(mut self, query: &str, kind: MediaKind, id: &str) -> Self {
        self.hits.insert((query.to_string(), kind), id.to_string());
        self
    }

    pub fn recorded(&self) -> Vec<(String, MediaKind)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MediaSearch for FakeSearch {
    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        _limit: u32,
    ) -> Result<Option<String>, SearchError> {
        self.calls.lock().unwrap().push((query.to_string(), kind));
        if self.fail {
            return Err(SearchError::Api(403, "quotaExceeded".to_string()));
        }
        Ok(self.hits.get(&(query.to_string(), kind)).cloned())
    }
}

/// Echoes the text back as "audio" bytes, or fails.
#[derive(Default)]
pub struct FakeSynth {
    pub fail: bool,
    pub spoken: Mutex<Vec<(String, String)>>,
}

impl FakeSynth {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for FakeSynth {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SynthesisError> {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), lang.to_string()));
        if self.fail {
            return Err(SynthesisError::Api(500, "engine down".to_string()));
        }
        Ok(format!("ID3{}", text).into_bytes())
    }
}
