//! Mood Classifier: picks the reply branch from normalized user text.
//! Rules run in priority order: farewell (exact), distress (substring), then default
//! with a sad-tone flag (substring).

use serde::Deserialize;

/// Default farewell words; matched against the whole normalized input.
pub const FAREWELL_WORDS: &[&str] = &["exit", "quit", "bye"];

/// Violent / self-harm keywords. Substring match, so "hit" also fires inside "white".
pub const DISTRESS_WORDS: &[&str] = &[
    "kill", "murder", "suicide", "die", "harm", "slap", "hit", "hurt", "destroy",
];

/// Sad / lonely keywords that add the meditation block to a default reply.
pub const SAD_WORDS: &[&str] = &["sad", "lonely", "depressed", "upset", "tired"];

/// Raw request text plus its trimmed, lower-cased form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodInput {
    pub raw: String,
    pub normalized: String,
}

impl MoodInput {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        Self { raw, normalized }
    }
}

/// Trim then lowercase.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Reply category chosen for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Farewell,
    Distress,
    Default { sad_tone: bool },
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Farewell => "farewell",
            Mood::Distress => "distress",
            Mood::Default { sad_tone: true } => "default+sad",
            Mood::Default { sad_tone: false } => "default",
        }
    }
}

/// Keyword lists driving classification. Loaded from config so they can be
/// extended without touching `classify`.
#[derive(Debug, Clone, Deserialize)]
pub struct Vocabulary {
    #[serde(default = "default_farewell")]
    pub farewell: Vec<String>,
    #[serde(default = "default_distress")]
    pub distress: Vec<String>,
    #[serde(default = "default_sad")]
    pub sad: Vec<String>,
}

fn to_owned_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_farewell() -> Vec<String> {
    to_owned_list(FAREWELL_WORDS)
}

fn default_distress() -> Vec<String> {
    to_owned_list(DISTRESS_WORDS)
}

fn default_sad() -> Vec<String> {
    to_owned_list(SAD_WORDS)
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            farewell: default_farewell(),
            distress: default_distress(),
            sad: default_sad(),
        }
    }
}

impl Vocabulary {
    /// Lowercases and trims every entry and drops blanks; an empty keyword
    /// would otherwise match every input.
    pub fn normalized(self) -> Self {
        let clean = |words: Vec<String>| -> Vec<String> {
            words
                .into_iter()
                .map(|w| normalize(&w))
                .filter(|w| !w.is_empty())
                .collect()
        };
        Self {
            farewell: clean(self.farewell),
            distress: clean(self.distress),
            sad: clean(self.sad),
        }
    }

    /// First matching rule wins.
    pub fn classify(&self, input: &MoodInput) -> Mood {
        let text = input.normalized.as_str();
        if self.farewell.iter().any(|w| w == text) {
            return Mood::Farewell;
        }
        if contains_any(text, &self.distress) {
            return Mood::Distress;
        }
        Mood::Default {
            sad_tone: contains_any(text, &self.sad),
        }
    }
}

fn contains_any(text: &str, words: &[String]) -> bool {
    words.iter().any(|w| text.contains(w.as_str()))
}
