//! Moodtune: Core library.
//! Turns a free-text mood into a playlist reply with media links, and text into
//! a stored speech clip. External services sit behind the traits in [`ports`].

pub mod composer;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod gemini;
pub mod mood;
pub mod ports;
pub mod sanitizer;
pub mod service;
pub mod speech;
pub mod tts;
pub mod youtube;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{MoodtuneConfig, TtsProvider};
pub use enrichment::LinkEnricher;
pub use error::{ConfigError, GenerationError, SearchError, SynthesisError};
pub use mood::{Mood, MoodInput, Vocabulary};
pub use ports::{MediaKind, MediaSearch, SpeechSynthesizer, TextGenerator};
pub use sanitizer::{clean_for_speech, strip_symbols};
pub use service::MoodChat;
pub use speech::{AudioClip, AudioStore, AUDIO_URL_PREFIX};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
