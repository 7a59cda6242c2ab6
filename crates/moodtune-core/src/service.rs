//! `MoodChat`: the collaborators and settings a request handler needs, built
//! once at startup and shared by reference.

use std::sync::Arc;
use std::time::Duration;

use crate::composer::ReplyComposer;
use crate::config::{MoodtuneConfig, TtsProvider};
use crate::enrichment::LinkEnricher;
use crate::error::{ConfigError, GenerationError, SynthesisError};
use crate::gemini::GeminiClient;
use crate::mood::{MoodInput, Vocabulary};
use crate::ports::{MediaSearch, SpeechSynthesizer, TextGenerator};
use crate::speech::{AudioClip, AudioStore, SpeechDesk};
use crate::tts::{OpenAiTts, TranslateTts, OPENAI_API_BASE};
use crate::youtube::YouTubeSearch;

pub struct MoodChat {
    vocabulary: Vocabulary,
    generator: Arc<dyn TextGenerator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    enricher: LinkEnricher,
    audio: AudioStore,
    lang: String,
}

impl MoodChat {
    pub fn new(
        vocabulary: Vocabulary,
        generator: Arc<dyn TextGenerator>,
        search: Arc<dyn MediaSearch>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        audio: AudioStore,
    ) -> Self {
        Self {
            vocabulary,
            generator,
            synthesizer,
            enricher: LinkEnricher::new(search),
            audio,
            lang: "en".to_string(),
        }
    }

    pub fn with_enricher(mut self, f: impl FnOnce(LinkEnricher) -> LinkEnricher) -> Self {
        self.enricher = f(self.enricher);
        self
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    /// Production wiring: Gemini, YouTube, and the configured TTS provider.
    pub fn from_config(cfg: &MoodtuneConfig) -> Result<Self, ConfigError> {
        let generator = GeminiClient::new(cfg.gemini.api_key.as_str(), Duration::from_secs(cfg.gemini.timeout_secs))
            .map_err(|e| ConfigError::Invalid(e.to_string()))?
            .with_model(&cfg.gemini.model)
            .with_base_url(&cfg.gemini.base_url);
        let search = YouTubeSearch::new(cfg.youtube.api_key.as_str(), Duration::from_secs(cfg.youtube.timeout_secs))
            .map_err(|e| ConfigError::Invalid(e.to_string()))?
            .with_base_url(&cfg.youtube.base_url);

        let timeout = Duration::from_secs(cfg.tts.timeout_secs);
        let synthesizer: Arc<dyn SpeechSynthesizer> = match cfg.tts.provider {
            TtsProvider::GoogleTranslate => {
                let tts = TranslateTts::new(timeout).map_err(|e| ConfigError::Invalid(e.to_string()))?;
                match cfg.tts.base_url.as_deref() {
                    Some(url) => Arc::new(tts.with_url(url)),
                    None => Arc::new(tts),
                }
            }
            TtsProvider::OpenAi => Arc::new(
                OpenAiTts::new(
                    cfg.tts.base_url.as_deref().unwrap_or(OPENAI_API_BASE),
                    cfg.tts.api_key.as_str(),
                    cfg.tts.model.as_str(),
                    cfg.tts.voice.as_str(),
                    timeout,
                )
                .map_err(|e| ConfigError::Invalid(e.to_string()))?,
            ),
        };

        let audio = AudioStore::open(&cfg.server.audio_dir).map_err(|e| {
            ConfigError::Invalid(format!("audio dir {}: {}", cfg.server.audio_dir.display(), e))
        })?;

        let max_results = cfg.youtube.max_results;
        let concurrency = cfg.enrichment.concurrency;
        Ok(Self::new(
            cfg.vocabulary.clone(),
            Arc::new(generator),
            Arc::new(search),
            synthesizer,
            audio,
        )
        .with_enricher(|e| e.with_max_results(max_results).with_concurrency(concurrency))
        .with_lang(&cfg.tts.lang))
    }

    pub fn audio_store(&self) -> &AudioStore {
        &self.audio
    }

    /// `/generate`: classify, compose, enrich.
    pub async fn generate(&self, raw_input: &str) -> Result<String, GenerationError> {
        let input = MoodInput::new(raw_input);
        ReplyComposer {
            vocabulary: &self.vocabulary,
            generator: self.generator.as_ref(),
            enricher: &self.enricher,
        }
        .compose(&input)
        .await
    }

    /// `/speak`: independent of the chat flow.
    pub async fn speak(&self, text: &str) -> Result<AudioClip, SynthesisError> {
        SpeechDesk {
            synthesizer: self.synthesizer.as_ref(),
            store: &self.audio,
            lang: &self.lang,
        }
        .speak(text)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MediaKind;
    use crate::testing::{FakeGenerator, FakeSearch, FakeSynth};

    fn chat(dir: &std::path::Path, generator: FakeGenerator, search: FakeSearch) -> MoodChat {
        MoodChat::new(
            Vocabulary::default(),
            Arc::new(generator),
            Arc::new(search),
            Arc::new(FakeSynth::default()),
            AudioStore::open(dir).unwrap(),
        )
    }

    #[tokio::test]
    async fn generate_and_speak_share_nothing_but_the_audio_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let search = FakeSearch::empty().with_hit("English Focus Music", MediaKind::Playlist, "PLf");
        let chat = chat(tmp.path(), FakeGenerator::failing(), search);

        let reply = chat.generate("quit").await.unwrap();
        assert!(reply.contains("- English Focus Music 🎵 https://www.youtube.com/playlist?list=PLf"));

        let clip = chat.with_lang("en").speak(&reply).await.unwrap();
        assert!(clip.url.starts_with("/static/audio/"));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn generation_failure_surfaces() {
        let tmp = tempfile::tempdir().unwrap();
        let chat = chat(tmp.path(), FakeGenerator::failing(), FakeSearch::empty());
        assert!(chat.generate("hello").await.is_err());
    }

    #[test]
    fn builds_from_config() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = MoodtuneConfig::default();
        cfg.gemini.api_key = "g".to_string();
        cfg.server.audio_dir = tmp.path().join("audio");
        let chat = MoodChat::from_config(&cfg).unwrap();
        assert!(chat.audio_store().dir().is_dir());
    }
}
