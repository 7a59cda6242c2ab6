//! Moodtune configuration.
//!
//! Precedence: `MOODTUNE__*` environment variables > TOML file (`MOODTUNE_CONFIG`,
//! default `config/moodtune.toml`, optional) > built-in defaults. `.env` is loaded first.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | MOODTUNE__SERVER__PORT | 5000 | Listen port. |
//! | MOODTUNE__SERVER__AUDIO_DIR | static/audio | Where `/speak` writes MP3 files. |
//! | MOODTUNE__GEMINI__API_KEY (or GEMINI_KEY / GEMINI_API_KEY) | none | Required. |
//! | MOODTUNE__YOUTUBE__API_KEY (or YOUTUBE_KEY / YOUTUBE_API_KEY) | none | Without it every link is a sentinel. |
//! | MOODTUNE__GEMINI__TIMEOUT_SECS | 60 | Generation request timeout. |
//! | MOODTUNE__YOUTUBE__TIMEOUT_SECS | 15 | Per-search request timeout. |
//! | MOODTUNE__TTS__PROVIDER | google_translate | `google_translate` or `openai`. |
//! | MOODTUNE__TTS__API_KEY (or TTS_API_KEY) | none | Required for `openai`. |
//! | MOODTUNE__ENRICHMENT__CONCURRENCY | 1 | Link lookups in flight per reply. |
//! | MOODTUNE__VOCABULARY__DISTRESS | built-in | Comma-separated keyword list (also FAREWELL, SAD). |

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::mood::Vocabulary;

const DEFAULT_CONFIG_PATH: &str = "config/moodtune.toml";
const PLACEHOLDER_GEMINI_KEY: &str = "YOUR_REAL_GEMINI_KEY";

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("static/audio")
}

fn default_gemini_model() -> String {
    crate::gemini::DEFAULT_MODEL.to_string()
}

fn default_gemini_base() -> String {
    crate::gemini::GEMINI_API_BASE.to_string()
}

fn default_youtube_base() -> String {
    crate::youtube::YOUTUBE_API_BASE.to_string()
}

fn default_one() -> u32 {
    1
}

fn default_concurrency() -> usize {
    1
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "nova".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_search_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Holds `index.html` for `GET /`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            audio_dir: default_audio_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_base")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            base_url: default_gemini_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct YouTubeConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_youtube_base")]
    pub base_url: String,
    #[serde(default = "default_one")]
    pub max_results: u32,
    #[serde(default = "default_search_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_youtube_base(),
            max_results: default_one(),
            timeout_secs: default_search_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsProvider {
    #[default]
    GoogleTranslate,
    #[serde(rename = "openai", alias = "open_ai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub provider: TtsProvider,
    /// Translate endpoint URL or OpenAI-compatible base URL; provider default when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_tts_model")]
    pub model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Language tag passed to the engine and echoed in `/speak` responses.
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: TtsProvider::default(),
            base_url: None,
            api_key: String::new(),
            model: default_tts_model(),
            voice: default_voice(),
            lang: default_lang(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoodtuneConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub tts: TtsConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub vocabulary: Vocabulary,
}

impl MoodtuneConfig {
    /// Load `.env`, the TOML file and `MOODTUNE__*` variables, then fill keys
    /// from the legacy variable names and validate.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let path = std::env::var("MOODTUNE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut cfg = Self::build(Some(Path::new(&path)), true)?;
        cfg.fill_legacy_keys(|name| std::env::var(name).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    /// File and defaults only; no environment. Missing file => defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()), false)
    }

    fn build(path: Option<&Path>, with_env: bool) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path.filter(|p| p.exists()) {
            builder = builder.add_source(config::File::from(path));
        }
        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix("MOODTUNE")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("vocabulary.farewell")
                    .with_list_parse_key("vocabulary.distress")
                    .with_list_parse_key("vocabulary.sad"),
            );
        }
        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.vocabulary = cfg.vocabulary.normalized();
        Ok(cfg)
    }

    /// Fills empty API keys from the variable names the service used before
    /// `MOODTUNE__*` existed.
    pub fn fill_legacy_keys(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|n| lookup(n))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };
        if self.gemini.api_key.trim().is_empty() {
            if let Some(key) = first(&["GEMINI_API_KEY", "GEMINI_KEY"]) {
                self.gemini.api_key = key;
            }
        }
        if self.youtube.api_key.trim().is_empty() {
            if let Some(key) = first(&["YOUTUBE_API_KEY", "YOUTUBE_KEY"]) {
                self.youtube.api_key = key;
            }
        }
        if self.tts.api_key.trim().is_empty() {
            if let Some(key) = first(&["TTS_API_KEY"]) {
                self.tts.api_key = key;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let gemini_key = self.gemini.api_key.trim();
        if gemini_key.is_empty() || gemini_key == PLACEHOLDER_GEMINI_KEY {
            return Err(ConfigError::MissingKey("GEMINI_KEY"));
        }
        if self.tts.provider == TtsProvider::OpenAi && self.tts.api_key.trim().is_empty() {
            return Err(ConfigError::MissingKey("TTS_API_KEY"));
        }
        if self.enrichment.concurrency == 0 {
            return Err(ConfigError::Invalid("enrichment.concurrency must be at least 1".to_string()));
        }
        if self.youtube.max_results == 0 {
            return Err(ConfigError::Invalid("youtube.max_results must be at least 1".to_string()));
        }
        if self.vocabulary.farewell.is_empty() {
            return Err(ConfigError::Invalid("vocabulary.farewell must not be empty".to_string()));
        }
        Ok(())
    }
}
