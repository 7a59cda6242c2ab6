//! Speech Request Handler: sanitizes arbitrary text, synthesizes it, and
//! stores the audio under the static audio directory.
//!
//! Artifacts are written to a hidden `.part` file and renamed into place, so a
//! returned URL always points at a complete file and a failure leaves nothing behind.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::SynthesisError;
use crate::ports::SpeechSynthesizer;
use crate::sanitizer::{clean_for_speech, strip_symbols};

/// URL prefix under which the gateway serves the audio directory.
pub const AUDIO_URL_PREFIX: &str = "/static/audio";

/// One playable artifact in a `/speak` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioClip {
    pub lang: String,
    pub url: String,
}

/// Append-only directory of generated MP3 files. Never deletes.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    /// Opens (creating if needed) the audio directory.
    pub fn open(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under a fresh random name and returns the file name.
    pub async fn save(&self, bytes: &[u8]) -> Result<String, SynthesisError> {
        if bytes.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }
        let id = uuid::Uuid::new_v4().simple().to_string();
        let filename = format!("{}.mp3", id);
        let partial = self.dir.join(format!(".{}.part", id));
        let target = self.dir.join(&filename);

        let written = async {
            tokio::fs::write(&partial, bytes).await?;
            tokio::fs::rename(&partial, &target).await
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(SynthesisError::Io(e));
        }
        Ok(filename)
    }
}

/// Text prepared for the speech engine: pictographs, URLs and symbols removed.
pub fn speech_text(text: &str) -> String {
    clean_for_speech(&strip_symbols(text))
}

/// Handles `/speak`: sanitize, synthesize, persist, describe.
pub struct SpeechDesk<'a> {
    pub synthesizer: &'a dyn SpeechSynthesizer,
    pub store: &'a AudioStore,
    pub lang: &'a str,
}

impl SpeechDesk<'_> {
    pub async fn speak(&self, text: &str) -> Result<AudioClip, SynthesisError> {
        let spoken = speech_text(text);
        if spoken.is_empty() {
            return Err(SynthesisError::EmptyText);
        }
        let audio = self
            .synthesizer
            .synthesize(&spoken, self.lang)
            .await
            .inspect_err(|e| warn!(error = %e, "speech synthesis failed"))?;
        let filename = self.store.save(&audio).await?;
        info!(file = %filename, bytes = audio.len(), "audio artifact written");
        Ok(AudioClip {
            lang: self.lang.to_string(),
            url: format!("{}/{}", AUDIO_URL_PREFIX, filename),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSynth;

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn speaks_sanitized_text_and_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AudioStore::open(tmp.path().join("audio")).unwrap();
        let synth = FakeSynth::default();
        let desk = SpeechDesk {
            synthesizer: &synth,
            store: &store,
            lang: "en",
        };

        let clip = desk.speak("Hello 😊 visit http://x.com now!!").await.unwrap();

        assert_eq!(
            synth.spoken.lock().unwrap().as_slice(),
            &[("Hello visit now!!".to_string(), "en".to_string())]
        );
        assert_eq!(clip.lang, "en");
        let filename = clip.url.strip_prefix("/static/audio/").unwrap();
        assert!(filename.ends_with(".mp3"));
        assert_eq!(filename.len(), 32 + 4);
        assert_eq!(files_in(store.dir()), vec![filename.to_string()]);
        let bytes = std::fs::read(store.dir().join(filename)).unwrap();
        assert_eq!(bytes, b"ID3Hello visit now!!");
    }

    #[tokio::test]
    async fn each_call_gets_a_unique_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AudioStore::open(tmp.path()).unwrap();
        let a = store.save(b"one").await.unwrap();
        let b = store.save(b"two").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(files_in(tmp.path()).len(), 2);
    }

    #[tokio::test]
    async fn synthesis_failure_leaves_no_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AudioStore::open(tmp.path()).unwrap();
        let synth = FakeSynth::failing();
        let desk = SpeechDesk {
            synthesizer: &synth,
            store: &store,
            lang: "en",
        };
        let err = desk.speak("hello there").await.unwrap_err();
        assert!(matches!(err, SynthesisError::Api(500, _)));
        assert!(files_in(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn nothing_speakable_is_rejected_before_synthesis() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AudioStore::open(tmp.path()).unwrap();
        let synth = FakeSynth::default();
        let desk = SpeechDesk {
            synthesizer: &synth,
            store: &store,
            lang: "en",
        };
        let err = desk.speak("😊 🎵 https://only.a/link").await.unwrap_err();
        assert!(matches!(err, SynthesisError::EmptyText));
        assert!(synth.spoken.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_audio_is_not_stored() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AudioStore::open(tmp.path()).unwrap();
        assert!(matches!(store.save(&[]).await, Err(SynthesisError::EmptyAudio)));
        assert!(files_in(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn failed_write_cleans_up() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AudioStore::open(tmp.path().join("gone")).unwrap();
        std::fs::remove_dir(store.dir()).unwrap();
        assert!(matches!(store.save(b"abc").await, Err(SynthesisError::Io(_))));
        assert!(files_in(tmp.path()).is_empty());
    }
}
