//! Reply Composer: produces the `/generate` reply body for a classified mood.
//!
//! Farewell and distress replies are fixed templates; the default branch asks the
//! model for tips and per-language playlist themes. Every branch goes through link
//! enrichment, and distress / sad-tone replies gain the meditation block.

use tracing::{info, warn};

use crate::enrichment::LinkEnricher;
use crate::error::GenerationError;
use crate::mood::{Mood, MoodInput, Vocabulary};
use crate::ports::TextGenerator;
use crate::sanitizer::strip_symbols;

/// Farewell reply: six static playlist lines, no model call.
pub const FAREWELL_TEMPLATE: &str = "
Stay safe and positive. Goodbye!
Here are some playlists to keep your day bright:
- Telugu Relaxing Vibes
- Telugu Melody Hits
- Hindi Chillout Mix
- Hindi Motivation Songs
- English Happy Vibes
- English Focus Music
";

/// Helpline lines of the distress reply. They start with a phone symbol, so
/// enrichment never touches them.
pub const HELPLINE_LINES: [&str; 5] = [
    "\u{26a0}\u{fe0f} Please don\u{2019}t harm yourself or others.",
    "You are not alone \u{2014} here are helplines:",
    "📞 India Helpline: 9152987821 (AASRA)",
    "📞 India Women Helpline: 181",
    "📞 Global Suicide Prevention: https://findahelpline.com",
];

/// Static peace playlists listed after the helplines.
pub const PEACE_PLAYLISTS: [&str; 6] = [
    "Telugu Peaceful Music",
    "Telugu Healing Bhajans",
    "Hindi Relaxation Music",
    "Hindi Hope Songs",
    "English Stress Relief",
    "English Stay Strong Motivation",
];

/// Distress reply body before enrichment.
pub fn distress_template() -> String {
    let mut body = String::from("\n");
    for line in HELPLINE_LINES {
        body.push_str(line);
        body.push('\n');
    }
    body.push_str("\nMeanwhile, here are some playlists for peace:\n");
    for playlist in PEACE_PLAYLISTS {
        body.push_str("- ");
        body.push_str(playlist);
        body.push('\n');
    }
    body
}

/// Prompt for the default branch.
pub fn playlist_prompt(user_mood: &str) -> String {
    format!(
        "The user feels: {user_mood}\n\n\
         Your reply must always include:\n\
         - 2\u{2013}3 short healing or motivational tips\n\
         - EXACTLY 2 Telugu playlist themes\n\
         - EXACTLY 2 Hindi playlist themes\n\
         - EXACTLY 2 English playlist themes\n\
         - Format playlists as list items starting with \"-\"\n\
         Do not start tips with \"-\"; only playlist themes are list items."
    )
}

/// Builds reply bodies from a mood classification and the collaborators.
pub struct ReplyComposer<'a> {
    pub vocabulary: &'a Vocabulary,
    pub generator: &'a dyn TextGenerator,
    pub enricher: &'a LinkEnricher,
}

impl ReplyComposer<'_> {
    /// Classifies and composes. Only a generation failure aborts; search
    /// failures have already degraded to sentinels inside enrichment.
    pub async fn compose(&self, input: &MoodInput) -> Result<String, GenerationError> {
        let mood = self.vocabulary.classify(input);
        info!(mood = mood.label(), "reply category selected");
        match mood {
            Mood::Farewell => Ok(self.enricher.enrich(FAREWELL_TEMPLATE).await),
            Mood::Distress => {
                let body = self.enricher.enrich(&distress_template()).await;
                Ok(self.with_meditation(body).await)
            }
            Mood::Default { sad_tone } => {
                let themes = self.playlist_themes(&input.normalized).await?;
                let mut reply = self.enricher.enrich(&themes).await;
                if sad_tone {
                    reply = self.with_meditation(reply).await;
                }
                Ok(strip_symbols(&reply))
            }
        }
    }

    async fn playlist_themes(&self, user_mood: &str) -> Result<String, GenerationError> {
        let completion = self
            .generator
            .generate(&playlist_prompt(user_mood))
            .await
            .inspect_err(|e| warn!(error = %e, "playlist generation failed"))?;
        let completion = completion.trim();
        if completion.is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }
        Ok(completion.to_string())
    }

    async fn with_meditation(&self, body: String) -> String {
        format!("{}\n\n{}", body, self.enricher.meditation_block().await)
    }
}
