//! Text Sanitizer: output filters applied before text leaves the core.
//! `strip_symbols` removes pictographs from chat replies; `clean_for_speech`
//! reduces arbitrary text to something a TTS engine reads aloud cleanly.

use once_cell::sync::Lazy;
use regex::Regex;

/// Emoticons, misc symbols & pictographs, transport, regional indicators,
/// dingbats, and the enclosed/supplemental block up to U+1F251.
static SYMBOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2702}-\x{27B0}",
        r"\x{24C2}-\x{1F251}",
        "]+"
    ))
    .expect("symbol pattern is valid")
});

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9+.\-]*://\S*|http\S+").expect("url pattern is valid")
});

static UNSPEAKABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s,.!?]").expect("speech filter pattern is valid"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Removes pictographic symbols. Idempotent.
pub fn strip_symbols(text: &str) -> String {
    SYMBOL_RE.replace_all(text, "").into_owned()
}

/// Drops URLs and anything outside letters, digits, whitespace and `,.!?`,
/// then collapses whitespace runs to one space and trims. Idempotent.
pub fn clean_for_speech(text: &str) -> String {
    let without_urls = URL_RE.replace_all(text, "");
    let filtered = UNSPEAKABLE_RE.replace_all(&without_urls, "");
    // Filtering can splice an `http...` token back together ("ht@tp" -> "http").
    let filtered = URL_RE.replace_all(&filtered, "");
    WHITESPACE_RE.replace_all(&filtered, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speakable(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | ',' | '.' | '!' | '?'))
    }

    #[test]
    fn strips_emoji_and_dingbats() {
        assert_eq!(strip_symbols("calm 😊 mind ✨"), "calm  mind ");
        assert_eq!(strip_symbols("🌿 Meditation"), " Meditation");
    }

    #[test]
    fn leaves_indic_scripts_alone() {
        let telugu = "తెలుగు పాటలు";
        let hindi = "हिंदी गाने";
        assert_eq!(strip_symbols(telugu), telugu);
        assert_eq!(strip_symbols(hindi), hindi);
    }

    #[test]
    fn strip_symbols_is_idempotent() {
        for input in ["", "plain", "a😊b🎵c", "⚠️ careful 📞 181", "🧘 stretch"] {
            let once = strip_symbols(input);
            assert_eq!(strip_symbols(&once), once);
        }
    }

    #[test]
    fn speech_example_from_chat() {
        let text = strip_symbols("Hello 😊 visit http://x.com now!!");
        assert_eq!(clean_for_speech(&text), "Hello visit now!!");
    }

    #[test]
    fn removes_non_http_schemes() {
        assert_eq!(clean_for_speech("get ftp://files.example/a.mp3 here"), "get here");
    }

    #[test]
    fn collapses_newlines_and_tabs() {
        assert_eq!(clean_for_speech("  one\n\ntwo\tthree  "), "one two three");
    }

    #[test]
    fn output_is_speakable_and_idempotent() {
        let inputs = [
            "- Telugu Melody Hits 🎵 https://www.youtube.com/playlist?list=PL1",
            "ht@tps://odd",
            "ht😊tpx trailing",
            "Tabs\tand   spaces — dashes & ampersands",
            "http",
            "",
        ];
        for input in inputs {
            let once = clean_for_speech(input);
            assert!(speakable(&once), "unexpected characters in {:?}", once);
            assert!(!once.contains("  "));
            assert_eq!(clean_for_speech(&once), once);
        }
    }
}
