use std::borrow::Cow;
use tracing::trace;

use crate::mbstring::Multibyte;

/// Marker appended to every truncated result
pub const ELLIPSIS: &str = "...";

/// Character and word limited truncation over a [`Multibyte`] facade
#[derive(Debug, Clone)]
pub struct Truncator<'a> {
    mb: &'a Multibyte,
    ellipsis: Cow<'a, str>,
}

impl<'a> Truncator<'a> {
    pub fn new(mb: &'a Multibyte) -> Self {
        Self {
            mb,
            ellipsis: Cow::Borrowed(ELLIPSIS),
        }
    }

    /// Replace the default `"..."` marker
    pub fn with_ellipsis(mut self, ellipsis: impl Into<Cow<'a, str>>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    pub fn ellipsis(&self) -> &str {
        &self.ellipsis
    }

    /// Cut to at most `max_chars` units without splitting a word.
    ///
    /// When the cut prefix has no whitespace at all the raw prefix is kept,
    /// so very small limits still cut inside the first word.
    pub fn truncate_safe(&self, text: &str, max_chars: usize) -> String {
        if self.mb.len(text) <= max_chars {
            return text.to_string();
        }

        let prefix = self.mb.sub(text, 0, Some(max_chars));
        let kept = match last_whitespace(self.mb, &prefix) {
            Some(boundary) => self.mb.sub(&prefix, 0, Some(boundary)),
            None => prefix,
        };

        trace!(max_chars, kept = kept.len(), "Safe truncation");
        format!("{}{}", kept, self.ellipsis)
    }

    /// Cut at exactly `max_chars` units, dropping trailing whitespace of the cut
    pub fn limit_chars(&self, text: &str, max_chars: usize) -> String {
        if self.mb.len(text) <= max_chars {
            return text.to_string();
        }

        let prefix = self.mb.sub(text, 0, Some(max_chars));
        format!("{}{}", prefix.trim_end(), self.ellipsis)
    }

    /// Keep the first `max_words` whitespace-separated words
    pub fn limit_words(&self, text: &str, max_words: usize) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() <= max_words {
            return text.to_string();
        }

        format!("{}{}", words[..max_words].join(" "), self.ellipsis)
    }
}

/// Position of the last whitespace unit in `text`
fn last_whitespace(mb: &Multibyte, text: &str) -> Option<usize> {
    text.char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(byte_pos, _)| mb.len(&text[..byte_pos]))
}

/// [`Truncator::truncate_safe`] on the global facade
pub fn truncate_safe(text: &str, max_chars: usize) -> String {
    Truncator::new(Multibyte::global()).truncate_safe(text, max_chars)
}

/// [`Truncator::limit_chars`] on the global facade
pub fn limit_chars(text: &str, max_chars: usize) -> String {
    Truncator::new(Multibyte::global()).limit_chars(text, max_chars)
}

/// [`Truncator::limit_words`] on the global facade
pub fn limit_words(text: &str, max_words: usize) -> String {
    Truncator::new(Multibyte::global()).limit_words(text, max_words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mbstring::TextMode;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    fn truncator() -> Truncator<'static> {
        static MB: std::sync::OnceLock<Multibyte> = std::sync::OnceLock::new();
        Truncator::new(MB.get_or_init(|| Multibyte::new(TextMode::CodePoint)))
    }

    #[test]
    fn test_truncate_safe() {
        let t = truncator();
        assert_eq!(t.truncate_safe(FOX, 24), "The quick brown fox...");
        assert_eq!(t.truncate_safe(FOX, 55), FOX);
        assert_eq!(t.truncate_safe(FOX, 2), "Th...");
        assert_eq!(t.truncate_safe(FOX, 3), "The...");
        assert_eq!(t.truncate_safe(FOX, 7), "The...");
    }

    #[test]
    fn test_truncate_safe_length_bound() {
        let t = truncator();
        let mb = Multibyte::default();
        for limit in 1..=FOX.len() + 2 {
            let out = t.truncate_safe(FOX, limit);
            assert!(mb.len(&out) <= limit + 3, "limit {} gave {:?}", limit, out);
        }
    }

    #[test]
    fn test_limit_chars() {
        let t = truncator();
        assert_eq!(t.limit_chars(FOX, 24), "The quick brown fox jump...");
        assert_eq!(t.limit_chars(FOX, 55), FOX);
        assert_eq!(t.limit_chars(FOX, 2), "Th...");
        assert_eq!(t.limit_chars(FOX, 3), "The...");
        assert_eq!(t.limit_chars(FOX, 7), "The qui...");
        assert_eq!(t.limit_chars(FOX, 150), FOX);
    }

    #[test]
    fn test_limit_words() {
        let t = truncator();
        assert_eq!(t.limit_words(FOX, 3), "The quick brown...");
        assert_eq!(t.limit_words(FOX, 5), "The quick brown fox jumps...");
        assert_eq!(t.limit_words(FOX, 1), "The...");
        assert_eq!(t.limit_words(FOX, 90), FOX);
        assert_eq!(t.limit_words(FOX, 7), "The quick brown fox jumps over the...");
    }

    #[test]
    fn test_limit_words_keeps_spacing_when_not_truncated() {
        let t = truncator();
        let spaced = "  one   two\tthree ";
        assert_eq!(t.limit_words(spaced, 3), spaced);
        assert_eq!(t.limit_words(spaced, 2), "one two...");
    }

    #[test]
    fn test_zero_limits() {
        let t = truncator();
        assert_eq!(t.truncate_safe("", 0), "");
        assert_eq!(t.limit_chars("", 0), "");
        assert_eq!(t.limit_words("", 0), "");
        assert_eq!(t.truncate_safe("abc", 0), "...");
        assert_eq!(t.limit_chars("abc", 0), "...");
        assert_eq!(t.limit_words("abc", 0), "...");
    }

    #[test]
    fn test_multibyte_text() {
        let t = truncator();
        assert_eq!(t.truncate_safe("Привет мир всем", 10), "Привет...");
        assert_eq!(t.limit_chars("Привет мир всем", 8), "Привет м...");
    }

    #[test]
    fn test_custom_ellipsis() {
        let mb = Multibyte::default();
        let t = Truncator::new(&mb).with_ellipsis("…");
        assert_eq!(t.ellipsis(), "…");
        assert_eq!(t.limit_chars(FOX, 3), "The…");
    }

    #[test]
    fn test_byte_mode_counts_bytes() {
        let mb = Multibyte::new(TextMode::Bytes);
        let t = Truncator::new(&mb);
        assert_eq!(t.limit_chars("Привет", 4), "Пр...");
    }

    #[test]
    fn test_byte_mode_cuts_on_character_boundaries() {
        let mb = Multibyte::new(TextMode::Bytes);
        let t = Truncator::new(&mb);
        assert_eq!(t.truncate_safe("Привет мир", 1), "...");
        assert_eq!(t.truncate_safe("Привет мир", 15), "Привет...");
        assert_eq!(t.limit_chars("Привет", 5), "Пр...");
    }

    #[test]
    fn test_byte_mode_length_bound() {
        let mb = Multibyte::new(TextMode::Bytes);
        let t = Truncator::new(&mb);
        let text = "Привет мир всем";
        for limit in 0..=text.len() + 2 {
            let safe = t.truncate_safe(text, limit);
            assert!(safe.len() <= limit + 3, "limit {} gave {:?}", limit, safe);
            let hard = t.limit_chars(text, limit);
            assert!(hard.len() <= limit + 3, "limit {} gave {:?}", limit, hard);
        }
    }

    #[test]
    fn test_global_wrappers() {
        assert_eq!(limit_words(FOX, 3), "The quick brown...");
        assert_eq!(truncate_safe("short", 10), "short");
        assert_eq!(limit_chars("short", 10), "short");
    }
}
