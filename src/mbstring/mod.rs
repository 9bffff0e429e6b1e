use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::error::{StringKitError, StringKitResult};

pub mod byte_wise;
pub mod code_point;

pub use byte_wise::ByteOps;
pub use code_point::CodePointOps;

/// Environment variable consulted by [`Multibyte::detect`]
pub const TEXT_MODE_ENV: &str = "STRINGKIT_TEXT_MODE";

static GLOBAL: OnceLock<Multibyte> = OnceLock::new();

/// Unit in which lengths and offsets are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextMode {
    /// Unicode scalar values
    #[default]
    CodePoint,
    /// Raw UTF-8 bytes
    Bytes,
}

impl fmt::Display for TextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodePoint => write!(f, "code_point"),
            Self::Bytes => write!(f, "bytes"),
        }
    }
}

impl FromStr for TextMode {
    type Err = StringKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "code_point" | "codepoint" | "multibyte" | "mb" => Ok(Self::CodePoint),
            "bytes" | "byte" => Ok(Self::Bytes),
            other => Err(StringKitError::config(format!("Unknown text mode: {}", other))),
        }
    }
}

/// Strategy behind the facade. Implementations differ only in the unit they count.
pub trait TextOps: fmt::Debug + Send + Sync {
    fn mode(&self) -> TextMode;

    fn len(&self, text: &str) -> usize;

    /// Substring of `length` units starting at `start`, clamped to the text.
    fn sub(&self, text: &str, start: usize, length: Option<usize>) -> String;

    /// First occurrence of `needle` at or after `offset`.
    fn index_of_from(&self, haystack: &str, needle: &str, offset: usize) -> Option<usize>;

    fn last_index_of(&self, haystack: &str, needle: &str) -> Option<usize>;

    fn to_lower(&self, text: &str) -> String;

    fn to_upper(&self, text: &str) -> String;

    /// Lowercase each unit on its own so positions in the result match the input.
    fn fold_units(&self, text: &str) -> String;
}

/// Multibyte-aware string facade
///
/// All length, offset and search results are expressed in the unit of the
/// mode the facade was built with. Search misses are `None`, never a panic.
#[derive(Debug)]
pub struct Multibyte {
    ops: Box<dyn TextOps>,
}

impl Multibyte {
    /// Create a facade for an explicit mode
    pub fn new(mode: TextMode) -> Self {
        let ops: Box<dyn TextOps> = match mode {
            TextMode::CodePoint => Box::new(CodePointOps),
            TextMode::Bytes => Box::new(ByteOps),
        };
        Self { ops }
    }

    /// Resolve the mode from the environment, defaulting to code points
    pub fn detect() -> Self {
        let mode = match std::env::var(TEXT_MODE_ENV) {
            Ok(value) => value.parse::<TextMode>().unwrap_or_else(|err| {
                warn!("Ignoring {}: {}", TEXT_MODE_ENV, err);
                TextMode::default()
            }),
            Err(_) => TextMode::default(),
        };

        info!("Text facade running in {} mode", mode);
        Self::new(mode)
    }

    /// Install the process-wide facade.
    ///
    /// Re-installing the same mode is a no-op; asking for a different mode
    /// once the facade exists fails.
    pub fn init_global(mode: TextMode) -> StringKitResult<&'static Multibyte> {
        let facade = GLOBAL.get_or_init(|| {
            info!("Text facade running in {} mode", mode);
            Self::new(mode)
        });

        if facade.mode() != mode {
            return Err(StringKitError::AlreadyInitialized {
                mode: facade.mode().to_string(),
            });
        }

        Ok(facade)
    }

    /// Process-wide facade, detected on first use
    pub fn global() -> &'static Multibyte {
        GLOBAL.get_or_init(Self::detect)
    }

    pub fn mode(&self) -> TextMode {
        self.ops.mode()
    }

    pub fn is_multibyte(&self) -> bool {
        self.mode() == TextMode::CodePoint
    }

    pub fn len(&self, text: &str) -> usize {
        self.ops.len(text)
    }

    pub fn sub(&self, text: &str, start: usize, length: Option<usize>) -> String {
        self.ops.sub(text, start, length)
    }

    pub fn index_of(&self, haystack: &str, needle: &str) -> Option<usize> {
        self.ops.index_of_from(haystack, needle, 0)
    }

    pub fn index_of_from(&self, haystack: &str, needle: &str, offset: usize) -> Option<usize> {
        self.ops.index_of_from(haystack, needle, offset)
    }

    pub fn last_index_of(&self, haystack: &str, needle: &str) -> Option<usize> {
        self.ops.last_index_of(haystack, needle)
    }

    /// Case-insensitive [`index_of`](Self::index_of)
    pub fn index_of_ignore_case(&self, haystack: &str, needle: &str) -> Option<usize> {
        let haystack = self.ops.fold_units(haystack);
        let needle = self.ops.fold_units(needle);
        self.ops.index_of_from(&haystack, &needle, 0)
    }

    /// Tail of `haystack` starting at the first occurrence of `needle`
    pub fn contains_from(&self, haystack: &str, needle: &str) -> Option<String> {
        self.index_of(haystack, needle)
            .map(|pos| self.sub(haystack, pos, None))
    }

    /// Case-insensitive [`contains_from`](Self::contains_from); the tail keeps its original case
    pub fn contains_from_ignore_case(&self, haystack: &str, needle: &str) -> Option<String> {
        self.index_of_ignore_case(haystack, needle)
            .map(|pos| self.sub(haystack, pos, None))
    }

    /// Tail of `haystack` starting at the last occurrence of `needle`
    pub fn last_segment_after(&self, haystack: &str, needle: &str) -> Option<String> {
        self.last_index_of(haystack, needle)
            .map(|pos| self.sub(haystack, pos, None))
    }

    pub fn to_lower(&self, text: &str) -> String {
        self.ops.to_lower(text)
    }

    pub fn to_upper(&self, text: &str) -> String {
        self.ops.to_upper(text)
    }

    /// Count non-overlapping occurrences of `needle`
    pub fn count(&self, haystack: &str, needle: &str) -> usize {
        if needle.is_empty() {
            debug!("Empty needle never counts");
            return 0;
        }
        haystack.matches(needle).count()
    }

    pub fn starts_with(&self, text: &str, prefix: &str, case_sensitive: bool) -> bool {
        if case_sensitive {
            text.starts_with(prefix)
        } else {
            self.to_lower(text).starts_with(&self.to_lower(prefix))
        }
    }

    pub fn ends_with(&self, text: &str, suffix: &str, case_sensitive: bool) -> bool {
        if case_sensitive {
            text.ends_with(suffix)
        } else {
            self.to_lower(text).ends_with(&self.to_lower(suffix))
        }
    }
}

impl Default for Multibyte {
    fn default() -> Self {
        Self::new(TextMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "Денис";

    #[test]
    fn test_length_counts_code_points() {
        let mb = Multibyte::new(TextMode::CodePoint);
        assert!(mb.is_multibyte());
        assert_eq!(mb.len(NAME), 5);
        assert_eq!(mb.len(""), 0);
    }

    #[test]
    fn test_search() {
        let mb = Multibyte::default();
        assert_eq!(mb.index_of(NAME, "е"), Some(1));
        assert_eq!(mb.index_of(NAME, "Е"), None);
        assert_eq!(mb.last_index_of(NAME, "и"), Some(3));
        assert_eq!(mb.index_of_ignore_case(NAME, "Е"), Some(1));
        assert_eq!(mb.index_of_from("abcabc", "b", 2), Some(4));
    }

    #[test]
    fn test_not_found_is_distinct_from_zero() {
        let mb = Multibyte::default();
        assert_eq!(mb.index_of(NAME, "Д"), Some(0));
        assert_eq!(mb.index_of(NAME, "x"), None);
        assert_eq!(mb.index_of("ab", "abc"), None);
        assert_eq!(mb.index_of(NAME, ""), Some(0));
        assert_eq!(mb.last_index_of(NAME, ""), Some(0));
    }

    #[test]
    fn test_segments() {
        let mb = Multibyte::default();
        assert_eq!(mb.contains_from(NAME, "е").as_deref(), Some("енис"));
        assert_eq!(mb.contains_from_ignore_case(NAME, "Е").as_deref(), Some("енис"));
        assert_eq!(mb.last_segment_after(NAME, "и").as_deref(), Some("ис"));
        assert_eq!(mb.contains_from(NAME, "z"), None);
    }

    #[test]
    fn test_substring() {
        let mb = Multibyte::default();
        assert_eq!(mb.sub(NAME, 2, None), "нис");
        assert_eq!(mb.sub(NAME, 1, Some(3)), "ени");
        assert_eq!(mb.sub(NAME, 3, Some(100)), "ис");
        assert_eq!(mb.sub(NAME, 10, None), "");
    }

    #[test]
    fn test_case_folding() {
        let mb = Multibyte::default();
        assert_eq!(mb.to_lower("ДЕНИС"), "денис");
        assert_eq!(mb.to_upper("денис"), "ДЕНИС");
    }

    #[test]
    fn test_count() {
        let mb = Multibyte::default();
        assert_eq!(mb.count("денис ДеНИС", "е"), 2);
        assert_eq!(mb.count("денис ДеНИС", "И"), 1);
        assert_eq!(mb.count("aaaa", "aa"), 2);
        assert_eq!(mb.count("aaaa", ""), 0);
    }

    #[test]
    fn test_prefix_and_suffix() {
        let mb = Multibyte::default();
        assert!(mb.starts_with("денис", "ден", true));
        assert!(mb.starts_with("денис", "ДЕН", false));
        assert!(!mb.starts_with("денис", "ДЕН", true));

        assert!(mb.ends_with("денис", "нис", true));
        assert!(mb.ends_with("денис", "НИС", false));
        assert!(!mb.ends_with("денис", "ДЕНИС", true));
    }

    #[test]
    fn test_byte_mode_counts_bytes() {
        let mb = Multibyte::new(TextMode::Bytes);
        assert!(!mb.is_multibyte());
        assert_eq!(mb.len(NAME), 10);
        assert_eq!(mb.index_of(NAME, "е"), Some(2));
        assert_eq!(mb.index_of_ignore_case("Hello", "LL"), Some(2));
        assert_eq!(mb.to_upper("abc"), "ABC");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("bytes".parse::<TextMode>().unwrap(), TextMode::Bytes);
        assert_eq!("Code_Point".parse::<TextMode>().unwrap(), TextMode::CodePoint);
        assert!("utf16".parse::<TextMode>().is_err());
        assert_eq!(TextMode::Bytes.to_string(), "bytes");
    }

    #[test]
    fn test_global_mode_is_fixed_once_set() {
        let current = Multibyte::global().mode();
        assert!(Multibyte::init_global(current).is_ok());

        let other = match current {
            TextMode::CodePoint => TextMode::Bytes,
            TextMode::Bytes => TextMode::CodePoint,
        };
        let err = Multibyte::init_global(other).unwrap_err();
        assert_eq!(err.category(), "facade");
    }
}
