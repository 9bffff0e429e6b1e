use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::error::{StringKitError, StringKitResult};

/// Wildcard marker matching any run of characters, including none
pub const WILDCARD: char = '*';

/// Glob-style pattern compiled into an anchored regular expression.
///
/// Literal text matches literally, `*` matches anything (newlines included)
/// and the whole subject has to match: `test/` does not match `test/second`.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compile a case-sensitive pattern
    pub fn new(pattern: &str) -> StringKitResult<Self> {
        Self::with_case(pattern, true)
    }

    pub fn with_case(pattern: &str, case_sensitive: bool) -> StringKitResult<Self> {
        let expression = Self::translate(pattern);
        debug!("Compiled wildcard pattern {:?} as {:?}", pattern, expression);

        let regex = RegexBuilder::new(&expression)
            .case_insensitive(!case_sensitive)
            .dot_matches_new_line(true)
            .build()
            .map_err(|err| StringKitError::pattern(pattern, err.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Translate wildcard syntax into an anchored regular expression
    fn translate(pattern: &str) -> String {
        let literals: Vec<String> = pattern
            .split(WILDCARD)
            .map(regex::escape)
            .collect();
        format!("^{}$", literals.join(".*"))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }
}

/// Case-sensitive wildcard match of the whole `subject`
pub fn like(pattern: &str, subject: &str) -> bool {
    like_with(pattern, subject, true)
}

/// Wildcard match with optional case folding.
///
/// A pattern that cannot be compiled is reported as no match.
pub fn like_with(pattern: &str, subject: &str, case_sensitive: bool) -> bool {
    if case_sensitive && pattern == subject {
        return true;
    }

    match WildcardPattern::with_case(pattern, case_sensitive) {
        Ok(compiled) => compiled.is_match(subject),
        Err(err) => {
            warn!(category = err.category(), "{}", err);
            false
        }
    }
}
