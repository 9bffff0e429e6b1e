use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::mbstring::Multibyte;
use crate::slug::remove_accents;

/// HTML/XML-looking tags, e.g. `<b>`, `</p>`, `<!-- x -->`
fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"</?[A-Za-z!][^<>]*>").expect("tag pattern is valid"))
}

/// Named or numeric entity body following an `&`
fn entity_pattern() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z][A-Za-z0-9]{1,31}|#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6});")
            .expect("entity pattern is valid")
    })
}

/// String utility functions
pub struct StringUtils;

impl StringUtils {
    /// Remove every whitespace character
    pub fn strip_space(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Remove accents and tags, then trim.
    ///
    /// `add_slashes` backslash-escapes quotes, backslashes and NUL;
    /// `to_lower` lowercases the result.
    pub fn clean(s: &str, to_lower: bool, add_slashes: bool) -> String {
        let ascii = remove_accents(s);
        let stripped = tag_pattern().replace_all(&ascii, "");
        let mut cleaned = stripped.trim().to_string();

        if add_slashes {
            cleaned = Self::add_slashes(&cleaned);
        }
        if to_lower {
            cleaned = Multibyte::global().to_lower(&cleaned);
        }

        cleaned
    }

    fn add_slashes(s: &str) -> String {
        let mut escaped = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\'' | '"' | '\\' => {
                    escaped.push('\\');
                    escaped.push(c);
                }
                '\0' => escaped.push_str("\\0"),
                _ => escaped.push(c),
            }
        }
        escaped
    }

    /// Split on any line ending, trim, and drop blank lines.
    ///
    /// With `unique` only the first occurrence of each line is kept.
    pub fn parse_lines(s: &str, unique: bool) -> Vec<String> {
        let mut seen = HashSet::new();
        s.split(['\r', '\n'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !unique || seen.insert(*line))
            .map(str::to_string)
            .collect()
    }

    /// Escape `&`, `<`, `>`, `"` and `'`.
    ///
    /// With `keep_entities` an ampersand that already starts an entity is left alone.
    pub fn html_ent(s: &str, keep_entities: bool) -> String {
        if !keep_entities {
            return html_escape::encode_quoted_attribute(s).into_owned();
        }

        let mut encoded = String::with_capacity(s.len());
        for (i, piece) in s.split('&').enumerate() {
            if i > 0 {
                let amp = if entity_pattern().is_match(piece) { "&" } else { "&amp;" };
                encoded.push_str(amp);
            }
            encoded.push_str(&html_escape::encode_quoted_attribute(piece));
        }
        encoded
    }

    /// Escape text for HTML element content
    pub fn esc(s: &str) -> String {
        html_escape::encode_text(s).into_owned()
    }

    /// Escape text for XML content and attributes
    pub fn esc_xml(s: &str) -> String {
        html_escape::encode_double_quoted_attribute(s).replace('\'', "&apos;")
    }

    /// Drop leading zeros, then left-pad with zeros up to `length`
    pub fn zero_pad(number: &str, length: usize) -> String {
        let number = number.trim();
        let (sign, digits) = match number.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", number),
        };

        let digits = digits.trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };
        let width = length.saturating_sub(sign.len());

        format!("{}{:0>width$}", sign, digits, width = width)
    }

    /// Insert `glue` at case and letter/digit boundaries.
    ///
    /// `wordAndWord` becomes `word_and_word`, `HTMLParser` becomes `html_parser`.
    pub fn split_camel_case(s: &str, glue: &str, to_lower: bool) -> String {
        let chars: Vec<char> = s.chars().collect();
        let mut split = String::with_capacity(s.len() + glue.len() * 4);

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && Self::is_word_boundary(chars[i - 1], c, chars.get(i + 1).copied()) {
                split.push_str(glue);
            }
            split.push(c);
        }

        if to_lower {
            Multibyte::global().to_lower(&split)
        } else {
            split
        }
    }

    fn is_word_boundary(prev: char, current: char, next: Option<char>) -> bool {
        (prev.is_lowercase() && current.is_uppercase())
            || (prev.is_alphabetic() && current.is_numeric())
            || (prev.is_numeric() && current.is_alphabetic())
            || (prev.is_uppercase()
                && current.is_uppercase()
                && next.map_or(false, char::is_lowercase))
    }
}
