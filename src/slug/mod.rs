use serde::{Deserialize, Serialize};
use tracing::debug;

/// English words substituted for a leading digit
const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Options for [`slug_with`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugOptions {
    /// Inserted between segments; may be empty
    pub separator: String,
    /// Spell out a leading digit so the slug never starts with a number
    pub preserve_numeric_words: bool,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            separator: "-".to_string(),
            preserve_numeric_words: false,
        }
    }
}

impl SlugOptions {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn preserve_numeric_words(mut self, preserve: bool) -> Self {
        self.preserve_numeric_words = preserve;
        self
    }
}

/// Transliterate to the closest ASCII spelling
pub fn remove_accents(text: &str) -> String {
    unidecode::unidecode(text)
}

/// Slug with the default `-` separator
pub fn slug(text: &str) -> String {
    slug_with(text, &SlugOptions::default())
}

/// Normalize `text` into `[a-z0-9]` segments joined by the separator
pub fn slug_with(text: &str, options: &SlugOptions) -> String {
    let ascii = remove_accents(text).to_ascii_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push_str(&options.separator);
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    if options.preserve_numeric_words {
        spell_leading_digit(&mut slug);
    }

    debug!("Slug {:?} -> {:?}", text, slug);
    slug
}

/// `123-x` becomes `one23-x`; only the first digit is spelled out
fn spell_leading_digit(slug: &mut String) {
    let digit = match slug.chars().next().and_then(|c| c.to_digit(10)) {
        Some(digit) => digit as usize,
        None => return,
    };
    slug.replace_range(..1, DIGIT_WORDS[digit]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use regex::Regex;

    const TITLE: &str = "A simple title";
    const DASHED: &str = "This post -- it has a dash";
    const NUMBERS: &str = "123----1251251";

    fn with(separator: &str, numeric: bool) -> SlugOptions {
        SlugOptions::default()
            .with_separator(separator)
            .preserve_numeric_words(numeric)
    }

    #[test]
    fn test_default_separator() {
        assert_eq!(slug(" A simple     title "), "a-simple-title");
        assert_eq!(slug(DASHED), "this-post-it-has-a-dash");
        assert_eq!(slug(NUMBERS), "123-1251251");
        assert_eq!(slug_with(NUMBERS, &with("-", true)), "one23-1251251");
    }

    #[test]
    fn test_underscore_separator() {
        assert_eq!(slug_with(TITLE, &with("_", false)), "a_simple_title");
        assert_eq!(slug_with(DASHED, &with("_", false)), "this_post_it_has_a_dash");
        assert_eq!(slug_with(NUMBERS, &with("_", false)), "123_1251251");
        assert_eq!(slug_with(NUMBERS, &with("_", true)), "one23_1251251");
    }

    #[test]
    fn test_blank_separator() {
        assert_eq!(slug_with(TITLE, &with("", false)), "asimpletitle");
        assert_eq!(slug_with(DASHED, &with("", false)), "thispostithasadash");
        assert_eq!(slug_with(NUMBERS, &with("", false)), "1231251251");
        assert_eq!(slug_with(NUMBERS, &with("", true)), "one231251251");
    }

    #[test]
    fn test_transliteration() {
        assert_eq!(slug("Crème brûlée"), "creme-brulee");
        assert_eq!(slug("Денис"), "denis");
        assert_eq!(remove_accents("Ångström"), "Angstrom");
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(slug(""), "");
        assert_eq!(slug("--- !!! ---"), "");
        assert_eq!(slug_with("9", &with("-", true)), "nine");
        assert_eq!(slug_with("a1", &with("-", true)), "a1");
    }

    fn assert_output_alphabet(options: &SlugOptions, shape: &str) {
        let shape = Regex::new(shape).unwrap();
        let alphabet: Vec<char> = (' '..='~').collect();
        let mut rng = rand::thread_rng();

        for _ in 0..200 {
            let len = rng.gen_range(1..40);
            let mut input: String = (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();
            input.push('x');

            let out = slug_with(&input, options);
            assert!(shape.is_match(&out), "{:?} -> {:?}", input, out);
        }
    }

    #[test]
    fn test_output_alphabet() {
        assert_output_alphabet(&SlugOptions::default(), r"^[a-z0-9]+(-[a-z0-9]+)*$");
    }

    #[test]
    fn test_output_alphabet_underscore_separator() {
        let options = SlugOptions::default().with_separator("_");
        assert_output_alphabet(&options, r"^[a-z0-9]+(_[a-z0-9]+)*$");
    }

    #[test]
    fn test_output_alphabet_without_separator() {
        let options = SlugOptions::default().with_separator("");
        assert_output_alphabet(&options, r"^[a-z0-9]*$");
    }
}
