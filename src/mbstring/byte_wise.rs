use super::{TextMode, TextOps};

/// Counts raw bytes and folds ASCII only.
///
/// Substring bounds that fall inside a multibyte sequence are narrowed to
/// the enclosing character boundaries, so a result never exceeds the
/// requested number of bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteOps;

impl TextOps for ByteOps {
    fn mode(&self) -> TextMode {
        TextMode::Bytes
    }

    fn len(&self, text: &str) -> usize {
        text.len()
    }

    fn sub(&self, text: &str, start: usize, length: Option<usize>) -> String {
        let mut begin = start.min(text.len());
        while !text.is_char_boundary(begin) {
            begin += 1;
        }

        let mut end = match length {
            Some(length) => start.saturating_add(length).min(text.len()),
            None => text.len(),
        };
        while !text.is_char_boundary(end) {
            end -= 1;
        }

        text[begin..end.max(begin)].to_string()
    }

    fn index_of_from(&self, haystack: &str, needle: &str, offset: usize) -> Option<usize> {
        let bytes = haystack.as_bytes();
        if offset > bytes.len() {
            return None;
        }
        if needle.is_empty() {
            return Some(offset);
        }

        bytes[offset..]
            .windows(needle.len())
            .position(|window| window == needle.as_bytes())
            .map(|found| offset + found)
    }

    fn last_index_of(&self, haystack: &str, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }

        haystack
            .as_bytes()
            .windows(needle.len())
            .rposition(|window| window == needle.as_bytes())
    }

    fn to_lower(&self, text: &str) -> String {
        text.to_ascii_lowercase()
    }

    fn to_upper(&self, text: &str) -> String {
        text.to_ascii_uppercase()
    }

    fn fold_units(&self, text: &str) -> String {
        text.to_ascii_lowercase()
    }
}
