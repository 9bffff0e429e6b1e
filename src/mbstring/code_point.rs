use super::{TextMode, TextOps};

/// Counts Unicode scalar values
#[derive(Debug, Clone, Copy, Default)]
pub struct CodePointOps;

impl CodePointOps {
    /// Byte offset of the `index`-th code point, or the text length past the end
    fn byte_offset(text: &str, index: usize) -> usize {
        text.char_indices()
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(text.len())
    }

    fn chars_before(text: &str, byte_offset: usize) -> usize {
        text[..byte_offset].chars().count()
    }
}

impl TextOps for CodePointOps {
    fn mode(&self) -> TextMode {
        TextMode::CodePoint
    }

    fn len(&self, text: &str) -> usize {
        text.chars().count()
    }

    fn sub(&self, text: &str, start: usize, length: Option<usize>) -> String {
        let begin = Self::byte_offset(text, start);
        let rest = &text[begin..];
        let end = match length {
            Some(length) => Self::byte_offset(rest, length),
            None => rest.len(),
        };
        rest[..end].to_string()
    }

    fn index_of_from(&self, haystack: &str, needle: &str, offset: usize) -> Option<usize> {
        if offset > self.len(haystack) {
            return None;
        }

        let begin = Self::byte_offset(haystack, offset);
        let rest = &haystack[begin..];
        rest.find(needle)
            .map(|found| offset + Self::chars_before(rest, found))
    }

    fn last_index_of(&self, haystack: &str, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        haystack
            .rfind(needle)
            .map(|found| Self::chars_before(haystack, found))
    }

    fn to_lower(&self, text: &str) -> String {
        text.to_lowercase()
    }

    fn to_upper(&self, text: &str) -> String {
        text.to_uppercase()
    }

    fn fold_units(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                let mut lower = c.to_lowercase();
                match (lower.next(), lower.next()) {
                    (Some(folded), None) => folded,
                    _ => c,
                }
            })
            .collect()
    }
}
