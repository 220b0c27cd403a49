/// Code-point offset helpers over UTF-8 strings.
///
/// Ranges handed out by the scanner and the detectors are measured in Unicode scalar values
/// (code points), while Rust slices index bytes. These helpers translate between the two
/// without allocating.
use std::ops::Range;

/// Number of code points in `s`.
pub fn char_len(s: &str) -> usize {
    if s.is_ascii() {
        return s.len();
    }
    s.chars().count()
}

/// Byte offset of the code point at `char_offset`, or `s.len()` when the offset is exactly
/// one past the last code point. Returns `None` past the end.
pub fn byte_offset(s: &str, char_offset: usize) -> Option<usize> {
    if s.is_ascii() {
        return (char_offset <= s.len()).then_some(char_offset);
    }
    if char_offset == 0 {
        return Some(0);
    }
    let mut seen = 0usize;
    for (idx, _) in s.char_indices() {
        if seen == char_offset {
            return Some(idx);
        }
        seen += 1;
    }
    (seen == char_offset).then_some(s.len())
}

/// Converts a code-point range to the equivalent byte range in `s`.
pub fn byte_range(s: &str, chars: Range<usize>) -> Option<Range<usize>> {
    if chars.start > chars.end {
        return None;
    }
    let start = byte_offset(s, chars.start)?;
    let rest = byte_offset(&s[start..], chars.end - chars.start)?;
    Some(start..start + rest)
}

/// Slices `s` by a code-point range.
pub fn slice_chars(s: &str, chars: Range<usize>) -> Option<&str> {
    byte_range(s, chars).map(|bytes| &s[bytes])
}

/// Translates byte offsets into code-point offsets for a single string.
///
/// Queries must be non-decreasing and land on char boundaries; each call only walks the bytes
/// between the previous query and this one, so converting an ordered list of match ranges is
/// linear in the length of `s`.
#[derive(Debug)]
pub struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    pub fn char_offset(&mut self, byte: usize) -> usize {
        debug_assert!(byte >= self.byte, "char cursor queries must be non-decreasing");
        debug_assert!(self.text.is_char_boundary(byte));
        if byte > self.byte {
            self.chars += char_len(&self.text[self.byte..byte]);
            self.byte = byte;
        }
        self.chars
    }

    pub fn char_range(&mut self, bytes: Range<usize>) -> Range<usize> {
        let start = self.char_offset(bytes.start);
        let end = self.char_offset(bytes.end);
        start..end
    }
}
