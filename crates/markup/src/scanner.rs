//! Single-pass markup scanner.
//!
//! Splits the source into literal runs, `<...>` tags and `&...;` entities. Supported tags are
//! stripped and tracked on an open-element stack; each close that finds an open tag of the same
//! name yields a [`TagOccurrence`] over the plain text written in between. Unsupported tags are
//! written back as text. Nothing here fails: malformed markup degrades to text or is dropped.
//!
//! Offsets are code points of the output. A running count is kept alongside the output buffer
//! so no step rescans earlier output.
use crate::entities::decode_entity;
use crate::tag::{CloseTagEcho, parse_tag_with};
use crate::types::{ScanResult, Tag, TagKind, TagOccurrence};
use memchr::{memchr, memchr2};
use std::collections::HashMap;
use tools::utf8::char_len;

/// Tag name written as a newline instead of being tracked.
pub const LINE_BREAK_TAG: &str = "br";

/// Scan options. The default writes unsupported closing tags back as `</name>`, unlike
/// [`parse_tag`](crate::parse_tag), which reconstructs them as `<name/>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanConfig {
    pub close_tag_echo: CloseTagEcho,
}

/// Allow-list of tag names, matched case-sensitively.
///
/// Each distinct name gets a slot; the scanner keeps one open-tag stack per slot.
#[derive(Clone, Debug, Default)]
pub struct SupportedTags {
    slots: HashMap<String, usize>,
}

impl SupportedTags {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots = HashMap::new();
        for name in names {
            let next = slots.len();
            slots.entry(name.as_ref().to_string()).or_insert(next);
        }
        Self { slots }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }
}

/// Reusable scanner: configuration only, no per-scan state.
#[derive(Clone, Debug, Default)]
pub struct TagScanner {
    supported: SupportedTags,
    config: ScanConfig,
}

impl TagScanner {
    pub fn new(supported: SupportedTags, config: ScanConfig) -> Self {
        Self { supported, config }
    }

    pub fn supported(&self) -> &SupportedTags {
        &self.supported
    }

    pub fn config(&self) -> ScanConfig {
        self.config
    }

    pub fn scan(&self, source: &str) -> ScanResult {
        let bytes = source.as_bytes();
        let mut state = ScanState::new(source.len(), self.supported.len());
        let mut i = 0;
        // Slice endpoints are only ever taken at ASCII delimiters (`<`, `/`, `>`, `&`, `;`),
        // so they are always char boundaries.
        while i < bytes.len() {
            let run_end = memchr2(b'<', b'&', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
            if run_end > i {
                debug_assert!(source.is_char_boundary(run_end));
                state.push_str(&source[i..run_end]);
                i = run_end;
                continue;
            }

            if bytes[i] == b'<' {
                i += 1;
                let kind = if bytes.get(i) == Some(&b'/') {
                    i += 1;
                    TagKind::Close
                } else {
                    TagKind::Open
                };
                let Some(rel) = memchr(b'>', &bytes[i..]) else {
                    log::trace!(
                        target: "markup.scanner",
                        "unterminated tag at byte {i}; dropping {} trailing bytes",
                        bytes.len() - i
                    );
                    break;
                };
                let interior = &source[i..i + rel];
                self.handle_tag(&mut state, interior, kind);
                i += rel + 1;
            } else {
                i += 1;
                let end = memchr(b';', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
                let name = &source[i..end];
                match decode_entity(name) {
                    Some(ch) => state.push_char(ch),
                    None => log::trace!(
                        target: "markup.scanner",
                        "dropping unknown entity &{name};"
                    ),
                }
                i = (end + 1).min(bytes.len());
            }
        }
        state.finish()
    }

    fn handle_tag(&self, state: &mut ScanState, interior: &str, kind: TagKind) {
        let parsed = parse_tag_with(interior, kind, self.config.close_tag_echo);
        let (tag, slot) = match parsed {
            Some(tag) => match self.supported.slot(tag.name()) {
                Some(slot) => (tag, slot),
                None => {
                    state.push_str(tag.original());
                    return;
                }
            },
            None => {
                log::trace!(target: "markup.scanner", "dropping unparseable tag <{interior}>");
                return;
            }
        };

        if tag.name() == LINE_BREAK_TAG {
            state.push_char('\n');
            return;
        }

        match kind {
            TagKind::Open => state.open(slot, tag),
            TagKind::Close => state.close(slot),
        }
    }
}

/// Scans `source` with the default configuration.
pub fn detect_tags<S: AsRef<str>>(source: &str, supported_tags: &[S]) -> ScanResult {
    detect_tags_with(source, supported_tags, ScanConfig::default())
}

pub fn detect_tags_with<S: AsRef<str>>(
    source: &str,
    supported_tags: &[S],
    config: ScanConfig,
) -> ScanResult {
    TagScanner::new(SupportedTags::new(supported_tags), config).scan(source)
}

#[derive(Debug)]
struct OpenTag {
    tag: Tag,
    start: usize,
}

/// Working state for one scan.
///
/// The open-element stack is kept per tag name: a close only ever matches the most recent open
/// of its own name, wherever that sits in the overall stack, and the opens above it stay
/// pending. Splitting by name keeps that lookup O(1) without changing which open matches.
struct ScanState {
    text: String,
    text_chars: usize,
    open: Vec<Vec<OpenTag>>,
    occurrences: Vec<TagOccurrence>,
}

impl ScanState {
    fn new(capacity: usize, slots: usize) -> Self {
        let mut open = Vec::new();
        open.resize_with(slots, Vec::new);
        Self {
            text: String::with_capacity(capacity),
            text_chars: 0,
            open,
            occurrences: Vec::new(),
        }
    }

    fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.text_chars += char_len(s);
    }

    fn push_char(&mut self, ch: char) {
        self.text.push(ch);
        self.text_chars += 1;
    }

    fn open(&mut self, slot: usize, tag: Tag) {
        self.open[slot].push(OpenTag {
            tag,
            start: self.text_chars,
        });
    }

    fn close(&mut self, slot: usize) {
        match self.open[slot].pop() {
            Some(OpenTag { tag, start }) => {
                debug_assert!(start <= self.text_chars);
                self.occurrences.push(TagOccurrence {
                    tag,
                    range: start..self.text_chars,
                });
            }
            None => log::trace!(
                target: "markup.scanner",
                "discarding close tag with no matching open at char {}",
                self.text_chars
            ),
        }
    }

    fn finish(self) -> ScanResult {
        let unmatched: usize = self.open.iter().map(Vec::len).sum();
        if unmatched > 0 {
            log::trace!(
                target: "markup.scanner",
                "{unmatched} open tag(s) never closed; discarding"
            );
        }
        ScanResult {
            text: self.text,
            occurrences: self.occurrences,
        }
    }
}
