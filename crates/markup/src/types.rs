use std::collections::BTreeMap;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Whether a `<...>` construct opens or closes an element (`</...>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    Open,
    Close,
}

impl TagKind {
    pub fn is_open(self) -> bool {
        matches!(self, TagKind::Open)
    }
}

/// A parsed tag: its name, decoded attributes, and the source text to fall back to when the
/// tag is not supported by the caller.
///
/// Attributes are only ever parsed for opening tags.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Tag {
    name: String,
    attributes: BTreeMap<String, String>,
    original: String,
}

impl Tag {
    pub(crate) fn new(name: String, attributes: BTreeMap<String, String>, original: String) -> Self {
        debug_assert!(!name.is_empty(), "tag names are never empty");
        Self {
            name,
            attributes,
            original,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Reconstructed source text, delimiters included.
    pub fn original(&self) -> &str {
        &self.original
    }
}

/// A supported tag together with the plain-text range it spans.
///
/// `range` is half-open and measured in code points of [`ScanResult::text`]. `tag` is the
/// opening tag, so its attributes are the ones written on the open.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TagOccurrence {
    pub tag: Tag,
    pub range: Range<usize>,
}

impl TagOccurrence {
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    pub fn is_empty(&self) -> bool {
        self.range.start == self.range.end
    }
}

/// Output of a scan: the plain text and the occurrences in the order their closing tags were
/// found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ScanResult {
    pub text: String,
    pub occurrences: Vec<TagOccurrence>,
}

impl ScanResult {
    pub fn occurrences_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a TagOccurrence> + 'a {
        self.occurrences
            .iter()
            .filter(move |occurrence| occurrence.tag.name() == name)
    }

    /// The slice of plain text covered by `occurrence`.
    pub fn slice(&self, occurrence: &TagOccurrence) -> Option<&str> {
        tools::utf8::slice_chars(&self.text, occurrence.range.clone())
    }

    pub fn into_parts(self) -> (String, Vec<TagOccurrence>) {
        (self.text, self.occurrences)
    }
}
