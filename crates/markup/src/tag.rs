//! Tag parser for the text between `<` (or `</`) and `>`.
//!
//! Grammar, loosely: `name (key="value")*`. The name is a run of letters, marks and numbers
//! (general categories L*, M*, N*), so decomposed names like `e\u{301}` stay whole; every
//! token may be preceded by whitespace, which is skipped. Attribute scanning stops quietly at
//! the first clause that does not fit `key="value"`; what was parsed so far is kept. Closing
//! tags never carry attributes.
use crate::entities::unescape_attribute_value;
use crate::types::{Tag, TagKind};
use std::collections::BTreeMap;
use unicode_general_category::{GeneralCategory, get_general_category};

/// How an unsupported closing tag is written back into the plain text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CloseTagEcho {
    /// `</interior>`, the form the tag was written in.
    #[default]
    Literal,
    /// `<interior/>`, kept for output compatibility with older renderings.
    SelfClosing,
}

/// Parses a tag interior, reconstructing closing tags in the self-closed `<interior/>` form.
///
/// Note the default differs from [`ScanConfig`](crate::ScanConfig), which writes unsupported
/// closing tags back as `</interior>`; use [`parse_tag_with`] to pick the form.
pub fn parse_tag(interior: &str, kind: TagKind) -> Option<Tag> {
    parse_tag_with(interior, kind, CloseTagEcho::SelfClosing)
}

pub fn parse_tag_with(interior: &str, kind: TagKind, echo: CloseTagEcho) -> Option<Tag> {
    let mut cursor = TagCursor::new(interior);
    let name = cursor.scan_name()?;

    let mut attributes = BTreeMap::new();
    if kind.is_open() {
        while let Some((key, value)) = cursor.scan_attribute() {
            // Duplicate keys: last one wins.
            attributes.insert(key.to_string(), unescape_attribute_value(value).into_owned());
        }
        if !cursor.is_at_end() {
            log::trace!(
                target: "markup.tag",
                "stopped attribute scan in <{interior}> at byte {}",
                cursor.pos
            );
        }
    }

    let original = match (kind, echo) {
        (TagKind::Open, _) => format!("<{interior}>"),
        (TagKind::Close, CloseTagEcho::Literal) => format!("</{interior}>"),
        (TagKind::Close, CloseTagEcho::SelfClosing) => format!("<{interior}/>"),
    };
    Some(Tag::new(name.to_string(), attributes, original))
}

fn is_name_char(ch: char) -> bool {
    use GeneralCategory::*;
    matches!(
        get_general_category(ch),
        UppercaseLetter
            | LowercaseLetter
            | TitlecaseLetter
            | ModifierLetter
            | OtherLetter
            | NonspacingMark
            | SpacingMark
            | EnclosingMark
            | DecimalNumber
            | LetterNumber
            | OtherNumber
    )
}

struct TagCursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TagCursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// True when only whitespace remains.
    fn is_at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos == self.src.len()
    }

    fn scan_name(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, ch)| !is_name_char(ch))
            .map_or(rest.len(), |(idx, _)| idx);
        self.take(len)
    }

    /// Everything up to (not including) `delim`, or the rest of the input when `delim` never
    /// appears. `None` when nothing would be consumed.
    fn scan_up_to(&mut self, delim: char) -> Option<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest.find(delim).unwrap_or(rest.len());
        self.take(len)
    }

    fn expect(&mut self, ch: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn scan_attribute(&mut self) -> Option<(&'a str, &'a str)> {
        if self.is_at_end() {
            return None;
        }
        let key = self.scan_up_to('=')?;
        if !self.expect('=') || !self.expect('"') {
            return None;
        }
        let value = self.scan_up_to('"')?;
        if !self.expect('"') {
            return None;
        }
        Some((key, value))
    }

    fn take(&mut self, len: usize) -> Option<&'a str> {
        if len == 0 {
            return None;
        }
        let token = &self.src[self.pos..self.pos + len];
        self.pos += len;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(interior: &str) -> Tag {
        parse_tag(interior, TagKind::Open).expect("tag should parse")
    }

    #[test]
    fn parses_bare_name() {
        let tag = open("b");
        assert_eq!(tag.name(), "b");
        assert!(tag.attributes().is_empty());
        assert_eq!(tag.original(), "<b>");
    }

    #[test]
    fn empty_or_non_alphanumeric_name_fails() {
        assert_eq!(parse_tag("", TagKind::Open), None);
        assert_eq!(parse_tag("   ", TagKind::Open), None);
        assert_eq!(parse_tag("!--x--", TagKind::Open), None);
        assert_eq!(parse_tag("-b", TagKind::Close), None);
    }

    #[test]
    fn name_stops_at_first_non_alphanumeric() {
        assert_eq!(open("h1").name(), "h1");
        assert_eq!(open("my-tag").name(), "my");
        assert_eq!(open("a/").name(), "a");
        assert_eq!(open("ünï").name(), "ünï");
    }

    #[test]
    fn name_keeps_combining_marks() {
        let tag = open("e\u{301} k=\"v\"");
        assert_eq!(tag.name(), "e\u{301}");
        assert_eq!(tag.attribute("k"), Some("v"));

        let close = parse_tag("e\u{301}", TagKind::Close).expect("tag should parse");
        assert_eq!(close.name(), "e\u{301}");
        assert_eq!(open("x\u{20DD}\u{0903}").name(), "x\u{20DD}\u{0903}");
        assert_eq!(open("n\u{00B2}\u{2163}").name(), "n\u{00B2}\u{2163}");
    }

    #[test]
    fn leading_whitespace_before_name_is_skipped() {
        let tag = open("  b");
        assert_eq!(tag.name(), "b");
        assert_eq!(tag.original(), "<  b>");
    }

    #[test]
    fn parses_multiple_attributes() {
        let tag = open(r#"a href="https://example.com" title="Example""#);
        assert_eq!(tag.name(), "a");
        assert_eq!(tag.attribute("href"), Some("https://example.com"));
        assert_eq!(tag.attribute("title"), Some("Example"));
        assert_eq!(tag.attributes().len(), 2);
    }

    #[test]
    fn attribute_values_decode_quot_only() {
        let tag = open(r#"q cite="&quot;x&quot; &amp; y""#);
        assert_eq!(tag.attribute("cite"), Some(r#""x" &amp; y"#));
    }

    #[test]
    fn duplicate_attribute_keys_keep_last_value() {
        let tag = open(r#"b k="1" k="2""#);
        assert_eq!(tag.attribute("k"), Some("2"));
        assert_eq!(tag.attributes().len(), 1);
    }

    #[test]
    fn whitespace_around_equals_and_quotes_is_tolerated() {
        let tag = open(r#"b k = " v""#);
        // The key is everything up to `=`, trailing space included.
        assert_eq!(tag.attribute("k "), Some("v"));
    }

    #[test]
    fn malformed_clause_stops_attribute_scan_but_keeps_tag() {
        let tag = open(r#"b first="1" second=unquoted third="3""#);
        assert_eq!(tag.name(), "b");
        assert_eq!(tag.attribute("first"), Some("1"));
        assert_eq!(tag.attribute("second"), None);
        assert_eq!(tag.attribute("third"), None);

        let tag = open(r#"b k="unterminated"#);
        assert!(tag.attributes().is_empty());

        let tag = open(r#"b k="""#);
        assert!(tag.attributes().is_empty());

        let tag = open("b noequals");
        assert!(tag.attributes().is_empty());
    }

    #[test]
    fn closing_tags_skip_attribute_parsing() {
        let tag = parse_tag(r#"b k="v""#, TagKind::Close).expect("tag should parse");
        assert_eq!(tag.name(), "b");
        assert!(tag.attributes().is_empty());
    }

    #[test]
    fn closing_tag_original_depends_on_echo() {
        let legacy = parse_tag("b", TagKind::Close).expect("tag should parse");
        assert_eq!(legacy.original(), "<b/>");

        let literal =
            parse_tag_with("b", TagKind::Close, CloseTagEcho::Literal).expect("tag should parse");
        assert_eq!(literal.original(), "</b>");

        let open = parse_tag_with(r#"b k="v""#, TagKind::Open, CloseTagEcho::SelfClosing)
            .expect("tag should parse");
        assert_eq!(open.original(), r#"<b k="v">"#);
    }
}
