//! Scanner for a small markup dialect: strips supported tags into ranges over the plain text,
//! writes unsupported tags back as text, and decodes five named entities.
//!
//! ```
//! let result = markup::detect_tags(r#"<b name="x">hi</b> &amp; bye"#, &["b"]);
//! assert_eq!(result.text, "hi & bye");
//! assert_eq!(result.occurrences[0].range, 0..2);
//! assert_eq!(result.occurrences[0].tag.attribute("name"), Some("x"));
//! ```
pub mod entities;
pub mod perf_fixtures;
pub mod scanner;
pub mod tag;

mod types;

pub use crate::entities::{NAMED_ENTITIES, decode_entity};
pub use crate::scanner::{
    LINE_BREAK_TAG, ScanConfig, SupportedTags, TagScanner, detect_tags, detect_tags_with,
};
pub use crate::tag::{CloseTagEcho, parse_tag, parse_tag_with};
pub use crate::types::{ScanResult, Tag, TagKind, TagOccurrence};
