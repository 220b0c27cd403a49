//! Pattern detection over plain text.
//!
//! Ranges are half-open code-point offsets, in match order and non-overlapping, so they line up
//! with the ranges the markup scanner reports for the same text.
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::ops::Range;
use tools::utf8::CharCursor;

pub const HASHTAG_PATTERN: &str = r"[#]\w\S*\b";
pub const MENTION_PATTERN: &str = r"[@]\w\S*\b";

lazy_static! {
    static ref HASHTAG: Detector =
        Detector::new(HASHTAG_PATTERN).expect("hashtag pattern is valid");
    static ref MENTION: Detector =
        Detector::new(MENTION_PATTERN).expect("mention pattern is valid");
}

#[derive(Debug)]
pub enum DetectError {
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectError::InvalidPattern { pattern, source } => {
                write!(f, "invalid detection pattern {pattern:?}: {source}")
            }
        }
    }
}

impl std::error::Error for DetectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DetectError::InvalidPattern { source, .. } => Some(source),
        }
    }
}

/// A compiled pattern.
#[derive(Clone, Debug)]
pub struct Detector {
    regex: Regex,
}

impl Detector {
    pub fn new(pattern: &str) -> Result<Self, DetectError> {
        let regex = Regex::new(pattern).map_err(|source| DetectError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        let mut cursor = CharCursor::new(text);
        self.regex
            .find_iter(text)
            .map(|m| cursor.char_range(m.range()))
            .collect()
    }
}

pub fn detect_hashtags(text: &str) -> Vec<Range<usize>> {
    HASHTAG.find_ranges(text)
}

pub fn detect_mentions(text: &str) -> Vec<Range<usize>> {
    MENTION.find_ranges(text)
}

/// Runs an ad-hoc pattern. A pattern that does not compile detects nothing.
pub fn detect(text: &str, pattern: &str) -> Vec<Range<usize>> {
    match Detector::new(pattern) {
        Ok(detector) => detector.find_ranges(text),
        Err(err) => {
            log::warn!(target: "detect", "{err}; reporting no matches");
            Vec::new()
        }
    }
}
