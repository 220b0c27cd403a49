//! Stable line format for scan results, used by golden fixtures.
//!
//! ```text
//! Text("hi & bye")
//! Occurrence(b 0..2 name="x") "hi"
//! EOF
//! ```
use crate::escape_text;
use markup::{ScanResult, TagOccurrence};
use std::fmt::Write;

pub const SNAPSHOT_FORMAT: &str = "markup-scan-v1";

pub fn format_scan(result: &ScanResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.occurrences.len() + 2);
    lines.push(format!("Text(\"{}\")", escape_text(&result.text)));
    for occurrence in &result.occurrences {
        lines.push(format_occurrence(result, occurrence));
    }
    lines.push("EOF".to_string());
    lines
}

fn format_occurrence(result: &ScanResult, occurrence: &TagOccurrence) -> String {
    let mut line = String::new();
    let _ = write!(
        &mut line,
        "Occurrence({} {}..{}",
        occurrence.tag.name(),
        occurrence.range.start,
        occurrence.range.end
    );
    for (key, value) in occurrence.tag.attributes() {
        let _ = write!(&mut line, " {}=\"{}\"", escape_text(key), escape_text(value));
    }
    line.push(')');
    match result.slice(occurrence) {
        Some(covered) => {
            let _ = write!(&mut line, " \"{}\"", escape_text(covered));
        }
        None => line.push_str(" <out of bounds>"),
    }
    line
}
