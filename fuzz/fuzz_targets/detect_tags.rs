#![no_main]

use libfuzzer_sys::fuzz_target;
use markup::{CloseTagEcho, ScanConfig, detect_tags_with};

const SUPPORTED: &[&str] = &["a", "b", "i", "p", "br"];

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    for echo in [CloseTagEcho::Literal, CloseTagEcho::SelfClosing] {
        let result = detect_tags_with(source, SUPPORTED, ScanConfig { close_tag_echo: echo });
        let len = result.text.chars().count();
        for occurrence in &result.occurrences {
            assert!(occurrence.range.start <= occurrence.range.end);
            assert!(occurrence.range.end <= len);
            assert!(SUPPORTED.contains(&occurrence.tag.name()));
            assert_ne!(occurrence.tag.name(), "br");
        }
        if !source.contains(['<', '&']) {
            assert_eq!(result.text, source);
            assert!(result.occurrences.is_empty());
        }
    }
});
