#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let len = text.chars().count();
    for ranges in [detect::detect_hashtags(text), detect::detect_mentions(text)] {
        let mut last_end = 0;
        for range in ranges {
            assert!(last_end <= range.start && range.start < range.end && range.end <= len);
            last_end = range.end;
        }
    }
});
