pub const BLOCK_TEMPLATE: &str =
    r#"<p class="box">hello <b>bold &amp; <i>italic</i></b><br>@user #tag</p>"#;

pub const BLOCK_SUPPORTED_TAGS: &[&str] = &["p", "b", "br"];

pub fn make_blocks(blocks: usize) -> String {
    let mut source = String::with_capacity(BLOCK_TEMPLATE.len() * blocks);
    for _ in 0..blocks {
        source.push_str(BLOCK_TEMPLATE);
    }
    source
}

/// Worst case for the open-tag stacks: every open stays pending and every close misses.
pub fn make_unbalanced(pairs: usize) -> String {
    let mut source = String::with_capacity(pairs * 8);
    for _ in 0..pairs {
        source.push_str("<p>");
    }
    for _ in 0..pairs {
        source.push_str("</b>");
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect_tags;

    const SMOKE_BLOCKS: usize = 512;
    // Per block: </b> then </p> close; <br> and <i> produce none.
    const OCCURRENCES_PER_BLOCK: usize = 2;

    #[test]
    fn perf_guard_smoke_occurrence_counts() {
        let input = make_blocks(SMOKE_BLOCKS);
        let result = detect_tags(&input, BLOCK_SUPPORTED_TAGS);
        assert_eq!(
            result.occurrences.len(),
            SMOKE_BLOCKS * OCCURRENCES_PER_BLOCK,
            "unexpected occurrence count for smoke input"
        );
        let block_text = "hello bold & <i>italic</i>\n@user #tag";
        assert_eq!(result.text, block_text.repeat(SMOKE_BLOCKS));
    }
}
