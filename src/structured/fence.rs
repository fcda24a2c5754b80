const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// A triple-backtick block located inside a larger text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Byte offset of the opening fence.
    pub start: usize,
    /// Byte offset just past the closing fence.
    pub end: usize,
    /// Interior after the optional `json` tag and leading whitespace.
    pub body: &'a str,
}

/// Collect every fenced block in `text`, in order of appearance.
///
/// Each block is an opening fence, an optional `json` tag, optional
/// whitespace, and the shortest interior up to the next fence. An opening
/// fence with no closing fence ends the scan.
pub fn scan_fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut search_start = 0;

    while let Some(open_offset) = text[search_start..].find(FENCE) {
        let start = search_start + open_offset;
        let mut body_start = start + FENCE.len();
        if text[body_start..].starts_with(JSON_TAG) {
            body_start += JSON_TAG.len();
        }
        let after_tag = &text[body_start..];
        body_start += after_tag.len() - after_tag.trim_start().len();

        let Some(close_offset) = text[body_start..].find(FENCE) else {
            break;
        };
        let close = body_start + close_offset;
        let end = close + FENCE.len();

        blocks.push(FencedBlock {
            start,
            end,
            body: &text[body_start..close],
        });
        search_start = end;
    }

    blocks
}

/// The fenced block with the greatest start offset, wherever it sits.
///
/// Text after the block does not disqualify it.
pub fn last_fenced_block(text: &str) -> Option<FencedBlock<'_>> {
    scan_fenced_blocks(text)
        .into_iter()
        .max_by_key(|block| block.start)
}
