use serde::{Deserialize, Serialize};

const CODE_FENCE: &str = "```";

/// Formatting kind of one classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Paragraph,
    Heading2,
    Heading3,
    Bulleted,
    Numbered,
    Quote,
    Code,
}

/// One line of the body with its leading marker stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBlock {
    pub kind: BlockKind,
    pub text: String,
}

impl LineBlock {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Partitions body text into typed line-blocks.
///
/// Code-fence lines toggle a mode in which every line is emitted verbatim as
/// `Code`; the fence lines themselves produce no block. A blank line outside
/// a code block becomes an empty `Paragraph` block, the separator that
/// resets the running block kind downstream.
pub fn classify_blocks(body: &str) -> Vec<LineBlock> {
    let mut blocks = Vec::new();
    let mut in_code = false;

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(CODE_FENCE) {
            in_code = !in_code;
            continue;
        }
        if in_code {
            blocks.push(LineBlock::new(BlockKind::Code, line));
            continue;
        }
        if trimmed.is_empty() {
            blocks.push(LineBlock::new(BlockKind::Paragraph, ""));
            continue;
        }
        blocks.push(classify_line(trimmed));
    }

    blocks
}

fn classify_line(line: &str) -> LineBlock {
    if let Some(rest) = line.strip_prefix("### ") {
        return LineBlock::new(BlockKind::Heading3, rest);
    }
    // Level-1 and level-2 markers collapse to the same heading kind.
    if let Some(rest) = line.strip_prefix("## ").or_else(|| line.strip_prefix("# ")) {
        return LineBlock::new(BlockKind::Heading2, rest);
    }
    if let Some(rest) = line.strip_prefix("> ") {
        return LineBlock::new(BlockKind::Quote, rest);
    }
    if let Some(rest) = strip_numbered_marker(line) {
        return LineBlock::new(BlockKind::Numbered, rest);
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return LineBlock::new(BlockKind::Bulleted, rest);
    }
    LineBlock::new(BlockKind::Paragraph, line)
}

/// `1. item` style markers: one or more ASCII digits, a dot, one whitespace.
fn strip_numbered_marker(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let mut chars = rest.chars();
    match chars.next() {
        Some(ch) if ch.is_whitespace() => Some(chars.as_str()),
        _ => None,
    }
}
