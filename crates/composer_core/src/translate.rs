use serde::{Deserialize, Serialize};

use crate::blocks::{BlockKind, LineBlock};
use crate::inline::{segment_inline, InlineStyle};

/// One editor-level command produced by the translator. The consumer maps
/// these onto real key presses via [`crate::ShortcutMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorAction {
    /// Switch the current block format.
    BlockShortcut(BlockKind),
    /// Flip one inline emphasis state.
    InlineToggle(InlineStyle),
    /// Type literal text at the caret.
    TypeText(String),
    /// End the current line.
    PressEnter,
}

/// Translates classified line blocks into the ordered action sequence that
/// reproduces them inside the editor.
///
/// The translator tracks a running block kind, starting at
/// [`BlockKind::Paragraph`], and emits a [`EditorAction::BlockShortcut`] only
/// when a block's kind differs from the running one. Inline toggles are
/// emitted as diffs against the live emphasis state and are always closed
/// before the line ends, so no style leaks across lines. Container blocks
/// (lists and quotes) get one extra [`EditorAction::PressEnter`] when the
/// following block is of another kind, which is how the editor leaves the
/// container.
pub fn translate_blocks(blocks: &[LineBlock]) -> Vec<EditorAction> {
    let mut actions = Vec::new();
    let mut current = BlockKind::Paragraph;
    for (index, block) in blocks.iter().enumerate() {
        if block.kind != current {
            actions.push(EditorAction::BlockShortcut(block.kind));
            current = block.kind;
        }
        if block.kind == BlockKind::Code {
            // Code lines carry their text verbatim, markers and all.
            if !block.text.is_empty() {
                actions.push(EditorAction::TypeText(block.text.clone()));
            }
        } else {
            push_styled_text(&mut actions, &block.text);
        }
        actions.push(EditorAction::PressEnter);
        if is_container(block.kind) && next_kind_differs(blocks, index, block.kind) {
            actions.push(EditorAction::PressEnter);
        }
    }
    actions
}

/// The text a reader would see in the editor once the actions ran: block
/// markers are already stripped by the classifier, inline markers collapse
/// into styling, code lines stay verbatim.
pub fn visible_text(blocks: &[LineBlock]) -> String {
    let lines: Vec<String> = blocks
        .iter()
        .map(|block| {
            if block.kind == BlockKind::Code {
                block.text.clone()
            } else {
                segment_inline(&block.text)
                    .into_iter()
                    .map(|segment| segment.text)
                    .collect()
            }
        })
        .collect();
    lines.join("\n")
}

fn push_styled_text(actions: &mut Vec<EditorAction>, text: &str) {
    let mut bold_on = false;
    let mut strike_on = false;
    for segment in segment_inline(text) {
        if segment.bold != bold_on {
            actions.push(EditorAction::InlineToggle(InlineStyle::Bold));
            bold_on = segment.bold;
        }
        if segment.strike != strike_on {
            actions.push(EditorAction::InlineToggle(InlineStyle::Strike));
            strike_on = segment.strike;
        }
        actions.push(EditorAction::TypeText(segment.text));
    }
    if bold_on {
        actions.push(EditorAction::InlineToggle(InlineStyle::Bold));
    }
    if strike_on {
        actions.push(EditorAction::InlineToggle(InlineStyle::Strike));
    }
}

fn is_container(kind: BlockKind) -> bool {
    matches!(
        kind,
        BlockKind::Bulleted | BlockKind::Numbered | BlockKind::Quote
    )
}

fn next_kind_differs(blocks: &[LineBlock], index: usize, kind: BlockKind) -> bool {
    match blocks.get(index + 1) {
        Some(next) => next.kind != kind,
        None => false,
    }
}
