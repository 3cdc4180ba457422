//! Composer core: pure draft assembly and markdown-to-editor translation.
mod blocks;
mod draft;
mod frontmatter;
mod headings;
mod inline;
mod quotes;
mod shortcuts;
mod translate;

pub use blocks::{classify_blocks, BlockKind, LineBlock};
pub use draft::{
    assemble_draft, classify_thumbnail, normalize_tags, AssembleError, DraftArticle,
    DraftOverrides, DraftSettings, ThumbnailSource, FALLBACK_TITLE,
};
pub use frontmatter::{split_front_matter, AttributeValue, Attributes};
pub use headings::{insert_section_headings, HeadingSettings};
pub use inline::{segment_inline, InlineSegment, InlineStyle};
pub use quotes::{select_quotes, Quote, QuoteSettings, SourceDocument, ELLIPSIS};
pub use shortcuts::{Key, KeyCombo, Platform, ShortcutMap};
pub use translate::{translate_blocks, visible_text, EditorAction};
