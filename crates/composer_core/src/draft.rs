use std::path::PathBuf;

use url::Url;

use crate::frontmatter::split_front_matter;
use crate::headings::{insert_section_headings, HeadingSettings};
use crate::quotes::{SourceDocument, ELLIPSIS};

/// Title used when no candidate in the resolution chain yields text.
pub const FALLBACK_TITLE: &str = "untitled";

/// Where a thumbnail reference points. Remote images are classified, not
/// fetched; downloading belongs to the driver layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailSource {
    Local(PathBuf),
    Remote(Url),
}

/// Caller-supplied metadata that wins over parsed front matter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftOverrides {
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSettings {
    /// Hard cap on title length, in chars.
    pub max_title_chars: usize,
    /// Hard cap on body length, in chars; clamping prefers line boundaries.
    pub max_body_chars: usize,
    /// At most this many tags survive normalization.
    pub max_tags: usize,
    pub headings: HeadingSettings,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            max_title_chars: 100,
            max_body_chars: 50_000,
            max_tags: 10,
            headings: HeadingSettings::default(),
        }
    }
}

/// A finished draft, ready for the typing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftArticle {
    pub title: String,
    /// Body after heading insertion and clamping; what gets typed.
    pub body: String,
    /// Body as it came out of the front-matter split, before shaping.
    pub raw_body: String,
    pub tags: Vec<String>,
    pub thumbnail: Option<ThumbnailSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// Nothing left to publish once the front matter was stripped.
    EmptyBody,
}

impl std::fmt::Display for AssembleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssembleError::EmptyBody => write!(f, "draft body is empty"),
        }
    }
}

impl std::error::Error for AssembleError {}

/// Builds a [`DraftArticle`] from raw text and its context.
///
/// The title resolves through a fixed chain: override, front-matter
/// attribute, generated title, first source document's title, then
/// [`FALLBACK_TITLE`]; blank candidates are passed over. Override tags
/// replace attribute tags entirely when present. Parsing never fails here;
/// the only error is a body with no content at all.
pub fn assemble_draft(
    text: &str,
    generated_title: Option<&str>,
    sources: &[SourceDocument],
    overrides: &DraftOverrides,
    settings: &DraftSettings,
) -> Result<DraftArticle, AssembleError> {
    let (attributes, remainder) = split_front_matter(text);
    let raw_body = remainder.trim().to_string();
    if raw_body.is_empty() {
        return Err(AssembleError::EmptyBody);
    }

    let title_candidates = [
        overrides.title.as_deref(),
        attributes.title(),
        generated_title,
        sources.first().map(|source| source.title.as_str()),
    ];
    let title = title_candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(FALLBACK_TITLE);
    let title = clamp_chars(title, settings.max_title_chars);

    let tags = match &overrides.tags {
        Some(tags) => tags.clone(),
        None => attributes.tags(),
    };
    let tags = normalize_tags(tags, settings.max_tags);

    let thumbnail = overrides
        .thumbnail
        .as_deref()
        .or_else(|| attributes.thumbnail())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(classify_thumbnail);

    let body = insert_section_headings(&raw_body, &settings.headings);
    let body = clamp_body(&body, settings.max_body_chars);

    Ok(DraftArticle {
        title,
        body,
        raw_body,
        tags,
        thumbnail,
    })
}

/// Classifies a thumbnail reference: http(s) URLs are remote, everything
/// else is treated as a local path.
pub fn classify_thumbnail(value: &str) -> ThumbnailSource {
    if let Ok(url) = Url::parse(value) {
        if matches!(url.scheme(), "http" | "https") {
            return ThumbnailSource::Remote(url);
        }
    }
    ThumbnailSource::Local(PathBuf::from(value))
}

/// Trims, drops empties, deduplicates preserving first occurrence, caps.
pub fn normalize_tags(tags: Vec<String>, max_tags: usize) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || seen.iter().any(|existing| existing == tag) {
            continue;
        }
        seen.push(tag.to_string());
        if seen.len() == max_tags {
            break;
        }
    }
    seen
}

fn clamp_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}

/// Clamps the body to `max_chars` chars, cutting at the last newline that
/// fits so no line is left half-typed; falls back to a hard cut when the
/// text is one long line. Appends an ellipsis whenever content was lost.
fn clamp_body(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }
    let prefix: String = body.chars().take(max_chars).collect();
    let mut clamped = match prefix.rfind('\n') {
        Some(boundary) => prefix[..boundary].trim_end().to_string(),
        None => {
            let mut hard: String = body.chars().take(max_chars.saturating_sub(1)).collect();
            hard.truncate(hard.trim_end().len());
            hard
        }
    };
    clamped.push(ELLIPSIS);
    clamped
}
