use std::collections::HashSet;

/// Marker appended to truncated quote and body text.
pub const ELLIPSIS: char = '…';

/// Bounds for quote extraction; all lengths count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSettings {
    /// Total quotes selected across all documents.
    pub limit: usize,
    /// Quotes accepted from a single document.
    pub per_document: usize,
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            limit: 8,
            per_document: 3,
            min_len: 20,
            max_len: 120,
        }
    }
}

/// One scraped source document, already reduced to text blocks by the
/// (external) extraction layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub url: String,
    pub title: String,
    pub blocks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub source_url: String,
    pub source_title: String,
}

/// Selects quotable blocks in stable order: documents as given, blocks in
/// document order. Short blocks are skipped, long ones truncated to
/// `max_len - 1` characters plus an ellipsis, exact duplicates dropped.
pub fn select_quotes(documents: &[SourceDocument], settings: &QuoteSettings) -> Vec<Quote> {
    let mut selected: Vec<Quote> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for document in documents {
        let mut taken = 0usize;
        for block in &document.blocks {
            if selected.len() >= settings.limit {
                return selected;
            }
            if taken >= settings.per_document {
                break;
            }
            let trimmed = block.trim();
            let char_len = trimmed.chars().count();
            if char_len < settings.min_len {
                continue;
            }
            let text = if char_len > settings.max_len {
                truncate_with_ellipsis(trimmed, settings.max_len)
            } else {
                trimmed.to_string()
            };
            if !seen.insert(text.clone()) {
                continue;
            }
            selected.push(Quote {
                text,
                source_url: document.url.clone(),
                source_title: document.title.clone(),
            });
            taken += 1;
        }
        if selected.len() >= settings.limit {
            break;
        }
    }

    selected
}

fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    let mut truncated: String = text.chars().take(max_len.saturating_sub(1)).collect();
    truncated.push(ELLIPSIS);
    truncated
}
