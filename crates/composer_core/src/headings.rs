#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingSettings {
    /// Minimum paragraph count before any heading is inserted.
    pub min_paragraphs: usize,
    /// A level-2 heading goes before every Nth paragraph; clamped to >= 1.
    pub every: usize,
    /// A level-3 heading before every Mth paragraph that is not already a
    /// level-2 boundary; 0 disables level-3 headings.
    pub sub_every: usize,
    /// Character length a sentence-accumulated paragraph aims for when the
    /// body has no blank-line structure.
    pub sentence_target_len: usize,
    pub section_label: String,
    pub detail_label: String,
}

impl Default for HeadingSettings {
    fn default() -> Self {
        Self {
            min_paragraphs: 3,
            every: 3,
            sub_every: 2,
            sentence_target_len: 120,
            section_label: "Section".to_string(),
            detail_label: "Detail".to_string(),
        }
    }
}

/// Inserts numbered `##`/`###` headings into heading-less prose.
///
/// A body that already carries a level-2/3 heading marker is returned
/// unchanged, which also makes the insertion idempotent.
pub fn insert_section_headings(body: &str, settings: &HeadingSettings) -> String {
    if has_heading_marker(body) {
        return body.to_string();
    }

    let paragraphs = split_paragraphs(body, settings.sentence_target_len);
    if paragraphs.len() < settings.min_paragraphs {
        return body.to_string();
    }

    let every = settings.every.max(1);
    let mut section = 0usize;
    let mut detail = 0usize;
    let mut out = String::new();
    for (index, paragraph) in paragraphs.iter().enumerate() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        if index % every == 0 {
            section += 1;
            out.push_str(&format!("## {} {}\n\n", settings.section_label, section));
        } else if settings.sub_every > 0 && index % settings.sub_every == 0 {
            detail += 1;
            out.push_str(&format!("### {} {}\n\n", settings.detail_label, detail));
        }
        out.push_str(paragraph);
    }
    out
}

fn has_heading_marker(body: &str) -> bool {
    body.lines().any(|line| {
        let trimmed = line.trim_start();
        trimmed.starts_with("## ") || trimmed.starts_with("### ")
    })
}

/// Blank-line paragraphs, falling back to sentence accumulation when the
/// body is a single unbroken paragraph.
fn split_paragraphs(body: &str, sentence_target_len: usize) -> Vec<String> {
    let by_blank_lines = split_on_blank_lines(body);
    if by_blank_lines.len() > 1 {
        return by_blank_lines;
    }
    let single = by_blank_lines.into_iter().next().unwrap_or_default();
    split_by_sentences(&single, sentence_target_len)
}

fn split_on_blank_lines(body: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

fn split_by_sentences(text: &str, target_len: usize) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut sentence = String::new();
    let mut sentence_len = 0usize;

    for ch in text.chars() {
        sentence.push(ch);
        sentence_len += 1;
        if is_sentence_terminator(ch) {
            current.push_str(&sentence);
            current_len += sentence_len;
            sentence.clear();
            sentence_len = 0;
            if current_len >= target_len {
                paragraphs.push(std::mem::take(&mut current).trim().to_string());
                current_len = 0;
            }
        }
    }

    // Residual text without a terminator still belongs to the last paragraph.
    if !sentence.trim().is_empty() {
        current.push_str(&sentence);
    }
    let rest = current.trim();
    if !rest.is_empty() {
        paragraphs.push(rest.to_string());
    }
    paragraphs
}

fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '。' | '！' | '？')
}
