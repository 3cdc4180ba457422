const FENCE: &str = "---";

const TITLE_KEYS: &[&str] = &["title"];
const TAG_KEYS: &[&str] = &["tags", "tag", "categories"];
const THUMBNAIL_KEYS: &[&str] = &["thumbnail", "eyecatch", "cover", "image"];

/// A parsed front-matter value: a scalar string or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Scalar(String),
    List(Vec<String>),
}

/// Key/value metadata parsed from a fenced header, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes {
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn title(&self) -> Option<&str> {
        self.first_scalar(TITLE_KEYS)
    }

    /// Tags under any of the accepted aliases; a scalar yields one tag.
    pub fn tags(&self) -> Vec<String> {
        for key in TAG_KEYS {
            match self.get(key) {
                Some(AttributeValue::List(items)) => return items.clone(),
                Some(AttributeValue::Scalar(value)) if !value.is_empty() => {
                    return vec![value.clone()];
                }
                _ => {}
            }
        }
        Vec::new()
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.first_scalar(THUMBNAIL_KEYS)
    }

    fn first_scalar(&self, keys: &[&str]) -> Option<&str> {
        for key in keys {
            match self.get(key) {
                Some(AttributeValue::Scalar(value)) if !value.is_empty() => {
                    return Some(value.as_str());
                }
                Some(AttributeValue::List(items)) => {
                    if let Some(first) = items.iter().find(|item| !item.is_empty()) {
                        return Some(first.as_str());
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn push(&mut self, key: &str, value: AttributeValue) {
        self.entries.push((key.to_string(), value));
    }

    /// Appends a dash item to the most recently seen key, converting a
    /// scalar entry into a list as needed. Ignored when no key exists yet.
    fn extend_last(&mut self, item: String) {
        let Some((_, value)) = self.entries.last_mut() else {
            return;
        };
        match value {
            AttributeValue::List(items) => items.push(item),
            AttributeValue::Scalar(existing) => {
                let mut items = Vec::new();
                if !existing.is_empty() {
                    items.push(std::mem::take(existing));
                }
                items.push(item);
                *value = AttributeValue::List(items);
            }
        }
    }
}

/// Splits a fenced metadata header from the body text.
///
/// The opening fence must be the first line; without a matching closing
/// fence the whole input is returned as the body. Malformed header lines
/// are skipped silently; this function never fails.
pub fn split_front_matter(text: &str) -> (Attributes, String) {
    let mut segments = text.split_inclusive('\n');
    let Some(first) = segments.next() else {
        return (Attributes::default(), text.to_string());
    };
    if first.trim_end() != FENCE {
        return (Attributes::default(), text.to_string());
    }

    let mut consumed = first.len();
    let mut header_lines = Vec::new();
    let mut closed = false;
    for segment in segments {
        consumed += segment.len();
        let line = segment.trim_end_matches(['\r', '\n']);
        if line.trim_end() == FENCE {
            closed = true;
            break;
        }
        header_lines.push(line);
    }
    if !closed {
        return (Attributes::default(), text.to_string());
    }

    (parse_header(&header_lines), text[consumed..].to_string())
}

fn parse_header(lines: &[&str]) -> Attributes {
    let mut attributes = Attributes::default();
    for raw in lines {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(item) = line.strip_prefix('-') {
            attributes.extend_last(strip_quotes(item.trim()).to_string());
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();
        if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            let items = inner
                .split(',')
                .map(|item| strip_quotes(item.trim()).to_string())
                .filter(|item| !item.is_empty())
                .collect();
            attributes.push(key, AttributeValue::List(items));
        } else {
            attributes.push(key, AttributeValue::Scalar(strip_quotes(value).to_string()));
        }
    }
    attributes
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
