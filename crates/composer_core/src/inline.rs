use serde::{Deserialize, Serialize};

/// An emphasis toggle a shortcut can flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InlineStyle {
    Bold,
    Strike,
}

/// A contiguous run of text sharing one emphasis state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSegment {
    pub text: String,
    pub bold: bool,
    pub strike: bool,
}

/// Splits one line into runs tagged with emphasis state.
///
/// `**` toggles bold and `~~` toggles strike. The markers are stateful
/// toggles, not balanced pairs: an odd marker count leaves that style on
/// through the end of the line. State resets between lines by construction
/// (each call starts with both flags off). Concatenating the emitted
/// segments' text reproduces the input with all marker substrings removed.
pub fn segment_inline(line: &str) -> Vec<InlineSegment> {
    let chars: Vec<char> = line.chars().collect();
    let mut segments = Vec::new();
    let mut buffer = String::new();
    let mut bold = false;
    let mut strike = false;

    let mut i = 0;
    while i < chars.len() {
        let pair = (chars[i], chars.get(i + 1).copied());
        match pair {
            ('*', Some('*')) => {
                flush(&mut segments, &mut buffer, bold, strike);
                bold = !bold;
                i += 2;
            }
            ('~', Some('~')) => {
                flush(&mut segments, &mut buffer, bold, strike);
                strike = !strike;
                i += 2;
            }
            (ch, _) => {
                buffer.push(ch);
                i += 1;
            }
        }
    }
    flush(&mut segments, &mut buffer, bold, strike);

    segments
}

fn flush(segments: &mut Vec<InlineSegment>, buffer: &mut String, bold: bool, strike: bool) {
    if buffer.is_empty() {
        return;
    }
    segments.push(InlineSegment {
        text: std::mem::take(buffer),
        bold,
        strike,
    });
}
