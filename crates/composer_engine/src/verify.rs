use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

/// Which of the two typing paths produced the field's final content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedOutcome {
    /// Synthetic keystrokes landed and the read-back check passed.
    Typed,
    /// The read-back check failed; content was assigned programmatically.
    Injected,
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn normalize_ws(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}

pub fn title_matches(intended: &str, read_back: &str) -> bool {
    normalize_ws(intended) == normalize_ws(read_back)
}

/// Length-ratio check for rich bodies, where formatting markup makes exact
/// comparison meaningless. Passes when the read-back text is at least
/// `min_ratio` of the intended length after normalization.
pub fn body_meets_ratio(intended: &str, read_back: &str, min_ratio: f64) -> bool {
    let intended_len = normalize_ws(intended).chars().count();
    if intended_len == 0 {
        return true;
    }
    let actual_len = normalize_ws(read_back).chars().count();
    actual_len as f64 >= intended_len as f64 * min_ratio
}

/// Text a reader would see in an editor fragment: tag structure flattened,
/// block-level boundaries turned into newlines, whitespace collapsed.
pub fn flatten_visible_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut ctx = FlattenContext::new();
    for child in fragment.root_element().children() {
        visit_node(child, &mut ctx);
    }
    ctx.into_text()
}

fn visit_node(node: NodeRef<'_, Node>, ctx: &mut FlattenContext) {
    match node.value() {
        Node::Text(text) => ctx.append_text(text),
        Node::Element(element) => {
            let tag = element.name().to_ascii_lowercase();
            match tag.as_str() {
                "script" | "style" | "noscript" | "template" => {}
                "br" => ctx.ensure_newline(),
                "p" | "div" | "li" | "ul" | "ol" | "blockquote" | "pre" | "section"
                | "article" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    ctx.ensure_newline();
                    visit_children(node, ctx);
                    ctx.ensure_newline();
                }
                _ => visit_children(node, ctx),
            }
        }
        _ => visit_children(node, ctx),
    }
}

fn visit_children(node: NodeRef<'_, Node>, ctx: &mut FlattenContext) {
    for child in node.children() {
        visit_node(child, ctx);
    }
}

struct FlattenContext {
    builder: String,
    last_char: Option<char>,
}

impl FlattenContext {
    fn new() -> Self {
        Self {
            builder: String::new(),
            last_char: None,
        }
    }

    fn into_text(self) -> String {
        self.builder.trim().to_string()
    }

    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if self.last_char == Some(' ') || self.last_char == Some('\n') {
                    continue;
                }
                self.push_char(' ');
            } else {
                self.push_char(ch);
            }
        }
    }

    fn ensure_newline(&mut self) {
        if self.last_char == Some('\n') || self.builder.is_empty() {
            return;
        }
        self.push_char('\n');
    }

    fn push_char(&mut self, ch: char) {
        self.builder.push(ch);
        self.last_char = Some(ch);
    }
}
