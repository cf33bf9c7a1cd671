//! Flattens a `PageView` into plain terminal rows.
//!
//! Each row carries a single theme tone; inline emphasis is dropped.

use std::mem;

use folio_protocol::{Layout, Node, PageView, ThemeToken};

/// Logical pixels per terminal column.
pub const COLUMN_PX: f64 = 8.0;

/// Desktop content is capped like the markup's 900px column.
const DESKTOP_MAX_COLS: u16 = 112;

/// Viewport width in logical pixels for a terminal `cols` wide.
pub fn logical_width(cols: u16) -> f64 {
    f64::from(cols) * COLUMN_PX
}

/// Usable text width for `cols` columns, leaving a one-column margin each side.
pub fn content_width(cols: u16, layout: Layout) -> usize {
    let cols = match layout {
        Layout::Desktop => cols.min(DESKTOP_MAX_COLS),
        Layout::Mobile => cols,
    };
    usize::from(cols.saturating_sub(2)).max(10)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub text: String,
    pub tone: ThemeToken,
    /// Index into `PageView::sections`, `None` for the intro.
    pub section: Option<usize>,
}

/// Where one section sits in the flattened document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRows {
    pub id: String,
    pub start: usize,
    pub len: usize,
}

impl SectionRows {
    /// Fraction of this section's rows inside the window `[top, top + height)`.
    pub fn visible_fraction(&self, top: usize, height: usize) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        let end = self.start + self.len;
        let overlap = end
            .min(top + height)
            .saturating_sub(self.start.max(top));
        overlap as f64 / self.len as f64
    }
}

#[derive(Debug, Default)]
pub struct Document {
    pub rows: Vec<Row>,
    pub sections: Vec<SectionRows>,
}

impl Document {
    fn push(&mut self, text: String, tone: ThemeToken, section: Option<usize>) {
        self.rows.push(Row {
            text,
            tone,
            section,
        });
    }

    /// Largest scroll offset that still fills a window of `height` rows.
    pub fn max_scroll(&self, height: usize) -> usize {
        self.rows.len().saturating_sub(height)
    }
}

/// Lay the page out at `width` columns of text.
pub fn lay_out(view: &PageView, width: usize) -> Document {
    let mut doc = Document::default();

    let mut intro = Flattener::new(width, ThemeToken::TextSecondary);
    intro.node(&view.intro);
    for (text, tone) in intro.finish() {
        doc.push(text, tone, None);
    }
    doc.push(String::new(), ThemeToken::TextPrimary, None);

    for (idx, section) in view.sections.iter().enumerate() {
        let start = doc.rows.len();
        let at = Some(idx);
        doc.push(section.title.clone(), ThemeToken::SectionTitle, at);
        let rule = section.title.chars().count().clamp(1, width);
        doc.push("─".repeat(rule), ThemeToken::Accent, at);

        let mut body = Flattener::new(width, ThemeToken::TextPrimary);
        body.node(&section.body);
        for (text, tone) in body.finish() {
            doc.push(text, tone, at);
        }
        doc.push(String::new(), ThemeToken::TextPrimary, at);

        doc.sections.push(SectionRows {
            id: section.id.clone(),
            start,
            len: doc.rows.len() - start,
        });
    }
    doc
}

struct Flattener {
    width: usize,
    tone: ThemeToken,
    preserve_whitespace: bool,
    current: String,
    out: Vec<(String, ThemeToken)>,
}

impl Flattener {
    fn new(width: usize, tone: ThemeToken) -> Self {
        Self {
            width: width.max(1),
            tone,
            preserve_whitespace: false,
            current: String::new(),
            out: Vec::new(),
        }
    }

    fn finish(mut self) -> Vec<(String, ThemeToken)> {
        self.flush();
        self.out
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::Span { text, .. } => self.push_text(text),
            Node::Link { children, .. } => self.nodes(children),
            Node::Chip { label } => self.push_text(&format!("[{label}] ")),
            Node::Badge { label } => self.push_text(&format!("{label} · ")),
            Node::Image { .. } => {}
            Node::LineBreak => self.flush(),
            Node::Paragraph {
                children,
                preserve_whitespace,
            } => {
                self.flush();
                let prev = mem::replace(&mut self.preserve_whitespace, *preserve_whitespace);
                self.nodes(children);
                self.flush();
                self.preserve_whitespace = prev;
            }
            Node::Heading { children, .. } => {
                self.flush();
                let prev = mem::replace(&mut self.tone, ThemeToken::TextStrong);
                self.nodes(children);
                self.flush();
                self.tone = prev;
            }
            Node::List { items } => {
                self.flush();
                for item in items {
                    let mut inner = Flattener::new(self.width.saturating_sub(2), ThemeToken::TextMuted);
                    inner.node(item);
                    for (i, (text, tone)) in inner.finish().into_iter().enumerate() {
                        let marker = if i == 0 { "• " } else { "  " };
                        self.out.push((format!("{marker}{text}"), tone));
                    }
                }
            }
            Node::Card { children } => {
                self.flush();
                self.nodes(children);
                self.flush();
                self.out.push((String::new(), self.tone));
            }
            Node::Row { children } | Node::Group { children } => {
                self.flush();
                self.nodes(children);
                self.flush();
            }
        }
    }

    fn nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.node(node);
        }
    }

    fn push_text(&mut self, text: &str) {
        if !self.preserve_whitespace {
            self.current.push_str(text);
            return;
        }
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.flush();
            }
            self.current.push_str(part);
        }
    }

    fn flush(&mut self) {
        let text = mem::take(&mut self.current);
        for line in wrap(&text, self.width) {
            self.out.push((line, self.tone));
        }
    }
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut len = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if len > 0 {
                lines.push(mem::take(&mut line));
                len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        if len > 0 && len + 1 + word.len() > width {
            lines.push(mem::take(&mut line));
            len = 0;
        }
        if len > 0 {
            line.push(' ');
            len += 1;
        }
        len += word.len();
        line.extend(word);
    }
    if len > 0 {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_protocol::{RevealStyle, SectionView, Transition};

    fn view() -> PageView {
        let t = Transition::default();
        PageView {
            layout: Layout::Desktop,
            widget_mounted: false,
            intro: Node::paragraph(vec![Node::text("Hello there")]),
            sections: vec![
                SectionView {
                    id: "one".into(),
                    title: "One".into(),
                    reveal: RevealStyle::hidden(20.0, t),
                    body: Node::plain_paragraph("first\nsecond"),
                },
                SectionView {
                    id: "two".into(),
                    title: "Two".into(),
                    reveal: RevealStyle::hidden(20.0, t),
                    body: Node::list(vec![Node::text("alpha beta gamma")]),
                },
            ],
        }
    }

    #[test]
    fn breakpoint_is_one_hundred_columns() {
        assert_eq!(logical_width(100), 800.0);
        assert_eq!(logical_width(101), 808.0);
    }

    #[test]
    fn desktop_width_is_capped() {
        assert_eq!(content_width(200, Layout::Desktop), 110);
        assert_eq!(content_width(200, Layout::Mobile), 198);
        assert_eq!(content_width(4, Layout::Mobile), 10);
    }

    #[test]
    fn wraps_on_words_and_splits_long_ones() {
        assert_eq!(wrap("aa bb cc", 5), ["aa bb", "cc"]);
        assert_eq!(wrap("abcdefgh", 3), ["abc", "def", "gh"]);
        assert_eq!(wrap("x abcdef", 3), ["x", "abc", "def"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn sections_are_contiguous_and_ordered() {
        let doc = lay_out(&view(), 40);
        assert_eq!(doc.rows[0].text, "Hello there");
        let ids: Vec<&str> = doc.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["one", "two"]);

        let one = &doc.sections[0];
        let two = &doc.sections[1];
        assert_eq!(one.start + one.len, two.start);
        assert_eq!(two.start + two.len, doc.rows.len());
        // title, rule, two preserved lines, blank
        assert_eq!(one.len, 5);
        assert_eq!(doc.rows[one.start + 2].text, "first");
        assert_eq!(doc.rows[one.start + 3].text, "second");
        assert_eq!(doc.rows[two.start + 2].text, "• alpha beta gamma");
    }

    #[test]
    fn list_items_hang_under_the_marker() {
        let doc = lay_out(&view(), 12);
        let two = &doc.sections[1];
        assert_eq!(doc.rows[two.start + 2].text, "• alpha beta");
        assert_eq!(doc.rows[two.start + 3].text, "  gamma");
    }

    #[test]
    fn visible_fraction_counts_overlap() {
        let s = SectionRows {
            id: "s".into(),
            start: 10,
            len: 10,
        };
        assert_eq!(s.visible_fraction(0, 10), 0.0);
        assert_eq!(s.visible_fraction(0, 11), 0.1);
        assert_eq!(s.visible_fraction(15, 40), 0.5);
        assert_eq!(s.visible_fraction(0, 100), 1.0);
        assert_eq!(s.visible_fraction(20, 10), 0.0);
    }
}
