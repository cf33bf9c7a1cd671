use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Text payload of a node. Static content borrows, parsed content owns.
pub type Text = Cow<'static, str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    #[default]
    Normal,
    Strong,
    Italic,
    Highlight,
}

/// A presentational tree.
///
/// This is what a section body, the intro block, and any pre-composed
/// content are made of. Hosts walk it to produce markup, terminal cells,
/// or whatever else they draw with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// An inline text run.
    Span { text: Text, emphasis: Emphasis },

    /// A block of inline children. When `preserve_whitespace` is set,
    /// embedded line breaks and runs of spaces must survive rendering.
    Paragraph {
        children: Vec<Node>,
        preserve_whitespace: bool,
    },

    Heading { level: u8, children: Vec<Node> },

    /// A hyperlink. `external` links open outside the page.
    Link {
        href: Text,
        children: Vec<Node>,
        external: bool,
    },

    Image { src: Text, alt: Text },

    /// A bulleted list; each item is one node.
    List { items: Vec<Node> },

    /// A small tag, e.g. one skill.
    Chip { label: Text },

    /// A short highlighted metric, e.g. "+97% accuracy".
    Badge { label: Text },

    /// A boxed panel.
    Card { children: Vec<Node> },

    /// Children laid out side by side (wrapping when narrow).
    Row { children: Vec<Node> },

    /// Children laid out top to bottom.
    Group { children: Vec<Node> },

    LineBreak,
}

impl Node {
    pub fn text(text: impl Into<Text>) -> Node {
        Node::Span {
            text: text.into(),
            emphasis: Emphasis::Normal,
        }
    }

    pub fn strong(text: impl Into<Text>) -> Node {
        Node::Span {
            text: text.into(),
            emphasis: Emphasis::Strong,
        }
    }

    pub fn italic(text: impl Into<Text>) -> Node {
        Node::Span {
            text: text.into(),
            emphasis: Emphasis::Italic,
        }
    }

    pub fn highlight(text: impl Into<Text>) -> Node {
        Node::Span {
            text: text.into(),
            emphasis: Emphasis::Highlight,
        }
    }

    pub fn paragraph(children: Vec<Node>) -> Node {
        Node::Paragraph {
            children,
            preserve_whitespace: false,
        }
    }

    /// A single paragraph holding `text` verbatim, line breaks included.
    pub fn plain_paragraph(text: impl Into<Text>) -> Node {
        Node::Paragraph {
            children: vec![Node::text(text)],
            preserve_whitespace: true,
        }
    }

    pub fn heading(level: u8, text: impl Into<Text>) -> Node {
        Node::Heading {
            level,
            children: vec![Node::text(text)],
        }
    }

    pub fn link(href: impl Into<Text>, children: Vec<Node>) -> Node {
        Node::Link {
            href: href.into(),
            children,
            external: true,
        }
    }

    pub fn image(src: impl Into<Text>, alt: impl Into<Text>) -> Node {
        Node::Image {
            src: src.into(),
            alt: alt.into(),
        }
    }

    pub fn list(items: Vec<Node>) -> Node {
        Node::List { items }
    }

    pub fn chip(label: impl Into<Text>) -> Node {
        Node::Chip {
            label: label.into(),
        }
    }

    pub fn badge(label: impl Into<Text>) -> Node {
        Node::Badge {
            label: label.into(),
        }
    }

    pub fn card(children: Vec<Node>) -> Node {
        Node::Card { children }
    }

    pub fn row(children: Vec<Node>) -> Node {
        Node::Row { children }
    }

    pub fn group(children: Vec<Node>) -> Node {
        Node::Group { children }
    }

    /// Direct children of container nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph { children, .. }
            | Node::Heading { children, .. }
            | Node::Link { children, .. }
            | Node::Card { children }
            | Node::Row { children }
            | Node::Group { children } => children,
            Node::List { items } => items,
            Node::Span { .. }
            | Node::Image { .. }
            | Node::Chip { .. }
            | Node::Badge { .. }
            | Node::LineBreak => &[],
        }
    }

    /// Concatenated visible text of this subtree. Line breaks become `\n`;
    /// image alt text is skipped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Span { text, .. } => out.push_str(text),
            Node::Chip { label } | Node::Badge { label } => out.push_str(label),
            Node::LineBreak => out.push('\n'),
            Node::Image { .. } => {}
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }
}
