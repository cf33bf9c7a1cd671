use folio_protocol::{Node, Text};

/// Body of a section.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Plain text, rendered as one paragraph with its line breaks kept.
    Text(Text),
    /// An already-composed tree, rendered as-is.
    Composed(Node),
}

impl From<&'static str> for Content {
    fn from(text: &'static str) -> Self {
        Content::Text(text.into())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text.into())
    }
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Content::Composed(node)
    }
}

/// One titled content section of the page.
///
/// Immutable once built; `id` is the section's identity and doubles as the
/// anchor of its root node.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    id: Text,
    title: Text,
    content: Content,
}

impl Section {
    pub fn new(id: impl Into<Text>, title: impl Into<Text>, content: impl Into<Content>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &Content {
        &self.content
    }
}
