use folio_protocol::Text;

/// An outbound profile link shown in the intro block.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundLink {
    pub label: Text,
    pub href: Text,
    /// Icon image path, if any.
    pub icon: Option<Text>,
}

impl OutboundLink {
    pub fn new(label: impl Into<Text>, href: impl Into<Text>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<Text>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// The fixed introductory block: profile identity plus outbound links.
///
/// Rendered as `lead`, the links separated by commas, then `tail`.
#[derive(Debug, Clone, PartialEq)]
pub struct Intro {
    pub name: Text,
    pub avatar: Text,
    pub lead: Text,
    pub links: Vec<OutboundLink>,
    pub tail: Text,
}
