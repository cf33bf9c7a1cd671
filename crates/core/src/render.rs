//! Pure section and intro rendering.

use folio_protocol::{Node, RevealStyle, SectionView, Transition};

use crate::model::{Content, Intro, Section};

/// How hidden sections sit and how they animate in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    pub hidden_offset_px: f64,
    pub transition: Transition,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            hidden_offset_px: 20.0,
            transition: Transition::default(),
        }
    }
}

/// Style of a section in the given reveal state. Both states carry the
/// transition, so the host animates from one to the other on its own.
pub fn reveal_style(revealed: bool, config: &RevealConfig) -> RevealStyle {
    if revealed {
        RevealStyle::shown(config.transition)
    } else {
        RevealStyle::hidden(config.hidden_offset_px, config.transition)
    }
}

/// Section body: plain text becomes one whitespace-preserving paragraph,
/// composed content passes through untouched.
pub fn render_content(content: &Content) -> Node {
    match content {
        Content::Text(text) => Node::plain_paragraph(text.clone()),
        Content::Composed(node) => node.clone(),
    }
}

pub fn render_section(section: &Section, revealed: bool, config: &RevealConfig) -> SectionView {
    SectionView {
        id: section.id().to_string(),
        title: section.title().to_string(),
        reveal: reveal_style(revealed, config),
        body: render_content(section.content()),
    }
}

/// Avatar beside a paragraph of comma-separated outbound links.
pub fn render_intro(intro: &Intro) -> Node {
    let mut line = Vec::with_capacity(intro.links.len() * 2 + 2);
    line.push(Node::text(format!("{} ", intro.lead)));
    for (idx, link) in intro.links.iter().enumerate() {
        if idx > 0 {
            line.push(Node::text(", "));
        }
        let mut label = Vec::with_capacity(2);
        if let Some(icon) = &link.icon {
            label.push(Node::image(icon.clone(), link.label.clone()));
        }
        label.push(Node::text(link.label.clone()));
        line.push(Node::link(link.href.clone(), label));
    }
    line.push(Node::text(format!(" {}", intro.tail)));

    Node::row(vec![
        Node::image(intro.avatar.clone(), intro.name.clone()),
        Node::group(vec![Node::paragraph(line)]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutboundLink;

    #[test]
    fn hidden_section_is_transparent_and_offset() {
        let section = Section::new("s", "S", "body");
        let view = render_section(&section, false, &RevealConfig::default());
        assert_eq!(view.reveal.opacity, 0.0);
        assert_eq!(view.reveal.offset_y, 20.0);
        assert_eq!(view.reveal.transition.duration_ms, 800);
    }

    #[test]
    fn revealed_section_rests_opaque() {
        let section = Section::new("s", "S", "body");
        let view = render_section(&section, true, &RevealConfig::default());
        assert!(view.reveal.is_shown());
        assert_eq!(view.id, "s");
        assert_eq!(view.title, "S");
    }

    #[test]
    fn plain_text_wraps_into_one_paragraph() {
        let body = render_content(&Content::from("first line\n  second line"));
        assert_eq!(body, Node::plain_paragraph("first line\n  second line"));
    }

    #[test]
    fn composed_content_passes_through() {
        let tree = Node::card(vec![Node::heading(3, "Title"), Node::chip("Rust")]);
        let body = render_content(&Content::from(tree.clone()));
        assert_eq!(body, tree);
    }

    #[test]
    fn reveal_state_does_not_touch_body() {
        let section = Section::new("s", "S", Node::chip("x"));
        let config = RevealConfig::default();
        assert_eq!(
            render_section(&section, false, &config).body,
            render_section(&section, true, &config).body
        );
    }

    #[test]
    fn intro_lists_links_in_order() {
        let intro = Intro {
            name: "Jane".into(),
            avatar: "/me.jpg".into(),
            lead: "Find me on".into(),
            links: vec![
                OutboundLink::new("GitHub", "https://github.com/jane"),
                OutboundLink::new("Blog", "https://jane.dev").with_icon("/blog.svg"),
            ],
            tail: "or say hi.".into(),
        };
        let node = render_intro(&intro);
        assert_eq!(node.plain_text(), "Find me on GitHub, Blog or say hi.");
        assert!(matches!(&node.children()[0], Node::Image { alt, .. } if alt == "Jane"));
    }
}
