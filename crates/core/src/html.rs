//! HTML renderer: converts a `PageView` into a markup string.

use std::fmt::Write as _;

use folio_protocol::{Emphasis, Layout, Node, PageView, RevealStyle, SectionView, ThemeToken};

/// Id of the element the external widget mounts into.
pub const WIDGET_SLOT_ID: &str = "folio-widget-slot";
/// Id the widget's own container carries while mounted.
pub const WIDGET_ID: &str = "folio-widget";
/// Id of the page's outermost element.
pub const ROOT_ID: &str = "folio-root";

/// Render the whole page body.
///
/// The widget slot is always present; it only holds a container while
/// `view.widget_mounted` is set.
pub fn render_html(view: &PageView) -> String {
    let mut html = String::with_capacity(16 * 1024);
    let _ = write!(
        html,
        r#"<div id="{ROOT_ID}" class="folio {}" style="background:{};color:{};min-height:100vh;padding:40px 20px;font-family:system-ui,-apple-system,sans-serif">"#,
        layout_class(view.layout),
        resolve_color(ThemeToken::Background),
        resolve_color(ThemeToken::TextPrimary),
    );

    let _ = write!(html, r#"<div id="{WIDGET_SLOT_ID}">"#);
    if view.widget_mounted {
        let _ = write!(
            html,
            r#"<section id="{WIDGET_ID}" class="folio-widget" style="max-width:1200px;margin:0 auto 20px auto"></section>"#
        );
    }
    html.push_str("</div>");

    html.push_str(
        r#"<section class="folio-intro" style="max-width:900px;margin:0 auto 40px auto">"#,
    );
    render_node(&mut html, &view.intro, view.layout);
    html.push_str("</section>");

    html.push_str(r#"<main style="max-width:900px;margin:0 auto">"#);
    for section in &view.sections {
        render_section(&mut html, section, view.layout);
    }
    html.push_str("</main></div>");
    html
}

/// Class name the root carries for `layout`.
pub fn layout_class(layout: Layout) -> &'static str {
    match layout {
        Layout::Desktop => "folio-desktop",
        Layout::Mobile => "folio-mobile",
    }
}

/// Full inline style of a section root.
pub fn section_style(style: &RevealStyle) -> String {
    format!("{};margin-bottom:60px", reveal_style_css(style))
}

/// Inline CSS for a section's reveal state.
pub fn reveal_style_css(style: &RevealStyle) -> String {
    let secs = f64::from(style.transition.duration_ms) / 1000.0;
    let easing = style.transition.easing.css();
    format!(
        "opacity:{};transform:translateY({}px);transition:opacity {secs}s {easing}, transform {secs}s {easing}",
        style.opacity, style.offset_y,
    )
}

fn render_section(html: &mut String, section: &SectionView, layout: Layout) {
    let _ = write!(
        html,
        r#"<section id="{}" class="folio-section" style="{}">"#,
        escape_xml(&section.id),
        section_style(&section.reveal),
    );
    let _ = write!(
        html,
        r#"<h2 style="color:{};border-bottom:2px solid {};padding-bottom:6px;margin-bottom:20px;font-size:1.8rem">{}</h2>"#,
        resolve_color(ThemeToken::SectionTitle),
        resolve_color(ThemeToken::Accent),
        escape_xml(&section.title),
    );
    render_node(html, &section.body, layout);
    html.push_str("</section>");
}

fn render_children(html: &mut String, children: &[Node], layout: Layout) {
    for child in children {
        render_node(html, child, layout);
    }
}

fn render_node(html: &mut String, node: &Node, layout: Layout) {
    match node {
        Node::Span { text, emphasis } => {
            let text = escape_xml(text);
            let color = resolve_color(ThemeToken::for_emphasis(*emphasis));
            match emphasis {
                Emphasis::Normal => html.push_str(&text),
                Emphasis::Strong => {
                    let _ = write!(html, r#"<strong style="color:{color}">{text}</strong>"#);
                }
                Emphasis::Italic => {
                    let _ = write!(html, "<em>{text}</em>");
                }
                Emphasis::Highlight => {
                    let _ = write!(
                        html,
                        r#"<span style="color:{color};font-weight:700">{text}</span>"#
                    );
                }
            }
        }
        Node::Paragraph {
            children,
            preserve_whitespace,
        } => {
            let ws = if *preserve_whitespace {
                "white-space:pre-wrap;"
            } else {
                ""
            };
            let _ = write!(html, r#"<p style="{ws}line-height:1.6;margin:0 0 12px 0">"#);
            render_children(html, children, layout);
            html.push_str("</p>");
        }
        Node::Heading { level, children } => {
            let level = (*level).clamp(1, 6);
            let _ = write!(
                html,
                r#"<h{level} style="color:{}">"#,
                resolve_color(ThemeToken::TextStrong)
            );
            render_children(html, children, layout);
            let _ = write!(html, "</h{level}>");
        }
        Node::Link {
            href,
            children,
            external,
        } => {
            let target = if *external {
                r#" target="_blank" rel="noopener noreferrer""#
            } else {
                ""
            };
            let _ = write!(
                html,
                r#"<a href="{}"{target} style="color:{};text-decoration:underline">"#,
                escape_xml(href),
                resolve_color(ThemeToken::Link),
            );
            render_children(html, children, layout);
            html.push_str("</a>");
        }
        Node::Image { src, alt } => {
            let _ = write!(
                html,
                r#"<img src="{}" alt="{}" style="max-width:120px;vertical-align:middle"/>"#,
                escape_xml(src),
                escape_xml(alt),
            );
        }
        Node::List { items } => {
            let _ = write!(
                html,
                r#"<ul style="padding-left:22px;color:{};line-height:1.8">"#,
                resolve_color(ThemeToken::TextMuted)
            );
            for item in items {
                html.push_str("<li>");
                render_node(html, item, layout);
                html.push_str("</li>");
            }
            html.push_str("</ul>");
        }
        Node::Chip { label } => {
            let _ = write!(
                html,
                r#"<span class="folio-chip" style="display:inline-block;background:{};color:{};border-radius:20px;padding:8px 16px;margin:6px;user-select:none">{}</span>"#,
                resolve_color(ThemeToken::ChipBackground),
                resolve_color(ThemeToken::ChipText),
                escape_xml(label),
            );
        }
        Node::Badge { label } => {
            let _ = write!(
                html,
                r#"<span class="folio-badge" style="display:inline-block;background:{};color:{};border-radius:999px;padding:2px 10px;margin-right:8px;font-weight:600">{}</span>"#,
                resolve_color(ThemeToken::BadgeBackground),
                resolve_color(ThemeToken::BadgeText),
                escape_xml(label),
            );
        }
        Node::Card { children } => {
            let _ = write!(
                html,
                r#"<div class="folio-card" style="background:{};border:1px solid {};border-radius:14px;padding:24px;margin-bottom:32px">"#,
                resolve_color(ThemeToken::CardBackground),
                resolve_color(ThemeToken::CardBorder),
            );
            render_children(html, children, layout);
            html.push_str("</div>");
        }
        Node::Row { children } => {
            let direction = if layout.is_mobile() { "column" } else { "row" };
            let _ = write!(
                html,
                r#"<div class="folio-row" style="display:flex;flex-direction:{direction};flex-wrap:wrap;align-items:center;gap:24px">"#
            );
            render_children(html, children, layout);
            html.push_str("</div>");
        }
        Node::Group { children } => {
            html.push_str(r#"<div style="flex:1;min-width:150px">"#);
            render_children(html, children, layout);
            html.push_str("</div>");
        }
        Node::LineBreak => html.push_str("<br/>"),
    }
}

fn resolve_color(token: ThemeToken) -> &'static str {
    match token {
        ThemeToken::Background => "#0b1220",
        ThemeToken::Accent | ThemeToken::Link | ThemeToken::ChipText => "#4cd9ff",
        ThemeToken::SectionTitle => "#49c4ff",
        ThemeToken::TextPrimary => "#e4f4ff",
        ThemeToken::TextSecondary => "#b0cef9",
        ThemeToken::TextMuted => "#9abff2",
        ThemeToken::TextStrong => "#e6f5ff",
        ThemeToken::CardBackground => "#1f2e44",
        ThemeToken::CardBorder => "rgba(76,217,255,0.35)",
        ThemeToken::ChipBackground => "#223344",
        ThemeToken::BadgeBackground => "rgba(76,217,255,0.15)",
        ThemeToken::BadgeText => "#61dfff",
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_protocol::Transition;

    fn view(widget_mounted: bool, layout: Layout) -> PageView {
        let t = Transition::default();
        PageView {
            layout,
            widget_mounted,
            intro: Node::row(vec![Node::image("/me.jpg", "Me")]),
            sections: vec![
                SectionView {
                    id: "first".into(),
                    title: "First".into(),
                    reveal: RevealStyle::hidden(20.0, t),
                    body: Node::plain_paragraph("a\nb"),
                },
                SectionView {
                    id: "second".into(),
                    title: "Q&A <live>".into(),
                    reveal: RevealStyle::shown(t),
                    body: Node::link("https://example.com/?a=1&b=2", vec![Node::text("x")]),
                },
            ],
        }
    }

    #[test]
    fn sections_keep_order_and_style() {
        let html = render_html(&view(false, Layout::Desktop));
        let first = html.find(r#"id="first""#);
        let second = html.find(r#"id="second""#);
        assert!(first.is_some() && second.is_some() && first < second);
        assert!(html.contains(
            "opacity:0;transform:translateY(20px);transition:opacity 0.8s ease-out, transform 0.8s ease-out"
        ));
        assert!(html.contains("opacity:1;transform:translateY(0px)"));
    }

    #[test]
    fn plain_paragraph_is_pre_wrap() {
        let html = render_html(&view(false, Layout::Desktop));
        assert!(html.contains(r#"<p style="white-space:pre-wrap;line-height:1.6;margin:0 0 12px 0">a
b</p>"#));
    }

    #[test]
    fn escapes_text_and_attributes() {
        let html = render_html(&view(false, Layout::Desktop));
        assert!(html.contains("Q&amp;A &lt;live&gt;"));
        assert!(html.contains(r#"href="https://example.com/?a=1&amp;b=2" target="_blank" rel="noopener noreferrer""#));
    }

    #[test]
    fn widget_container_only_when_mounted() {
        let mounted = render_html(&view(true, Layout::Desktop));
        assert!(mounted.contains(&format!(r#"id="{WIDGET_ID}""#)));
        let unmounted = render_html(&view(false, Layout::Mobile));
        assert!(!unmounted.contains(&format!(r#"id="{WIDGET_ID}""#)));
        assert!(unmounted.contains(&format!(r#"<div id="{WIDGET_SLOT_ID}"></div>"#)));
    }

    #[test]
    fn mobile_rows_stack() {
        let html = render_html(&view(false, Layout::Mobile));
        assert!(html.contains("folio-mobile"));
        assert!(html.contains("flex-direction:column"));
        let html = render_html(&view(false, Layout::Desktop));
        assert!(html.contains("flex-direction:row"));
    }
}
