use serde::{Deserialize, Serialize};

use crate::node::Emphasis;

/// Semantic color tokens resolved by each host's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Accent,
    SectionTitle,

    TextPrimary,
    TextSecondary,
    TextMuted,
    TextStrong,

    Link,

    CardBackground,
    CardBorder,

    // Skill chips
    ChipBackground,
    ChipText,

    // Metric callouts
    BadgeBackground,
    BadgeText,
}

impl ThemeToken {
    /// Token used for an inline text run with the given emphasis.
    pub fn for_emphasis(emphasis: Emphasis) -> ThemeToken {
        match emphasis {
            Emphasis::Normal | Emphasis::Italic => ThemeToken::TextPrimary,
            Emphasis::Strong => ThemeToken::TextStrong,
            Emphasis::Highlight => ThemeToken::Accent,
        }
    }
}
