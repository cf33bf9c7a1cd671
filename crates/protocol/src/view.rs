use serde::{Deserialize, Serialize};

use crate::node::Node;
use crate::types::RevealStyle;

/// Page layout chosen from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Desktop,
    Mobile,
}

impl Layout {
    pub fn from_mobile(is_mobile: bool) -> Self {
        if is_mobile {
            Layout::Mobile
        } else {
            Layout::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Layout::Mobile
    }
}

/// One rendered content section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    pub id: String,
    pub title: String,
    pub reveal: RevealStyle,
    pub body: Node,
}

/// Output of one render pass over the whole page.
///
/// Sections appear in their configured order, whatever order they were
/// revealed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub layout: Layout,
    /// Whether the external widget is mounted for this pass.
    pub widget_mounted: bool,
    pub intro: Node,
    pub sections: Vec<SectionView>,
}

impl PageView {
    pub fn section(&self, id: &str) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }
}
