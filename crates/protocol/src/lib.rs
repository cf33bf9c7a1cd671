pub mod node;
pub mod theme;
pub mod types;
pub mod view;

pub use node::{Emphasis, Node, Text};
pub use theme::ThemeToken;
pub use types::{Easing, RevealStyle, Transition};
pub use view::{Layout, PageView, SectionView};
