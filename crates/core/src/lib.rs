//! Viewport-reactive presentation state for a single-page profile.
//!
//! Sections reveal once when they scroll into view; the page switches
//! layout and gates its embedded widget on a width breakpoint. Hosts feed
//! environment notifications in and render the resulting `PageView`.

pub mod breakpoint;
pub mod composer;
pub mod config;
pub mod content;
pub mod html;
pub mod model;
pub mod render;
pub mod subscription;
pub mod visibility;
pub mod widget;

pub use breakpoint::{BreakpointMonitor, BreakpointReader, BreakpointState};
pub use composer::{ComposeError, PageComposer};
pub use config::{ConfigError, PageConfig};
pub use subscription::{Disconnect, Polled, Scoped};
pub use visibility::{IntersectionEntry, RevealTransition, VisibilityTracker};
pub use widget::{ExternalWidget, WidgetSlot, WidgetTransition};
