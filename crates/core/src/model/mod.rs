pub mod intro;
pub mod page;
pub mod section;

pub use intro::{Intro, OutboundLink};
pub use page::{Page, PageError};
pub use section::{Content, Section};
