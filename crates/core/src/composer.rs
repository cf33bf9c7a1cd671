//! Page assembly: one tracker per section, widget gated on the breakpoint.

use folio_protocol::{Layout, PageView};
use log::{debug, info, warn};
use thiserror::Error;

use crate::breakpoint::BreakpointReader;
use crate::config::PageConfig;
use crate::model::Page;
use crate::render::{self, RevealConfig};
use crate::subscription::{Disconnect, Scoped};
use crate::visibility::{IntersectionEntry, RevealTransition, VisibilityTracker};
use crate::widget::{ExternalWidget, WidgetSlot, WidgetTransition};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("unknown section: {0}")]
    UnknownSection(String),
}

/// Drives the page.
///
/// Owns the static [`Page`] and exactly one [`VisibilityTracker`] per
/// section, index-aligned with the section order. Hosts report node
/// attachment, detachment, and intersection by section id; each render
/// pass reads the breakpoint once and mounts the external widget only on
/// the desktop layout. After [`PageComposer::teardown`] the widget stays
/// unmounted and new observations are released on arrival.
pub struct PageComposer<O: Disconnect, W: ExternalWidget> {
    page: Page,
    reveal: RevealConfig,
    trackers: Vec<VisibilityTracker<O>>,
    breakpoint: BreakpointReader,
    widget: WidgetSlot<W>,
    torn_down: bool,
}

impl<O: Disconnect, W: ExternalWidget> PageComposer<O, W> {
    pub fn new(page: Page, config: &PageConfig, breakpoint: BreakpointReader, widget: W) -> Self {
        let trackers = page
            .sections()
            .iter()
            .map(|_| VisibilityTracker::new(config.reveal_threshold))
            .collect();
        Self {
            page,
            reveal: config.reveal(),
            trackers,
            breakpoint,
            widget: WidgetSlot::new(widget),
            torn_down: false,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn reveal_config(&self) -> &RevealConfig {
        &self.reveal
    }

    /// Section `id`'s root node entered the document.
    pub fn attach(&mut self, id: &str, observation: O) -> Result<(), ComposeError> {
        let torn_down = self.torn_down;
        let tracker = self.tracker_mut(id)?;
        if torn_down {
            debug!("section {id} attached after teardown, releasing observation");
            Scoped::new(observation).release();
            return Ok(());
        }
        tracker.attach(observation);
        debug!("section {id} attached");
        Ok(())
    }

    /// Section `id`'s root node left the document. Returns whether an
    /// observation was still live.
    pub fn detach(&mut self, id: &str) -> Result<bool, ComposeError> {
        let released = self.tracker_mut(id)?.detach();
        debug!("section {id} detached (released={released})");
        Ok(released)
    }

    pub fn on_intersection(
        &mut self,
        id: &str,
        entry: IntersectionEntry,
    ) -> Result<RevealTransition, ComposeError> {
        let transition = self.tracker_mut(id)?.observe(entry);
        if transition == RevealTransition::Revealed {
            debug!("section {id} revealed at ratio {:.2}", entry.ratio);
        }
        Ok(transition)
    }

    pub fn is_revealed(&self, id: &str) -> Result<bool, ComposeError> {
        self.tracker(id).map(VisibilityTracker::is_revealed)
    }

    pub fn is_observing(&self, id: &str) -> Result<bool, ComposeError> {
        self.tracker(id).map(VisibilityTracker::is_observing)
    }

    /// Mount or unmount the widget for the current breakpoint.
    pub fn sync_widget(&mut self) -> WidgetTransition {
        let is_mobile = self.breakpoint.is_mobile();
        self.widget.sync(!is_mobile && !self.torn_down)
    }

    /// One render pass: syncs the widget, then composes the page.
    pub fn render(&mut self) -> PageView {
        let state = self.breakpoint.get();
        self.widget.sync(!state.is_mobile && !self.torn_down);
        self.compose(state.layout())
    }

    /// The page as it stands, without touching the widget.
    pub fn view(&self) -> PageView {
        self.compose(self.breakpoint.layout())
    }

    pub fn widget(&self) -> &WidgetSlot<W> {
        &self.widget
    }

    /// Detach every section and unmount the widget, for good.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        let released = self
            .trackers
            .iter_mut()
            .map(VisibilityTracker::detach)
            .filter(|released| *released)
            .count();
        self.widget.unmount();
        info!("page torn down, released {released} observations");
    }

    fn compose(&self, layout: Layout) -> PageView {
        let sections = self
            .page
            .sections()
            .iter()
            .zip(&self.trackers)
            .map(|(section, tracker)| {
                render::render_section(section, tracker.is_revealed(), &self.reveal)
            })
            .collect();
        PageView {
            layout,
            widget_mounted: self.widget.is_mounted(),
            intro: render::render_intro(self.page.intro()),
            sections,
        }
    }

    fn tracker(&self, id: &str) -> Result<&VisibilityTracker<O>, ComposeError> {
        self.page
            .position(id)
            .and_then(|idx| self.trackers.get(idx))
            .ok_or_else(|| unknown(id))
    }

    fn tracker_mut(&mut self, id: &str) -> Result<&mut VisibilityTracker<O>, ComposeError> {
        self.page
            .position(id)
            .and_then(|idx| self.trackers.get_mut(idx))
            .ok_or_else(|| unknown(id))
    }
}

fn unknown(id: &str) -> ComposeError {
    warn!("no section with id {id}");
    ComposeError::UnknownSection(id.to_string())
}
