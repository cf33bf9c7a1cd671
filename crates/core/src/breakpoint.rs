//! Process-wide viewport breakpoint state.

use std::cell::Cell;
use std::rc::Rc;

use folio_protocol::Layout;
use log::{debug, warn};

use crate::subscription::{Disconnect, Scoped};

/// Widths at or below this many logical pixels count as mobile.
pub const DEFAULT_BREAKPOINT_PX: f64 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakpointState {
    pub is_mobile: bool,
    pub breakpoint_px: f64,
}

impl BreakpointState {
    /// State for a viewport `width`. Without a viewport the page starts on
    /// the desktop layout.
    pub fn for_width(width: Option<f64>, breakpoint_px: f64) -> Self {
        Self {
            is_mobile: width.is_some_and(|w| w <= breakpoint_px),
            breakpoint_px,
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::from_mobile(self.is_mobile)
    }
}

/// Published when a resize flips `is_mobile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointChange {
    pub is_mobile: bool,
}

/// Read-only view of the monitor's current state.
#[derive(Debug, Clone)]
pub struct BreakpointReader {
    state: Rc<Cell<BreakpointState>>,
}

impl BreakpointReader {
    pub fn get(&self) -> BreakpointState {
        self.state.get()
    }

    pub fn is_mobile(&self) -> bool {
        self.state.get().is_mobile
    }

    pub fn layout(&self) -> Layout {
        self.state.get().layout()
    }
}

/// Tracks whether the viewport is at or below the breakpoint.
///
/// The monitor is the only writer of the shared [`BreakpointState`];
/// everything else reads it through a [`BreakpointReader`]. Every resize
/// notification is recomputed immediately, with no debouncing. The resize
/// subscription lives until [`BreakpointMonitor::teardown`] or drop.
#[derive(Debug)]
pub struct BreakpointMonitor<S: Disconnect> {
    state: Rc<Cell<BreakpointState>>,
    width: Option<f64>,
    subscription: Option<Scoped<S>>,
    torn_down: bool,
}

impl<S: Disconnect> BreakpointMonitor<S> {
    /// `initial_width` is `None` when there is no viewport to query yet.
    pub fn new(breakpoint_px: f64, initial_width: Option<f64>) -> Self {
        let breakpoint_px = if breakpoint_px.is_finite() && breakpoint_px > 0.0 {
            breakpoint_px
        } else {
            warn!("invalid breakpoint {breakpoint_px}px, using {DEFAULT_BREAKPOINT_PX}px");
            DEFAULT_BREAKPOINT_PX
        };
        let width = initial_width.filter(|w| w.is_finite());
        let state = BreakpointState::for_width(width, breakpoint_px);
        debug!(
            "breakpoint monitor at {breakpoint_px}px, width {width:?}, mobile={}",
            state.is_mobile
        );
        Self {
            state: Rc::new(Cell::new(state)),
            width,
            subscription: None,
            torn_down: false,
        }
    }

    /// Hold the resize subscription for the consumer's lifetime. After
    /// teardown the subscription is released immediately.
    pub fn subscribe(&mut self, subscription: S) {
        let mut scoped = Scoped::new(subscription);
        if self.torn_down {
            scoped.release();
            return;
        }
        if let Some(mut previous) = self.subscription.replace(scoped) {
            previous.release();
        }
    }

    /// Recompute from a resize notification. Returns the new value only if
    /// `is_mobile` flipped.
    pub fn on_resize(&mut self, width: f64) -> Option<BreakpointChange> {
        if self.torn_down {
            debug!("resize after teardown ignored");
            return None;
        }
        if !width.is_finite() {
            warn!("ignoring non-finite viewport width {width}");
            return None;
        }
        self.width = Some(width);
        let previous = self.state.get();
        let next = BreakpointState::for_width(Some(width), previous.breakpoint_px);
        if next.is_mobile == previous.is_mobile {
            return None;
        }
        self.state.set(next);
        debug!("width {width}px crossed breakpoint, mobile={}", next.is_mobile);
        Some(BreakpointChange {
            is_mobile: next.is_mobile,
        })
    }

    pub fn state(&self) -> BreakpointState {
        self.state.get()
    }

    pub fn is_mobile(&self) -> bool {
        self.state.get().is_mobile
    }

    /// Last known viewport width.
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub fn reader(&self) -> BreakpointReader {
        BreakpointReader {
            state: Rc::clone(&self.state),
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(Scoped::is_active)
    }

    /// Release the resize subscription. Returns whether one was live.
    pub fn teardown(&mut self) -> bool {
        self.torn_down = true;
        self.subscription
            .take()
            .is_some_and(|mut scoped| scoped.release())
    }
}
