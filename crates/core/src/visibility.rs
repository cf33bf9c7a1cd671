//! Per-section one-shot viewport visibility tracking.

use log::{debug, warn};

use crate::subscription::{Disconnect, Scoped};

/// Fraction of a node's area that must be on screen before it reveals.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// One intersection notification for an observed node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    /// Visible fraction of the node's area, `0.0..=1.0`.
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(is_intersecting: bool, ratio: f64) -> Self {
        Self {
            is_intersecting,
            ratio,
        }
    }

    /// Entry for a node with `ratio` of its area visible.
    pub fn visible(ratio: f64) -> Self {
        Self::new(ratio > 0.0, ratio)
    }

    /// Entry for a node entirely outside the viewport.
    pub fn outside() -> Self {
        Self::new(false, 0.0)
    }

    fn reaches(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

/// Outcome of feeding one notification to a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTransition {
    /// This notification revealed the section. Reported once per tracker.
    Revealed,
    AlreadyRevealed,
    BelowThreshold,
    /// No active observation: never attached, or detached.
    NotObserving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityState {
    pub revealed: bool,
}

/// Watches one section's root node and flips `revealed` to `true` the first
/// time enough of it is on screen.
///
/// The tracker holds at most one observation. It is released as soon as
/// the section reveals, when the node is detached, or when the tracker is
/// dropped. Once released, later notifications are ignored, so a node that
/// was detached before revealing never reveals late.
#[derive(Debug)]
pub struct VisibilityTracker<O: Disconnect> {
    threshold: f64,
    state: VisibilityState,
    observation: Option<Scoped<O>>,
}

impl<O: Disconnect> VisibilityTracker<O> {
    pub fn new(threshold: f64) -> Self {
        let clamped = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_THRESHOLD
        };
        if clamped != threshold {
            warn!("visibility threshold {threshold} out of range, using {clamped}");
        }
        Self {
            threshold: clamped,
            state: VisibilityState::default(),
            observation: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state.revealed
    }

    pub fn is_observing(&self) -> bool {
        self.observation.as_ref().is_some_and(Scoped::is_active)
    }

    /// Start observing a freshly attached node.
    ///
    /// A tracker that already revealed releases `observation` straight away.
    /// Any previous observation is released first.
    pub fn attach(&mut self, observation: O) {
        let mut scoped = Scoped::new(observation);
        if self.state.revealed {
            debug!("attach after reveal, releasing observation");
            scoped.release();
            return;
        }
        self.release();
        self.observation = Some(scoped);
    }

    /// Feed one intersection notification.
    pub fn observe(&mut self, entry: IntersectionEntry) -> RevealTransition {
        if self.state.revealed {
            return RevealTransition::AlreadyRevealed;
        }
        if !self.is_observing() {
            return RevealTransition::NotObserving;
        }
        if !entry.reaches(self.threshold) {
            return RevealTransition::BelowThreshold;
        }
        self.state.revealed = true;
        self.release();
        RevealTransition::Revealed
    }

    /// The node left the document. Returns whether an observation was live.
    pub fn detach(&mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        self.observation
            .take()
            .is_some_and(|mut scoped| scoped.release())
    }
}

impl<O: Disconnect> Default for VisibilityTracker<O> {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::testing::Spy;

    #[test]
    fn starts_unrevealed_and_idle() {
        let tracker: VisibilityTracker<Spy> = VisibilityTracker::default();
        assert!(!tracker.is_revealed());
        assert!(!tracker.is_observing());
        assert_eq!(tracker.threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn reveals_at_threshold_and_releases() {
        let spy = Spy::new();
        let mut tracker = VisibilityTracker::new(0.1);
        tracker.attach(spy.clone());

        assert_eq!(
            tracker.observe(IntersectionEntry::visible(0.05)),
            RevealTransition::BelowThreshold
        );
        assert!(!tracker.is_revealed());
        assert_eq!(spy.count(), 0);

        assert_eq!(
            tracker.observe(IntersectionEntry::visible(0.1)),
            RevealTransition::Revealed
        );
        assert!(tracker.is_revealed());
        assert!(!tracker.is_observing());
        assert_eq!(spy.count(), 1);
    }

    #[test]
    fn reveal_is_monotonic() {
        let mut tracker = VisibilityTracker::new(0.1);
        tracker.attach(Spy::new());
        tracker.observe(IntersectionEntry::visible(0.5));
        assert_eq!(
            tracker.observe(IntersectionEntry::outside()),
            RevealTransition::AlreadyRevealed
        );
        assert!(tracker.is_revealed());
    }

    #[test]
    fn rapid_events_reveal_once() {
        let spy = Spy::new();
        let mut tracker = VisibilityTracker::new(0.1);
        tracker.attach(spy.clone());
        let outcomes: Vec<_> = [0.2, 0.4, 0.9, 1.0]
            .into_iter()
            .map(|r| tracker.observe(IntersectionEntry::visible(r)))
            .collect();
        let revealed = outcomes
            .iter()
            .filter(|o| **o == RevealTransition::Revealed)
            .count();
        assert_eq!(revealed, 1);
        assert_eq!(spy.count(), 1);
    }

    #[test]
    fn not_intersecting_never_reveals() {
        let mut tracker = VisibilityTracker::new(0.0);
        tracker.attach(Spy::new());
        assert_eq!(
            tracker.observe(IntersectionEntry::new(false, 0.0)),
            RevealTransition::BelowThreshold
        );
        assert_eq!(
            tracker.observe(IntersectionEntry::new(true, 0.0)),
            RevealTransition::Revealed
        );
    }

    #[test]
    fn zero_threshold_waits_for_attachment() {
        let mut tracker: VisibilityTracker<Spy> = VisibilityTracker::new(0.0);
        assert_eq!(
            tracker.observe(IntersectionEntry::visible(1.0)),
            RevealTransition::NotObserving
        );
        assert!(!tracker.is_revealed());
    }

    #[test]
    fn detach_before_reveal_releases_and_silences() {
        let spy = Spy::new();
        let mut tracker = VisibilityTracker::new(0.1);
        tracker.attach(spy.clone());
        assert!(tracker.detach());
        assert_eq!(spy.count(), 1);
        assert_eq!(
            tracker.observe(IntersectionEntry::visible(1.0)),
            RevealTransition::NotObserving
        );
        assert!(!tracker.is_revealed());
        assert!(!tracker.detach());
        assert_eq!(spy.count(), 1);
    }

    #[test]
    fn reattach_replaces_previous_observation() {
        let first = Spy::new();
        let second = Spy::new();
        let mut tracker = VisibilityTracker::new(0.1);
        tracker.attach(first.clone());
        tracker.attach(second.clone());
        assert_eq!(first.count(), 1);
        assert_eq!(second.count(), 0);
        assert!(tracker.is_observing());
    }

    #[test]
    fn attach_after_reveal_releases_immediately() {
        let mut tracker = VisibilityTracker::new(0.1);
        tracker.attach(Spy::new());
        tracker.observe(IntersectionEntry::visible(1.0));
        let late = Spy::new();
        tracker.attach(late.clone());
        assert_eq!(late.count(), 1);
        assert!(!tracker.is_observing());
    }

    #[test]
    fn drop_releases_observation() {
        let spy = Spy::new();
        {
            let mut tracker = VisibilityTracker::new(0.1);
            tracker.attach(spy.clone());
        }
        assert_eq!(spy.count(), 1);
    }

    #[test]
    fn out_of_range_threshold_is_clamped() {
        let high: VisibilityTracker<Spy> = VisibilityTracker::new(1.5);
        assert_eq!(high.threshold(), 1.0);
        let nan: VisibilityTracker<Spy> = VisibilityTracker::new(f64::NAN);
        assert_eq!(nan.threshold(), DEFAULT_THRESHOLD);
    }
}
