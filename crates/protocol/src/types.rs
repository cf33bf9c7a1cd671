use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing curve of a reveal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseOut,
}

impl Easing {
    /// CSS `transition-timing-function` keyword.
    pub fn css(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseOut => "ease-out",
        }
    }

    /// Map linear time `t` (clamped to `[0, 1]`) to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            // Cubic ease-out; close enough to the CSS curve for sampled hosts.
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A time-bounded animated transition.
///
/// Browsers hand this straight to CSS; hosts without CSS transitions
/// sample [`Transition::progress`] once per frame instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Transition {
    pub fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }

    /// Eased progress in `[0, 1]` after `elapsed` time.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let t = elapsed.as_secs_f64() * 1000.0 / f64::from(self.duration_ms);
        self.easing.apply(t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration()
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(800, Easing::EaseOut)
    }
}

/// Visual state of a section: how opaque it is and how far below its
/// resting position it sits, plus the transition used to get there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealStyle {
    /// 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f64,
    /// Downward offset from the resting position, in logical pixels.
    pub offset_y: f64,
    pub transition: Transition,
}

impl RevealStyle {
    pub fn hidden(offset_y: f64, transition: Transition) -> Self {
        Self {
            opacity: 0.0,
            offset_y,
            transition,
        }
    }

    pub fn shown(transition: Transition) -> Self {
        Self {
            opacity: 1.0,
            offset_y: 0.0,
            transition,
        }
    }

    /// Whether this style is the fully opaque resting state.
    pub fn is_shown(&self) -> bool {
        self.opacity >= 1.0 && self.offset_y == 0.0
    }

    /// Intermediate style `progress` of the way from `self` to `target`.
    ///
    /// The result carries the target's transition.
    pub fn lerp(&self, target: &RevealStyle, progress: f64) -> RevealStyle {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        RevealStyle {
            opacity: self.opacity + (target.opacity - self.opacity) * p,
            offset_y: self.offset_y + (target.offset_y - self.offset_y) * p,
            transition: target.transition,
        }
    }
}
