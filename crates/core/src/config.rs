//! Page configuration, loaded from optional JSON.

use folio_protocol::{Easing, Transition};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::breakpoint::DEFAULT_BREAKPOINT_PX;
use crate::render::RevealConfig;
use crate::visibility::DEFAULT_THRESHOLD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reveal_threshold must be within [0, 1], got {0}")]
    Threshold(f64),
    #[error("breakpoint_px must be a positive number, got {0}")]
    Breakpoint(f64),
    #[error("hidden_offset_px must be a non-negative number, got {0}")]
    Offset(f64),
}

/// Tunables of the presentation state machine. Every field is optional in
/// JSON and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Visible fraction at which a section reveals.
    pub reveal_threshold: f64,
    /// Widths at or below this are mobile.
    pub breakpoint_px: f64,
    pub transition_ms: u32,
    /// How far below its resting position a hidden section sits.
    pub hidden_offset_px: f64,
    pub easing: Easing,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: DEFAULT_THRESHOLD,
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            transition_ms: 800,
            hidden_offset_px: 20.0,
            easing: Easing::EaseOut,
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::Threshold(self.reveal_threshold));
        }
        if !self.breakpoint_px.is_finite() || self.breakpoint_px <= 0.0 {
            return Err(ConfigError::Breakpoint(self.breakpoint_px));
        }
        if !self.hidden_offset_px.is_finite() || self.hidden_offset_px < 0.0 {
            return Err(ConfigError::Offset(self.hidden_offset_px));
        }
        Ok(())
    }

    pub fn transition(&self) -> Transition {
        Transition::new(self.transition_ms, self.easing)
    }

    pub fn reveal(&self) -> RevealConfig {
        RevealConfig {
            hidden_offset_px: self.hidden_offset_px,
            transition: self.transition(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = PageConfig::from_json("{}").expect("empty config parses");
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.reveal_threshold, 0.1);
        assert_eq!(config.breakpoint_px, 800.0);
        assert_eq!(config.transition(), Transition::new(800, Easing::EaseOut));
    }

    #[test]
    fn partial_override() {
        let config = PageConfig::from_json(r#"{"breakpoint_px": 640, "easing": "linear"}"#)
            .expect("valid config");
        assert_eq!(config.breakpoint_px, 640.0);
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.transition_ms, 800);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = PageConfig::from_json(r#"{"reveal_threshold": 1.5}"#);
        assert!(matches!(err, Err(ConfigError::Threshold(t)) if t == 1.5));
    }

    #[test]
    fn rejects_non_positive_breakpoint() {
        let err = PageConfig::from_json(r#"{"breakpoint_px": 0}"#);
        assert!(matches!(err, Err(ConfigError::Breakpoint(_))));
    }

    #[test]
    fn rejects_negative_offset() {
        let err = PageConfig::from_json(r#"{"hidden_offset_px": -20}"#);
        assert!(matches!(err, Err(ConfigError::Offset(o)) if o == -20.0));
        let zero = PageConfig::from_json(r#"{"hidden_offset_px": 0}"#).expect("valid config");
        assert_eq!(zero.hidden_offset_px, 0.0);
    }

    #[test]
    fn rejects_unknown_fields_and_bad_json() {
        assert!(matches!(
            PageConfig::from_json(r#"{"debounce_ms": 50}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            PageConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn reveal_config_carries_offset_and_transition() {
        let config = PageConfig {
            hidden_offset_px: 32.0,
            transition_ms: 300,
            ..PageConfig::default()
        };
        let reveal = config.reveal();
        assert_eq!(reveal.hidden_offset_px, 32.0);
        assert_eq!(reveal.transition.duration_ms, 300);
    }
}
