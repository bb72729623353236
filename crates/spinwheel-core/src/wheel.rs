use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One wedge of the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub label: String,
    /// Rendering hint only; the resolver never looks at it.
    #[serde(default)]
    pub alternate_color: bool,
    #[serde(default)]
    pub special_prize: bool,
}

impl Segment {
    pub fn new(label: impl Into<String>, alternate_color: bool) -> Self {
        Self {
            label: label.into(),
            alternate_color,
            special_prize: false,
        }
    }

    /// A segment whose win is reported through the wheel's prize marker.
    pub fn special(label: impl Into<String>, alternate_color: bool) -> Self {
        Self {
            label: label.into(),
            alternate_color,
            special_prize: true,
        }
    }
}

/// The eight-segment layout the wheel ships with.
pub fn default_segments() -> Vec<Segment> {
    vec![
        Segment::new("20%", false),
        Segment::new("30%", true),
        Segment::new("No luck", false),
        Segment::new("50%", true),
        Segment::new("60%", false),
        Segment::new("70%", true),
        Segment::new("80%", false),
        Segment::special("", true),
    ]
}

fn default_min_spin() -> f64 {
    720.0
}
fn default_max_spin() -> f64 {
    1080.0
}
fn default_resolve_delay_ms() -> u64 {
    5000
}
fn default_animation_ms() -> u64 {
    2000
}
fn default_marker() -> String {
    "Gift".to_string()
}

/// Segment layout plus spin tuning. Immutable once handed to a resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    #[serde(default = "default_segments")]
    pub segments: Vec<Segment>,
    #[serde(default = "default_min_spin")]
    pub min_spin_degrees: f64,
    #[serde(default = "default_max_spin")]
    pub max_spin_degrees: f64,
    #[serde(default = "default_resolve_delay_ms")]
    pub resolve_delay_ms: u64,
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    #[serde(default = "default_marker")]
    pub special_prize_marker: String,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            segments: default_segments(),
            min_spin_degrees: default_min_spin(),
            max_spin_degrees: default_max_spin(),
            resolve_delay_ms: default_resolve_delay_ms(),
            animation_ms: default_animation_ms(),
            special_prize_marker: default_marker(),
        }
    }
}

impl WheelConfig {
    /// Parse a wheel definition from TOML and validate it.
    pub fn from_toml(content: &str) -> Result<Self, CoreError> {
        let config: Self = toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the resolver cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.segments.is_empty() {
            return Err(CoreError::EmptyWheel);
        }

        let mut special: Option<usize> = None;
        for (index, segment) in self.segments.iter().enumerate() {
            if segment.special_prize {
                if let Some(first) = special {
                    return Err(CoreError::MultipleSpecialPrizes {
                        first,
                        second: index,
                    });
                }
                special = Some(index);
            } else if segment.label.trim().is_empty() {
                return Err(CoreError::UnlabeledSegment(index));
            }
        }

        if let Some(index) = special {
            if self.special_prize_marker.trim().is_empty() {
                return Err(CoreError::EmptyPrizeMarker(index));
            }
        }

        let (min, max) = (self.min_spin_degrees, self.max_spin_degrees);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(CoreError::InvalidSpinRange { min, max });
        }

        Ok(())
    }

    pub fn segment_count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.segments.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Angular width of one segment in degrees.
    pub fn segment_width(&self) -> f64 {
        crate::resolve::FULL_TURN / self.segment_count().get() as f64
    }

    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}
