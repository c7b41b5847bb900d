use serde::Deserialize;

use crate::core::sampler::DEFAULT_SAMPLES;
use crate::core::stroke_path::DEFAULT_FLATTEN_TOLERANCE;

/// Tuning for guided tracing, provided by the host.
///
/// The thresholds were picked by hand for a 400x400 logical canvas on touch
/// screens; hosts with a different input resolution or glyph size override
/// them (all fields are optional in the JSON form).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// A stroke engages when a pressed sample lands closer than this to its start point.
    pub entry_tolerance: f32,
    /// Samples at or beyond this distance from the path are ignored.
    pub tracking_tolerance: f32,
    /// Fraction of the path length that completes a stroke.
    pub completion_ratio: f32,
    /// Arc-length intervals used by the path sampler.
    pub sampler_samples: usize,
    /// Re-sampling granularity for revealed ink.
    pub reveal_steps: usize,
    /// Curve flattening tolerance when loading glyph paths.
    pub flatten_tolerance: f32,
    /// Pause between a stroke completing and the next one activating (seconds).
    pub advance_delay: f32,
    /// How long the celebration flag stays raised (seconds).
    pub celebration_duration: f32,
    /// How long a requested hint stays visible (seconds).
    pub hint_duration: f32,
    /// Glyph used when a requested id is unknown.
    pub default_glyph: char,
    /// Free-writing surface settings.
    pub coverage: CoverageConfig,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            entry_tolerance: 60.0,
            tracking_tolerance: 60.0,
            completion_ratio: 0.95,
            sampler_samples: DEFAULT_SAMPLES,
            reveal_steps: 200,
            flatten_tolerance: DEFAULT_FLATTEN_TOLERANCE,
            advance_delay: 0.3,
            celebration_duration: 2.0,
            hint_duration: 2.5,
            default_glyph: 'A',
            coverage: CoverageConfig::default(),
        }
    }
}

impl TraceConfig {
    /// Parse a (possibly partial) config override from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Free-writing coverage settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Drawing surface width in pixels.
    pub width: u32,
    /// Drawing surface height in pixels.
    pub height: u32,
    /// Pen diameter in pixels.
    pub pen_width: f32,
    /// Inked fraction of the surface that counts as a finished letter.
    pub target_coverage: f32,
    /// Percent at which the one-shot celebration fires.
    pub celebrate_percent: u8,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            pen_width: 18.0,
            target_coverage: 0.08,
            celebrate_percent: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let c = TraceConfig::default();
        assert_eq!(c.entry_tolerance, 60.0);
        assert_eq!(c.tracking_tolerance, 60.0);
        assert_eq!(c.completion_ratio, 0.95);
        assert_eq!(c.sampler_samples, 100);
        assert_eq!(c.default_glyph, 'A');
        assert_eq!(c.coverage.celebrate_percent, 90);
    }

    #[test]
    fn partial_json_override() {
        let c = TraceConfig::from_json(
            r#"{ "tracking_tolerance": 40.0, "coverage": { "pen_width": 12.0 } }"#,
        )
        .unwrap();
        assert_eq!(c.tracking_tolerance, 40.0);
        assert_eq!(c.entry_tolerance, 60.0);
        assert_eq!(c.coverage.pen_width, 12.0);
        assert_eq!(c.coverage.width, 400);
    }
}
