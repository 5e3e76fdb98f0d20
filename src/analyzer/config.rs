use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::detect::{DetectionSensitivity, DetectorConfig};
use crate::scoring::ScorerConfig;

/// Default cadence of the analysis loop.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Floor on the spacing between two analyzed ticks, whatever the interval.
pub const MIN_TICK_SPACING: Duration = Duration::from_millis(200);

/// Runtime configuration for one analysis session.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub interval: Duration,
    pub min_tick_spacing: Duration,
    pub detector: DetectorConfig,
    pub scorer: ScorerConfig,
    /// Skip scoring when the frame has not changed since the previous tick.
    pub skip_frozen_frames: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_TICK_INTERVAL,
            min_tick_spacing: MIN_TICK_SPACING,
            detector: DetectorConfig::default(),
            scorer: ScorerConfig::default(),
            skip_frozen_frames: false,
        }
    }
}

impl AnalyzerConfig {
    pub fn for_sensitivity(sensitivity: DetectionSensitivity) -> Self {
        Self {
            detector: DetectorConfig::for_sensitivity(sensitivity),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            bail!("analysis interval must be positive");
        }
        self.detector.validate().context("detector configuration")?;
        self.scorer.validate().context("scorer configuration")?;
        Ok(())
    }
}
