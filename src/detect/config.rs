use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Detection sensitivity presets exposed in settings. Higher sensitivity
/// accepts frames with less visible skin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DetectionSensitivity {
    High,
    Medium,
    Low,
}

impl Default for DetectionSensitivity {
    fn default() -> Self {
        DetectionSensitivity::Medium
    }
}

/// Skin-ratio cutoffs backing the sensitivity presets.
pub const SKIN_CUTOFF_HIGH: f64 = 0.10;
pub const SKIN_CUTOFF_MEDIUM: f64 = 0.15;
pub const SKIN_CUTOFF_LOW: f64 = 0.22;

/// Documented tuning band for the skin-ratio cutoff.
const SKIN_CUTOFF_MIN: f64 = 0.08;
const SKIN_CUTOFF_MAX: f64 = 0.25;

const MIN_SAMPLE_STRIDE: u32 = 2;

/// Tunable thresholds for the pixel heuristics. The cutoffs here are
/// empirical; retune against real camera input rather than trusting any
/// single value.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Fraction of sampled pixels that must classify as skin.
    pub skin_ratio_cutoff: f64,

    /// Grid step in pixels when sampling the detection region.
    pub sample_stride: u32,

    /// Absolute red-channel band for the RGB-margin skin rule.
    pub skin_red_min: u8,
    pub skin_red_max: u8,

    /// How far red must exceed green and blue for the RGB-margin rule.
    pub skin_red_green_margin: u8,
    pub skin_red_blue_margin: u8,

    /// Normalized chromaticity bands, pairwise disjoint.
    pub chroma_red_band: (f64, f64),
    pub chroma_green_band: (f64, f64),
    pub chroma_blue_band: (f64, f64),

    /// Luma split points for the brightness distribution signal.
    pub dark_luma_max: f64,
    pub bright_luma_min: f64,

    /// Ratio floors for the brightness distribution signal.
    pub mid_ratio_floor: f64,
    pub dark_ratio_floor: f64,
    pub bright_ratio_floor: f64,

    /// Minimum left/right skin balance for the symmetry signal.
    pub symmetry_floor: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            skin_ratio_cutoff: SKIN_CUTOFF_MEDIUM,
            sample_stride: 2,
            skin_red_min: 95,
            skin_red_max: 220,
            skin_red_green_margin: 20,
            skin_red_blue_margin: 20,
            chroma_red_band: (0.35, 0.55),
            chroma_green_band: (0.28, 0.34),
            chroma_blue_band: (0.20, 0.27),
            dark_luma_max: 80.0,
            bright_luma_min: 180.0,
            mid_ratio_floor: 0.30,
            dark_ratio_floor: 0.05,
            bright_ratio_floor: 0.05,
            symmetry_floor: 0.60,
        }
    }
}

impl DetectorConfig {
    pub fn for_sensitivity(sensitivity: DetectionSensitivity) -> Self {
        let cutoff = match sensitivity {
            DetectionSensitivity::High => SKIN_CUTOFF_HIGH,
            DetectionSensitivity::Medium => SKIN_CUTOFF_MEDIUM,
            DetectionSensitivity::Low => SKIN_CUTOFF_LOW,
        };
        Self {
            skin_ratio_cutoff: cutoff,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(SKIN_CUTOFF_MIN..=SKIN_CUTOFF_MAX).contains(&self.skin_ratio_cutoff) {
            bail!(
                "skin ratio cutoff {} outside tuning band [{SKIN_CUTOFF_MIN}, {SKIN_CUTOFF_MAX}]",
                self.skin_ratio_cutoff
            );
        }
        if self.sample_stride < MIN_SAMPLE_STRIDE {
            bail!("sample stride {} below minimum {MIN_SAMPLE_STRIDE}", self.sample_stride);
        }
        if self.skin_red_min >= self.skin_red_max {
            bail!("skin red band is empty");
        }
        if self.dark_luma_max >= self.bright_luma_min {
            bail!("dark luma bound must sit below the bright luma bound");
        }
        for (name, band) in [
            ("red", self.chroma_red_band),
            ("green", self.chroma_green_band),
            ("blue", self.chroma_blue_band),
        ] {
            if band.0 >= band.1 || band.0 < 0.0 || band.1 > 1.0 {
                bail!("chromaticity {name} band ({}, {}) is not a sub-range of [0, 1]", band.0, band.1);
            }
        }
        for (name, ratio) in [
            ("mid ratio floor", self.mid_ratio_floor),
            ("dark ratio floor", self.dark_ratio_floor),
            ("bright ratio floor", self.bright_ratio_floor),
            ("symmetry floor", self.symmetry_floor),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                bail!("{name} {ratio} outside [0, 1]");
            }
        }
        Ok(())
    }
}
