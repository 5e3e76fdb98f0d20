use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Weight of eye contact in the composite score.
pub const EYE_WEIGHT: f64 = 0.4;
/// Weight of head posture in the composite score.
pub const POSTURE_WEIGHT: f64 = 0.3;
/// Weight of expression in the composite score.
pub const EXPRESSION_WEIGHT: f64 = 0.3;

/// Tunable knobs for the confidence scorer. `Default` matches the shipped
/// behavior; overrides are for experimentation, not persisted settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorerConfig {
    pub eye_weight: f64,
    pub posture_weight: f64,
    pub expression_weight: f64,
    /// Out of 100, scaled by detector confidence when landmarks are absent.
    pub eye_baseline: f64,
    /// Out of 100, scaled by detector confidence when no face box came in.
    pub posture_baseline: f64,
    /// Out of 100, scaled by detector confidence when no expressions came in.
    pub expression_baseline: f64,
    /// Face width as a fraction of frame width considered ideal framing.
    pub ideal_face_width_frac: f64,
    /// Penalty per unit of center offset, measured as a fraction of frame width.
    pub center_penalty: f64,
    /// Penalty per unit of deviation from the ideal face width fraction.
    pub size_penalty: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            eye_weight: EYE_WEIGHT,
            posture_weight: POSTURE_WEIGHT,
            expression_weight: EXPRESSION_WEIGHT,
            eye_baseline: 75.0,
            posture_baseline: 80.0,
            expression_baseline: 75.0,
            ideal_face_width_frac: 0.35,
            center_penalty: 2.0,
            size_penalty: 2.5,
        }
    }
}

impl ScorerConfig {
    pub fn validate(&self) -> Result<()> {
        let sum = self.eye_weight + self.posture_weight + self.expression_weight;
        if (sum - 1.0).abs() > 1e-9 {
            bail!("score weights must sum to 1.0, got {sum}");
        }
        for (name, weight) in [
            ("eye", self.eye_weight),
            ("posture", self.posture_weight),
            ("expression", self.expression_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                bail!("{name} weight {weight} outside [0, 1]");
            }
        }
        for (name, baseline) in [
            ("eye", self.eye_baseline),
            ("posture", self.posture_baseline),
            ("expression", self.expression_baseline),
        ] {
            if !(0.0..=100.0).contains(&baseline) {
                bail!("{name} baseline {baseline} outside [0, 100]");
            }
        }
        if !(0.0..=1.0).contains(&self.ideal_face_width_frac) {
            bail!(
                "ideal face width fraction {} outside [0, 1]",
                self.ideal_face_width_frac
            );
        }
        if self.center_penalty < 0.0 || self.size_penalty < 0.0 {
            bail!("posture penalties must be non-negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ScorerConfig::default().validate().is_ok());
    }

    #[test]
    fn weights_must_sum_to_one() {
        let config = ScorerConfig {
            eye_weight: 0.5,
            ..ScorerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn baselines_outside_range_are_rejected() {
        let config = ScorerConfig {
            posture_baseline: 140.0,
            ..ScorerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
