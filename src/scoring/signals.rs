use serde::{Deserialize, Serialize};

use crate::detect::DetectionRegion;

/// One eye's landmark span in frame pixel coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EyeSpan {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl EyeSpan {
    /// Eye center as the midpoint of the landmark span.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Detector-reported face box together with the frame it lives in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceBox {
    pub region: DetectionRegion,
    pub frame_width: u32,
    pub frame_height: u32,
    pub confidence: f64,
}

/// Per-expression probabilities in insertion order.
///
/// Order matters: ties on probability resolve to the earliest entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpressionDistribution {
    entries: Vec<(String, f64)>,
}

impl ExpressionDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, probability: f64) {
        self.entries.push((name.into(), probability));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-probability entry, first one on ties. Non-finite
    /// probabilities are ignored.
    pub fn dominant(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (name, probability) in &self.entries {
            if !probability.is_finite() {
                continue;
            }
            match best {
                Some((_, top)) if *probability <= top => {}
                _ => best = Some((name, *probability)),
            }
        }
        best
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ExpressionDistribution {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, probability)| (name.into(), probability))
                .collect(),
        }
    }
}

/// Richer optical measurements from a trained detector, when one is plugged
/// in. Every field is optional; missing pieces degrade to baselines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpticalSignals {
    pub left_eye: Option<EyeSpan>,
    pub right_eye: Option<EyeSpan>,
    pub expressions: Option<ExpressionDistribution>,
    pub face_box: Option<FaceBox>,
}

/// Trained-detector collaborator. Returns whatever landmark and expression
/// measurements it could extract from the frame, or `None` when it has
/// nothing to add this tick.
pub trait OpticalSignalSource: Send + Sync {
    fn signals_for(&self, frame: &dyn crate::frame::VideoFrame) -> Option<OpticalSignals>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_center_is_span_midpoint() {
        let eye = EyeSpan {
            min_x: 10.0,
            max_x: 20.0,
            min_y: 30.0,
            max_y: 34.0,
        };
        assert_eq!(eye.center(), (15.0, 32.0));
    }

    #[test]
    fn dominant_prefers_first_entry_on_ties() {
        let dist: ExpressionDistribution =
            [("happy", 0.5), ("neutral", 0.5), ("sad", 0.2)].into_iter().collect();
        assert_eq!(dist.dominant(), Some(("happy", 0.5)));
    }

    #[test]
    fn dominant_ignores_non_finite_probabilities() {
        let dist: ExpressionDistribution =
            [("happy", f64::NAN), ("sad", 0.3)].into_iter().collect();
        assert_eq!(dist.dominant(), Some(("sad", 0.3)));

        let all_bad: ExpressionDistribution =
            [("happy", f64::NAN), ("sad", f64::INFINITY)].into_iter().collect();
        assert_eq!(all_bad.dominant(), None);
    }

    #[test]
    fn empty_distribution_has_no_dominant() {
        assert_eq!(ExpressionDistribution::new().dominant(), None);
    }
}
