use std::time::Instant;

use crate::detect::PresenceVerdict;
use crate::session::AnalysisSample;

use super::config::ScorerConfig;
use super::signals::OpticalSignals;

const EYE_GAZE_BASE: f64 = 90.0;
const EYE_OFFSET_PENALTY: f64 = 2.0;
const EYE_SCORE_FLOOR: f64 = 60.0;
const EYE_SCORE_CEILING: f64 = 95.0;

const NEUTRAL_EXPRESSION: &str = "neutral";

/// Turns presence verdicts (plus optional landmark signals) into scored
/// samples. Timestamps count from construction, so one scorer spans one
/// session.
pub struct ConfidenceScorer {
    config: ScorerConfig,
    epoch: Instant,
}

impl ConfidenceScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self {
            config,
            epoch: Instant::now(),
        }
    }

    /// Scores one analysis tick.
    ///
    /// An undetected face always yields the all-zero sample, regardless of
    /// whatever optical signals arrived alongside it.
    pub fn score(
        &self,
        verdict: &PresenceVerdict,
        signals: Option<&OpticalSignals>,
    ) -> AnalysisSample {
        let timestamp_ms = self.epoch.elapsed().as_millis() as u64;
        if !verdict.detected {
            return AnalysisSample::no_face(timestamp_ms);
        }

        let confidence = if verdict.confidence.is_finite() {
            verdict.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let empty = OpticalSignals::default();
        let signals = signals.unwrap_or(&empty);

        let eye_contact_score = clamp_score(self.eye_contact(confidence, signals));
        let head_posture_score = clamp_score(self.head_posture(confidence, signals));
        let (dominant_expression, raw_expression) = self.expression(confidence, signals);
        let expression_score = clamp_score(raw_expression);

        // Composite recombines the already-rounded sub-scores.
        let confidence_score = clamp_score(
            f64::from(eye_contact_score) * self.config.eye_weight
                + f64::from(head_posture_score) * self.config.posture_weight
                + f64::from(expression_score) * self.config.expression_weight,
        );

        AnalysisSample {
            confidence_score,
            eye_contact_score,
            head_posture_score,
            expression_score,
            dominant_expression,
            face_detected: true,
            timestamp_ms,
        }
    }

    /// Level eyes score near the base; vertical misalignment between the two
    /// eye centers is penalized down to the floor.
    fn eye_contact(&self, confidence: f64, signals: &OpticalSignals) -> f64 {
        let (Some(left), Some(right)) = (&signals.left_eye, &signals.right_eye) else {
            return self.config.eye_baseline * confidence;
        };
        let (_, left_y) = left.center();
        let (_, right_y) = right.center();
        let offset = (left_y - right_y).abs();
        if !offset.is_finite() {
            return self.config.eye_baseline * confidence;
        }
        (EYE_GAZE_BASE - offset * EYE_OFFSET_PENALTY).clamp(EYE_SCORE_FLOOR, EYE_SCORE_CEILING)
    }

    /// Averages a centering term and a framing-size term over the reported
    /// face box.
    fn head_posture(&self, confidence: f64, signals: &OpticalSignals) -> f64 {
        let Some(face) = &signals.face_box else {
            return self.config.posture_baseline * confidence;
        };
        if face.frame_width == 0 || face.frame_height == 0 {
            return self.config.posture_baseline * confidence;
        }
        let frame_width = f64::from(face.frame_width);
        let frame_height = f64::from(face.frame_height);
        let dx = face.region.center_x() - frame_width / 2.0;
        let dy = face.region.center_y() - frame_height / 2.0;
        let offset_frac = (dx * dx + dy * dy).sqrt() / frame_width;
        let center_term = 100.0 - offset_frac * 100.0 * self.config.center_penalty;

        let width_frac = f64::from(face.region.width) / frame_width;
        let size_term = 100.0
            - (width_frac - self.config.ideal_face_width_frac).abs() * 100.0
                * self.config.size_penalty;

        (center_term + size_term) / 2.0
    }

    fn expression(&self, confidence: f64, signals: &OpticalSignals) -> (String, f64) {
        match signals.expressions.as_ref().and_then(|dist| dist.dominant()) {
            Some((name, probability)) => (name.to_string(), probability * 100.0),
            None => (
                NEUTRAL_EXPRESSION.to_string(),
                self.config.expression_baseline * confidence,
            ),
        }
    }
}

fn clamp_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
