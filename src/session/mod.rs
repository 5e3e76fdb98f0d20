mod types;

pub use types::{AnalysisSample, SessionSnapshot, NO_FACE_EXPRESSION};

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Samples retained in the sliding window; oldest are evicted first.
pub const MAX_RETAINED_SAMPLES: usize = 300;

/// Owns one session's score history. Cheap to clone; clones share state.
pub struct SessionAggregator {
    inner: Arc<Mutex<SessionState>>,
}

struct SessionState {
    session_id: String,
    started_at: DateTime<Utc>,
    samples: Vec<AnalysisSample>,
    running_average: u8,
    peak_score: u8,
    sample_count: u64,
}

impl SessionState {
    fn fresh() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            samples: Vec::new(),
            running_average: 0,
            peak_score: 0,
            sample_count: 0,
        }
    }
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState::fresh())),
        }
    }

    pub fn append(&self, sample: AnalysisSample) {
        let mut state = self.inner.lock().unwrap();
        let score = sample.confidence_score;

        // Halving recurrence, not a cumulative mean.
        state.running_average = if state.running_average == 0 {
            score
        } else {
            ((state.running_average as f64 + score as f64) / 2.0).round() as u8
        };
        state.peak_score = state.peak_score.max(score);
        state.sample_count += 1;

        state.samples.push(sample);
        if state.samples.len() > MAX_RETAINED_SAMPLES {
            state.samples.remove(0);
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.lock().unwrap();
        SessionSnapshot {
            session_id: state.session_id.clone(),
            started_at: state.started_at,
            samples: state.samples.clone(),
            running_average: state.running_average,
            peak_score: state.peak_score,
            sample_count: state.sample_count,
        }
    }

    /// Discards the session and starts a fresh one under a new id.
    pub fn reset(&self) {
        let mut state = self.inner.lock().unwrap();
        *state = SessionState::fresh();
    }
}

impl Clone for SessionAggregator {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for SessionAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(score: u8, timestamp_ms: u64) -> AnalysisSample {
        AnalysisSample {
            confidence_score: score,
            eye_contact_score: score,
            head_posture_score: score,
            expression_score: score,
            dominant_expression: "neutral".to_string(),
            face_detected: true,
            timestamp_ms,
        }
    }

    #[test]
    fn running_average_follows_halving_recurrence() {
        let aggregator = SessionAggregator::new();
        let mut observed = Vec::new();
        for (i, score) in [80u8, 60, 90].into_iter().enumerate() {
            aggregator.append(sample(score, i as u64 * 1000));
            observed.push(aggregator.snapshot().running_average);
        }
        assert_eq!(observed, vec![80, 70, 80]);
    }

    #[test]
    fn zero_scores_flow_through_the_recurrence() {
        let aggregator = SessionAggregator::new();
        aggregator.append(AnalysisSample::no_face(0));
        assert_eq!(aggregator.snapshot().running_average, 0);

        aggregator.append(sample(80, 1000));
        assert_eq!(aggregator.snapshot().running_average, 80);

        aggregator.append(AnalysisSample::no_face(2000));
        assert_eq!(aggregator.snapshot().running_average, 40);
    }

    #[test]
    fn peak_is_monotone_until_reset() {
        let aggregator = SessionAggregator::new();
        let mut last_peak = 0;
        for (i, score) in [10u8, 90, 40, 90, 20, 95, 30].into_iter().enumerate() {
            aggregator.append(sample(score, i as u64));
            let peak = aggregator.snapshot().peak_score;
            assert!(peak >= last_peak);
            last_peak = peak;
        }
        assert_eq!(last_peak, 95);

        aggregator.reset();
        assert_eq!(aggregator.snapshot().peak_score, 0);
        aggregator.append(sample(42, 0));
        assert_eq!(aggregator.snapshot().peak_score, 42);
    }

    #[test]
    fn window_evicts_oldest_first() {
        let aggregator = SessionAggregator::new();
        let total = MAX_RETAINED_SAMPLES as u64 + 5;
        for i in 0..total {
            aggregator.append(sample(50, i));
        }

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.samples.len(), MAX_RETAINED_SAMPLES);
        assert_eq!(snapshot.sample_count, total);
        // The five oldest samples are gone.
        assert_eq!(snapshot.samples.first().unwrap().timestamp_ms, 5);
        assert_eq!(snapshot.samples.last().unwrap().timestamp_ms, total - 1);
    }

    #[test]
    fn reset_issues_a_new_session_id() {
        let aggregator = SessionAggregator::new();
        let before = aggregator.snapshot().session_id;
        aggregator.append(sample(70, 0));
        aggregator.reset();

        let snapshot = aggregator.snapshot();
        assert_ne!(snapshot.session_id, before);
        assert!(snapshot.samples.is_empty());
        assert_eq!(snapshot.running_average, 0);
        assert_eq!(snapshot.sample_count, 0);
    }

    #[test]
    fn snapshots_are_detached_copies() {
        let aggregator = SessionAggregator::new();
        aggregator.append(sample(60, 0));

        let mut snapshot = aggregator.snapshot();
        snapshot.samples.clear();
        snapshot.running_average = 0;

        assert_eq!(aggregator.snapshot().samples.len(), 1);
        assert_eq!(aggregator.snapshot().running_average, 60);
    }
}
