//! Analysis sample and session snapshot data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel expression recorded when no face was detected.
pub const NO_FACE_EXPRESSION: &str = "none";

/// One scored analysis tick. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSample {
    pub confidence_score: u8,
    pub eye_contact_score: u8,
    pub head_posture_score: u8,
    pub expression_score: u8,
    pub dominant_expression: String,
    pub face_detected: bool,
    /// Milliseconds since the scorer's session epoch; monotone within a session.
    pub timestamp_ms: u64,
}

impl AnalysisSample {
    /// Sample for a tick where no face was present or readable. Every score
    /// is exactly zero, not merely small.
    pub fn no_face(timestamp_ms: u64) -> Self {
        Self {
            confidence_score: 0,
            eye_contact_score: 0,
            head_posture_score: 0,
            expression_score: 0,
            dominant_expression: NO_FACE_EXPRESSION.to_string(),
            face_detected: false,
            timestamp_ms,
        }
    }
}

/// Read-only copy of one session's accumulated analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    /// Most recent samples in chronological order; bounded, oldest evicted.
    pub samples: Vec<AnalysisSample>,
    pub running_average: u8,
    pub peak_score: u8,
    /// Total samples appended this session, including evicted ones.
    pub sample_count: u64,
}
