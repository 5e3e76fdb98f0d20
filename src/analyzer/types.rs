use serde::{Deserialize, Serialize};

use crate::session::{AnalysisSample, SessionSnapshot};

/// Payload published on the update channel after every scored tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisUpdate {
    pub sample: AnalysisSample,
    pub snapshot: SessionSnapshot,
}
