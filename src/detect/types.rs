use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Axis-aligned box in frame pixel coordinates marking the candidate face
/// area. Valid only for the frame it was produced from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DetectionRegion {
    pub fn center_x(&self) -> f64 {
        self.x as f64 + self.width as f64 / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y as f64 + self.height as f64 / 2.0
    }
}

/// Per-frame detection decision plus the ratios behind it. The diagnostics
/// map makes the verdict auditable instead of a bare boolean.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceVerdict {
    pub detected: bool,
    pub confidence: f64,
    pub region: Option<DetectionRegion>,
    pub diagnostics: BTreeMap<String, f64>,
}

impl PresenceVerdict {
    /// Verdict for frames that cannot be analyzed at all.
    pub fn absent() -> Self {
        Self {
            detected: false,
            confidence: 0.0,
            region: None,
            diagnostics: BTreeMap::new(),
        }
    }
}
