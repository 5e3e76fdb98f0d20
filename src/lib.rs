//! Heuristic webcam presence detection and interview confidence scoring.
//!
//! The pipeline runs detector, scorer and session aggregator on a timer
//! against a caller-supplied frame source; [`AnalysisController`] owns that
//! loop. The [`interview`] module layers a scripted mock-interview flow on
//! top of the same scoring vocabulary.

pub mod analyzer;
pub mod detect;
pub mod frame;
pub mod interview;
pub mod perf;
pub mod scoring;
pub mod session;
pub mod settings;
mod utils;

pub use analyzer::{AnalysisController, AnalysisUpdate, AnalyzerConfig};
pub use detect::{
    DetectionRegion, DetectionSensitivity, DetectorConfig, FaceDetector, PresenceVerdict,
};
pub use frame::{FeedState, FrameSource, ImageFrame, VideoFrame};
pub use interview::InterviewFlow;
pub use perf::{PerfMonitor, PerfSnapshot};
pub use scoring::{
    ConfidenceLevel, ConfidenceScorer, OpticalSignalSource, OpticalSignals, ScorerConfig,
};
pub use session::{AnalysisSample, SessionAggregator, SessionSnapshot};
pub use settings::{AnalysisSettings, SettingsStore};
