pub mod config;
mod detector;
mod skin;
mod types;

pub use config::{DetectionSensitivity, DetectorConfig};
pub use detector::FaceDetector;
pub use types::{DetectionRegion, PresenceVerdict};
