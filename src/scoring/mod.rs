pub mod config;
mod levels;
mod scorer;
mod signals;

pub use config::ScorerConfig;
pub use levels::ConfidenceLevel;
pub use scorer::ConfidenceScorer;
pub use signals::{EyeSpan, ExpressionDistribution, FaceBox, OpticalSignalSource, OpticalSignals};
