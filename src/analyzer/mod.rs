pub mod config;
mod controller;
mod freeze;
mod loop_worker;
mod types;

pub use config::AnalyzerConfig;
pub use controller::AnalysisController;
pub use types::AnalysisUpdate;
