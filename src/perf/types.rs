use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemUsage {
    pub cpu_percent: f32,
    pub memory_mb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerfSnapshot {
    pub system: SystemUsage,
    pub recent_tick_ms: Vec<u64>,
    pub avg_tick_ms: f64,
    pub tick_count: u64,
}

impl Default for PerfSnapshot {
    fn default() -> Self {
        Self {
            system: SystemUsage {
                cpu_percent: 0.0,
                memory_mb: 0.0,
            },
            recent_tick_ms: Vec::new(),
            avg_tick_ms: 0.0,
            tick_count: 0,
        }
    }
}
