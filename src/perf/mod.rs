mod types;

pub use types::{PerfSnapshot, SystemUsage};

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sysinfo::{Pid, ProcessesToUpdate, System};

const MAX_RECENT_TICKS: usize = 20;

/// Tracks per-tick processing cost plus this process's CPU and memory use.
pub struct PerfMonitor {
    inner: Arc<Mutex<PerfState>>,
}

struct PerfState {
    recent_tick_ms: Vec<u64>,
    tick_count: u64,
    system: System,
    pid: Pid,
}

impl PerfMonitor {
    pub fn new() -> Self {
        let mut system = System::new();
        let pid = Pid::from_u32(std::process::id());

        // Initial refresh to establish a baseline for CPU deltas.
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        Self {
            inner: Arc::new(Mutex::new(PerfState {
                recent_tick_ms: Vec::with_capacity(MAX_RECENT_TICKS),
                tick_count: 0,
                system,
                pid,
            })),
        }
    }

    pub fn record_tick(&self, elapsed: Duration) {
        let mut state = self.inner.lock().unwrap();
        state.tick_count += 1;
        state.recent_tick_ms.push(elapsed.as_millis() as u64);
        if state.recent_tick_ms.len() > MAX_RECENT_TICKS {
            state.recent_tick_ms.remove(0);
        }
    }

    pub fn snapshot(&self) -> PerfSnapshot {
        let mut state = self.inner.lock().unwrap();
        let pid = state.pid;
        state.system.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        let system = if let Some(process) = state.system.process(pid) {
            SystemUsage {
                cpu_percent: process.cpu_usage(),
                memory_mb: process.memory() as f64 / 1024.0 / 1024.0,
            }
        } else {
            SystemUsage {
                cpu_percent: 0.0,
                memory_mb: 0.0,
            }
        };

        let avg_tick_ms = if state.recent_tick_ms.is_empty() {
            0.0
        } else {
            state.recent_tick_ms.iter().sum::<u64>() as f64 / state.recent_tick_ms.len() as f64
        };

        PerfSnapshot {
            system,
            recent_tick_ms: state.recent_tick_ms.clone(),
            avg_tick_ms,
            tick_count: state.tick_count,
        }
    }

    pub fn reset(&self) {
        let mut state = self.inner.lock().unwrap();
        let pid = state.pid;
        state.recent_tick_ms.clear();
        state.tick_count = 0;
        // Re-establish the CPU baseline for the next session.
        state.system.refresh_processes(ProcessesToUpdate::Some(&[pid]));
    }
}

impl Clone for PerfMonitor {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
