use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub uptime_seconds: u64,
    pub users_loaded: usize,
    pub requests_served: u64,
    pub memory_usage_mb: f32,
    pub rng_seeded: bool,
}

#[derive(Clone)]
pub struct HealthTracker {
    start_time: Instant,
    requests_served: Arc<AtomicU64>,
}

impl HealthTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            requests_served: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_request(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    pub fn get_health(&self, users_loaded: usize, rng_seeded: bool) -> ServiceHealth {
        ServiceHealth {
            uptime_seconds: self.start_time.elapsed().as_secs(),
            users_loaded,
            requests_served: self.requests_served(),
            memory_usage_mb: get_memory_usage_mb(),
            rng_seeded,
        }
    }
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn get_memory_usage_mb() -> f32 {
    // RSS lu dans /proc, 0 ailleurs
    #[cfg(target_os = "linux")]
    {
        let pid = std::process::id();
        if let Ok(status) = std::fs::read_to_string(format!("/proc/{}/status", pid)) {
            let rss_kb = status
                .lines()
                .find(|line| line.starts_with("VmRSS:"))
                .and_then(|line| line.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<u64>().ok());
            if let Some(kb) = rss_kb {
                return (kb as f32) / 1024.0; // KB -> MB
            }
        }
    }

    0.0
}
