use crate::analysis::Engine;
use crate::config::AppConfig;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ── Performance Counters (lock-free) ──

pub struct PerfCounters {
    pub analyses_served: AtomicU64,
    pub analyses_rejected: AtomicU64,
    pub ws_messages_sent: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            analyses_served: AtomicU64::new(0),
            analyses_rejected: AtomicU64::new(0),
            ws_messages_sent: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_analysis(&self, ok: bool) {
        if ok {
            self.analyses_served.fetch_add(1, Ordering::Relaxed);
        } else {
            self.analyses_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "analyses_served": self.analyses_served.load(Ordering::Relaxed),
            "analyses_rejected": self.analyses_rejected.load(Ordering::Relaxed),
            "ws_messages_sent": self.ws_messages_sent.load(Ordering::Relaxed),
        })
    }
}

impl Default for PerfCounters {
    fn default() -> Self {
        Self::new()
    }
}

// ── Shared Application State ──

/// Everything a request handler needs. The engine is immutable, so handlers
/// share it through the `Arc` without a lock.
pub struct AppState {
    pub config: AppConfig,
    pub engine: Engine,
    pub counters: PerfCounters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        let engine = Engine::new(config.engine_settings());
        Arc::new(Self {
            config,
            engine,
            counters: PerfCounters::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_split_served_and_rejected() {
        let counters = PerfCounters::new();
        counters.record_analysis(true);
        counters.record_analysis(true);
        counters.record_analysis(false);
        let snap = counters.snapshot();
        assert_eq!(snap["analyses_served"], 2);
        assert_eq!(snap["analyses_rejected"], 1);
        assert_eq!(snap["ws_messages_sent"], 0);
    }

    #[test]
    fn test_state_engine_follows_config() {
        let config = AppConfig {
            grid_points: 40,
            ..AppConfig::default()
        };
        let state = AppState::new(config);
        assert_eq!(state.engine.settings().grid_points, 40);
    }
}
