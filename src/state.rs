use crate::config::AppConfig;
use crate::models::black_scholes::BlackScholes;
use crate::models::PricingModel;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ── Performance Counters (lock-free) ──

pub struct PerfCounters {
    pub pricing_requests: AtomicU64,
    pub portfolio_requests: AtomicU64,
    pub client_errors: AtomicU64,
    pub undefined_ratios: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            pricing_requests: AtomicU64::new(0),
            portfolio_requests: AtomicU64::new(0),
            client_errors: AtomicU64::new(0),
            undefined_ratios: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            pricing_requests: self.pricing_requests.load(Ordering::Relaxed),
            portfolio_requests: self.portfolio_requests.load(Ordering::Relaxed),
            client_errors: self.client_errors.load(Ordering::Relaxed),
            undefined_ratios: self.undefined_ratios.load(Ordering::Relaxed),
        }
    }
}

impl Default for PerfCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CounterSnapshot {
    pub pricing_requests: u64,
    pub portfolio_requests: u64,
    pub client_errors: u64,
    pub undefined_ratios: u64,
}

// ── Shared State (handed to every axum handler) ──

/// Nothing here feeds back into pricing: the config is read-only and the
/// counters are write-only from the handlers' point of view.
pub struct AppState {
    pub config: AppConfig,
    pub model: Box<dyn PricingModel>,
    pub counters: PerfCounters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Self::with_model(config, Box::new(BlackScholes))
    }

    pub fn with_model(config: AppConfig, model: Box<dyn PricingModel>) -> Arc<Self> {
        Arc::new(Self {
            config,
            model,
            counters: PerfCounters::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_snapshot() {
        let state = AppState::new(AppConfig::default());
        PerfCounters::bump(&state.counters.pricing_requests);
        PerfCounters::bump(&state.counters.pricing_requests);
        PerfCounters::bump(&state.counters.client_errors);
        let snap = state.counters.snapshot();
        assert_eq!(snap.pricing_requests, 2);
        assert_eq!(snap.client_errors, 1);
        assert_eq!(snap.portfolio_requests, 0);
        assert_eq!(state.model.name(), "Black-Scholes");
    }
}
