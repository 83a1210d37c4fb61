use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, gauge};
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    itineraries_total: AtomicU64,
    fallback_total: AtomicU64,
    region_lookups_total: AtomicU64,
    catalog_routes: AtomicU64,
    total_latency_micros: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub itineraries_total: u64,
    pub fallback_total: u64,
    pub region_lookups_total: u64,
    pub catalog_routes: u64,
    pub avg_latency_micros: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_itinerary(&self) {
        self.itineraries_total.fetch_add(1, Ordering::Relaxed);
        counter!("nordic_itineraries_total").increment(1);
    }

    pub fn inc_fallback(&self) {
        self.fallback_total.fetch_add(1, Ordering::Relaxed);
        counter!("nordic_fallback_plans_total").increment(1);
    }

    pub fn inc_region_lookup(&self) {
        self.region_lookups_total.fetch_add(1, Ordering::Relaxed);
        counter!("nordic_region_lookups_total").increment(1);
    }

    pub fn set_catalog_routes(&self, routes: usize) {
        self.catalog_routes.store(routes as u64, Ordering::Relaxed);
        gauge!("nordic_catalog_routes").set(routes as f64);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let itineraries = self.itineraries_total.load(Ordering::Relaxed);
        let latency = self.total_latency_micros.load(Ordering::Relaxed);

        MetricsSnapshot {
            itineraries_total: itineraries,
            fallback_total: self.fallback_total.load(Ordering::Relaxed),
            region_lookups_total: self.region_lookups_total.load(Ordering::Relaxed),
            catalog_routes: self.catalog_routes.load(Ordering::Relaxed),
            avg_latency_micros: if itineraries == 0 {
                0.0
            } else {
                latency as f64 / itineraries as f64
            },
        }
    }
}

/// Installs the JSON subscriber once; later calls are no-ops.
pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,nordic_planner=info,nordic_storage=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
