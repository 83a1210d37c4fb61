use std::sync::Arc;
use std::time::Instant;

use nordic_core::{
    build_itinerary, Catalog, Itinerary, ItineraryInputs, LengthControl, RegionSummary, Route,
    RouteMenu,
};
use nordic_observability::{AppMetrics, MetricsSnapshot};
use nordic_storage::CatalogHandle;
use tracing::{debug, info, instrument};

/// Top-level composition: owns the catalog handle and records metrics around
/// every derivation.
#[derive(Clone)]
pub struct TripPlanner {
    catalog: CatalogHandle,
    metrics: Arc<AppMetrics>,
}

impl TripPlanner {
    pub fn new(catalog: CatalogHandle, metrics: Arc<AppMetrics>) -> Self {
        Self { catalog, metrics }
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::new(CatalogHandle::ready_with(catalog), AppMetrics::shared())
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub async fn catalog(&self) -> Arc<Catalog> {
        let catalog = self.catalog.ready().await;
        self.metrics.set_catalog_routes(catalog.routes().len());
        catalog
    }

    pub async fn regions(&self) -> Vec<RegionSummary> {
        self.catalog().await.index().regions()
    }

    pub async fn route_menu(&self, region: &str) -> RouteMenu {
        let catalog = self.catalog().await;
        self.metrics.inc_region_lookup();

        let menu = catalog.route_choice(region).menu();
        debug!(region = %region, options = menu.options.len(), "route menu resolved");
        menu
    }

    pub async fn length_control(&self, route_id: &str) -> LengthControl {
        let catalog = self.catalog().await;
        LengthControl::for_route(catalog.find_route(route_id))
    }

    #[instrument(skip(self, inputs), fields(region = ?inputs.region, route = ?inputs.route))]
    pub async fn plan(&self, inputs: ItineraryInputs) -> Itinerary {
        let catalog = self.catalog().await;
        let started = Instant::now();

        let route = submitted_route(&catalog, &inputs);
        let itinerary = build_itinerary(route, &inputs);

        self.metrics.inc_itinerary();
        if itinerary.fallback {
            self.metrics.inc_fallback();
        }
        self.metrics.observe_latency(started.elapsed());

        info!(
            region = %itinerary.region,
            route_id = ?itinerary.route_id,
            length = itinerary.length,
            budget = itinerary.budget.as_code(),
            estimate = itinerary.estimate,
            fallback = itinerary.fallback,
            "itinerary built"
        );

        itinerary
    }
}

/// The route a submission refers to: an explicit non-empty id, otherwise the
/// region's auto-selected route. An explicit id that is not in the catalog
/// resolves to no route.
pub fn submitted_route<'a>(catalog: &'a Catalog, inputs: &ItineraryInputs) -> Option<&'a Route> {
    match inputs.route.as_deref().map(str::trim) {
        Some(route_id) if !route_id.is_empty() => catalog.find_route(route_id),
        _ => {
            let region = inputs.region.as_deref().unwrap_or_default();
            catalog.route_choice(region).auto_selected()
        }
    }
}
