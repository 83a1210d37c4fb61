pub mod catalog;
pub mod models;
pub mod planner;
pub mod policy;

pub use catalog::{
    build_index, region_key, resolve_routes_for_region, Catalog, CatalogIndex, RegionSummary,
    RouteChoice, RouteMenu, RouteOption,
};
pub use models::*;
pub use planner::{build_days, build_itinerary, estimate, fallback_estimate};
pub use policy::{resolve_length, LengthBounds, LengthControl};
