use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{CatalogDocument, Route, OTHER_REGION_NAME};

pub const OTHER_REGION_KEY: &str = "other";

pub fn region_key(region: Option<&str>) -> String {
    match region.map(str::trim) {
        Some(region) if !region.is_empty() => region.to_lowercase(),
        _ => OTHER_REGION_KEY.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSummary {
    pub key: String,
    pub name: String,
    pub route_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    by_region: HashMap<String, Vec<Route>>,
    // (key, first-seen display name) in first-seen order
    regions: Vec<(String, String)>,
}

impl CatalogIndex {
    pub fn is_empty(&self) -> bool {
        self.by_region.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_region.len()
    }

    pub fn get(&self, key: &str) -> Option<&[Route]> {
        self.by_region.get(key).map(Vec::as_slice)
    }

    pub fn regions(&self) -> Vec<RegionSummary> {
        self.regions
            .iter()
            .map(|(key, name)| RegionSummary {
                key: key.clone(),
                name: name.clone(),
                route_count: self.by_region.get(key).map_or(0, Vec::len),
            })
            .collect()
    }
}

pub fn build_index(routes: &[Route]) -> CatalogIndex {
    let mut index = CatalogIndex::default();

    for route in routes {
        let key = region_key(route.region.as_deref());
        let group = index.by_region.entry(key.clone()).or_insert_with(|| {
            let name = if key == OTHER_REGION_KEY {
                OTHER_REGION_NAME.to_string()
            } else {
                route.region_name().trim().to_string()
            };
            index.regions.push((key, name));
            Vec::new()
        });
        group.push(route.clone());
    }

    index
}

pub fn resolve_routes_for_region<'a>(index: &'a CatalogIndex, region: &str) -> &'a [Route] {
    let trimmed = region.trim();
    if trimmed.is_empty() {
        return &[];
    }
    index.get(&trimmed.to_lowercase()).unwrap_or(&[])
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    routes: Vec<Route>,
    index: CatalogIndex,
}

impl Catalog {
    pub fn new(routes: Vec<Route>) -> Self {
        let index = build_index(&routes);
        Self { routes, index }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_document(document: CatalogDocument) -> Self {
        Self::new(document.routes)
    }

    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Ok(Self::from_document(document))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn find_route(&self, route_id: &str) -> Option<&Route> {
        if route_id.is_empty() {
            return None;
        }
        self.routes.iter().find(|route| route.id == route_id)
    }

    pub fn routes_for_region(&self, region: &str) -> &[Route] {
        resolve_routes_for_region(&self.index, region)
    }

    pub fn route_choice(&self, region: &str) -> RouteChoice<'_> {
        RouteChoice::from_candidates(self.routes_for_region(region))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteChoice<'a> {
    Unavailable,
    AutoSelected(&'a Route),
    Choose(&'a [Route]),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMenu {
    pub prompt: String,
    pub options: Vec<RouteOption>,
    pub auto_selected: Option<String>,
}

impl<'a> RouteChoice<'a> {
    pub fn from_candidates(candidates: &'a [Route]) -> Self {
        match candidates {
            [] => Self::Unavailable,
            [only] => Self::AutoSelected(only),
            many => Self::Choose(many),
        }
    }

    pub fn auto_selected(&self) -> Option<&'a Route> {
        match self {
            Self::AutoSelected(route) => Some(route),
            _ => None,
        }
    }

    pub fn requires_selection(&self) -> bool {
        matches!(self, Self::Choose(_))
    }

    pub fn menu(&self) -> RouteMenu {
        match self {
            Self::Unavailable => RouteMenu {
                prompt: "No route available".to_string(),
                options: Vec::new(),
                auto_selected: None,
            },
            Self::AutoSelected(route) => RouteMenu {
                prompt: format!("{} (auto-selected)", route.name),
                options: vec![RouteOption {
                    id: route.id.clone(),
                    label: format!("{} (auto-selected)", route.name),
                }],
                auto_selected: Some(route.id.clone()),
            },
            Self::Choose(routes) => RouteMenu {
                prompt: "Choose a route".to_string(),
                options: routes
                    .iter()
                    .map(|route| RouteOption {
                        id: route.id.clone(),
                        label: route.name.clone(),
                    })
                    .collect(),
                auto_selected: None,
            },
        }
    }
}
