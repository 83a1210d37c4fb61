use serde::{Deserialize, Serialize};

pub const CURRENCY_SYMBOL: &str = "€";
pub const DEFAULT_REGION_NAME: &str = "Norway";
pub const OTHER_REGION_NAME: &str = "Other";
pub const AFFILIATE_PLACEHOLDER_LINK: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Day {
    pub title: String,
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
}

impl Day {
    pub fn new(
        title: impl Into<String>,
        morning: impl Into<String>,
        afternoon: impl Into<String>,
        evening: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            morning: morning.into(),
            afternoon: afternoon.into(),
            evening: evening.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_days: Option<u32>,
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub optional_days: Vec<Day>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDuration {
    Fixed(u32),
    Flexible { min: u32, max: u32 },
    Unspecified {
        min_days: Option<u32>,
        max_days: Option<u32>,
    },
}

impl Route {
    pub fn duration(&self) -> RouteDuration {
        match (self.length, self.min_days, self.max_days) {
            (Some(length), _, _) => RouteDuration::Fixed(length),
            (None, Some(min), Some(max)) => RouteDuration::Flexible { min, max },
            (None, min_days, max_days) => RouteDuration::Unspecified { min_days, max_days },
        }
    }

    pub fn region_name(&self) -> &str {
        match self.region.as_deref() {
            Some(region) if !region.trim().is_empty() => region,
            _ => OTHER_REGION_NAME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Budget,
    #[default]
    Mid,
    Premium,
}

impl BudgetTier {
    pub fn from_optional_str(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "budget" => Self::Budget,
            Some(v) if v == "premium" => Self::Premium,
            _ => Self::Mid,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Mid => "mid",
            Self::Premium => "premium",
        }
    }

    pub fn daily_rates(self) -> (u64, u64) {
        match self {
            Self::Budget => (90, 40),
            Self::Mid => (150, 80),
            Self::Premium => (260, 140),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryInputs {
    pub region: Option<String>,
    pub route: Option<String>,
    pub length: Option<i64>,
    pub budget: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    pub length: u32,
    pub budget: BudgetTier,
    pub estimate: u64,
    pub currency: String,
    pub fallback: bool,
    pub focus: Vec<String>,
    pub days: Vec<Day>,
    pub affiliates: Affiliates,
}

// booking links are placeholders until a partner integration exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliates {
    pub hotel: String,
    pub activity: String,
    pub transport: String,
}

impl Default for Affiliates {
    fn default() -> Self {
        Self {
            hotel: AFFILIATE_PLACEHOLDER_LINK.to_string(),
            activity: AFFILIATE_PLACEHOLDER_LINK.to_string(),
            transport: AFFILIATE_PLACEHOLDER_LINK.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub routes: Vec<Route>,
}
