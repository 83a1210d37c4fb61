use serde::{Deserialize, Serialize};

use crate::models::{Route, RouteDuration};

pub const FALLBACK_MIN_DAYS: u32 = 2;
pub const FALLBACK_MAX_DAYS: u32 = 14;
pub const FALLBACK_DEFAULT_DAYS: u32 = 3;
pub const OPEN_LENGTH_PLACEHOLDER: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl LengthBounds {
    pub const FALLBACK: Self = Self {
        min: FALLBACK_MIN_DAYS,
        max: FALLBACK_MAX_DAYS,
        default: FALLBACK_DEFAULT_DAYS,
    };

    pub fn for_route(route: &Route) -> Self {
        match route.duration() {
            RouteDuration::Fixed(length) => {
                let length = length.max(1);
                Self::exact(length)
            }
            RouteDuration::Flexible { min, max } => {
                let min = min.max(1);
                Self {
                    min,
                    max: max.max(min),
                    default: min,
                }
            }
            RouteDuration::Unspecified { min_days, max_days } => {
                let min = min_days.unwrap_or(FALLBACK_MIN_DAYS).max(1);
                let max = max_days
                    .unwrap_or_else(|| min.max(FALLBACK_MAX_DAYS))
                    .max(min);
                Self {
                    min,
                    max,
                    default: min,
                }
            }
        }
    }

    fn exact(length: u32) -> Self {
        Self {
            min: length,
            max: length,
            default: length,
        }
    }

    pub fn clamp(&self, requested: Option<i64>) -> u32 {
        match requested {
            None => self.default,
            Some(value) => {
                let clamped = value.clamp(i64::from(self.min), i64::from(self.max));
                // within [min, max], both u32
                u32::try_from(clamped).unwrap_or(self.min)
            }
        }
    }
}

pub fn resolve_length(route: Option<&Route>, requested: Option<i64>) -> u32 {
    let bounds = match route {
        Some(route) => LengthBounds::for_route(route),
        None => LengthBounds::FALLBACK,
    };
    bounds.clamp(requested)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LengthControl {
    Locked { days: u32 },
    Bounded { min: u32, max: u32 },
    Open { placeholder: u32 },
}

impl LengthControl {
    pub fn for_route(route: Option<&Route>) -> Self {
        let Some(route) = route else {
            return Self::Open {
                placeholder: OPEN_LENGTH_PLACEHOLDER,
            };
        };

        match route.duration() {
            RouteDuration::Fixed(length) => Self::Locked {
                days: length.max(1),
            },
            RouteDuration::Flexible { .. } => {
                let bounds = LengthBounds::for_route(route);
                Self::Bounded {
                    min: bounds.min,
                    max: bounds.max,
                }
            }
            RouteDuration::Unspecified { .. } => Self::Open {
                placeholder: OPEN_LENGTH_PLACEHOLDER,
            },
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }

    pub fn initial_value(&self) -> Option<u32> {
        match self {
            Self::Locked { days } => Some(*days),
            Self::Bounded { min, .. } => Some(*min),
            Self::Open { .. } => None,
        }
    }

    pub fn help_text(&self) -> Option<String> {
        match self {
            Self::Locked { days } => Some(format!(
                "This route is {days} days by design. You can add buffer days later."
            )),
            Self::Bounded { min, max } => Some(format!(
                "Choose between {min} and {max} days for this route."
            )),
            Self::Open { .. } => None,
        }
    }
}
