use crate::models::{
    Affiliates, BudgetTier, Day, Itinerary, ItineraryInputs, Route, CURRENCY_SYMBOL,
    DEFAULT_REGION_NAME,
};
use crate::policy::resolve_length;

pub const FALLBACK_DAILY_RATE: u64 = 150;

pub fn build_days(route: &Route, desired: usize) -> Vec<Day> {
    (0..desired).map(|position| day_at(route, position)).collect()
}

fn day_at(route: &Route, position: usize) -> Day {
    if let Some(day) = route.days.get(position) {
        return day.clone();
    }

    let pad_slot = position - route.days.len();
    match route.optional_days.len() {
        0 => extra_day(position + 1),
        pool => route.optional_days[pad_slot % pool].clone(),
    }
}

fn extra_day(number: usize) -> Day {
    Day::new(
        format!("Extra Day {number}"),
        "Leisure morning",
        "Optional excursion",
        "Relaxed dinner",
    )
}

fn generic_day(number: usize) -> Day {
    Day::new(
        format!("Day {number}"),
        "Scenic viewpoint / easy hike",
        "Local signature activity",
        "Local dining & rest",
    )
}

pub fn estimate(length: u32, tier: BudgetTier) -> u64 {
    let (nightly, activity) = tier.daily_rates();
    u64::from(length) * (nightly + activity)
}

// flat rate regardless of tier
pub fn fallback_estimate(length: u32) -> u64 {
    u64::from(length) * FALLBACK_DAILY_RATE
}

pub fn build_itinerary(route: Option<&Route>, inputs: &ItineraryInputs) -> Itinerary {
    let budget = BudgetTier::from_optional_str(inputs.budget.as_deref());
    let length = resolve_length(route, inputs.length);

    match route {
        Some(route) => Itinerary {
            region: route.region_name().to_string(),
            route_id: Some(route.id.clone()),
            length,
            budget,
            estimate: estimate(length, budget),
            currency: CURRENCY_SYMBOL.to_string(),
            fallback: false,
            focus: Vec::new(),
            days: build_days(route, length as usize),
            affiliates: Affiliates::default(),
        },
        None => {
            let region = match inputs.region.as_deref() {
                Some(region) if !region.is_empty() => region.to_string(),
                _ => DEFAULT_REGION_NAME.to_string(),
            };

            Itinerary {
                region,
                route_id: None,
                length,
                budget,
                estimate: fallback_estimate(length),
                currency: CURRENCY_SYMBOL.to_string(),
                fallback: true,
                focus: Vec::new(),
                days: (1..=length as usize).map(generic_day).collect(),
                affiliates: Affiliates::default(),
            }
        }
    }
}
