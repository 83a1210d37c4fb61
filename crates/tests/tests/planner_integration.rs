use nordic_core::{BudgetTier, ItineraryInputs, LengthControl};
use nordic_observability::AppMetrics;
use nordic_planner::TripPlanner;
use nordic_storage::{CatalogHandle, CatalogStore};
use nordic_tests::fixture_catalog_path;

fn fixture_planner() -> TripPlanner {
    let (handle, _loader) = CatalogHandle::spawn_load(CatalogStore::file(fixture_catalog_path()));
    TripPlanner::new(handle, AppMetrics::shared())
}

fn inputs(region: &str, route: Option<&str>, length: Option<i64>, budget: &str) -> ItineraryInputs {
    ItineraryInputs {
        region: Some(region.to_string()),
        route: route.map(ToString::to_string),
        length,
        budget: Some(budget.to_string()),
    }
}

#[tokio::test]
async fn regions_follow_catalog_order() {
    let planner = fixture_planner();
    let regions = planner.regions().await;

    let names = regions.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Norway", "Iceland", "Finland"]);
    assert_eq!(regions[1].route_count, 2);
}

#[tokio::test]
async fn fixed_route_is_auto_selected_and_locked() {
    let planner = fixture_planner();

    let menu = planner.route_menu("norway").await;
    assert_eq!(menu.auto_selected.as_deref(), Some("norway-in-a-nutshell"));

    let control = planner.length_control("norway-in-a-nutshell").await;
    assert_eq!(control, LengthControl::Locked { days: 5 });

    let itinerary = planner.plan(inputs("Norway", None, Some(9999), "mid")).await;
    assert_eq!(itinerary.length, 5);
    assert_eq!(itinerary.estimate, 5 * 230);
    assert_eq!(itinerary.days[4].title, "Hardangerfjord");
    assert!(!itinerary.fallback);
}

#[tokio::test]
async fn flexible_route_clamps_and_cycles_optional_days() {
    let planner = fixture_planner();

    let itinerary = planner
        .plan(inputs("Iceland", Some("iceland-ring-road"), Some(2), "premium"))
        .await;

    assert_eq!(itinerary.length, 7);
    assert_eq!(itinerary.budget, BudgetTier::Premium);
    assert_eq!(itinerary.estimate, 7 * 400);
    let titles = itinerary
        .days
        .iter()
        .map(|d| d.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        titles,
        vec![
            "Reykjavík",
            "South coast",
            "Glacier lagoon",
            "Eastfjords",
            "Lake Mývatn",
            "Eastfjords",
            "Lake Mývatn"
        ]
    );
}

#[tokio::test]
async fn route_without_optional_days_gets_numbered_extras() {
    let planner = fixture_planner();

    let itinerary = planner
        .plan(inputs("Iceland", Some("iceland-golden-circle"), Some(4), "budget"))
        .await;

    assert_eq!(itinerary.days.len(), 4);
    assert_eq!(itinerary.days[1].title, "Extra Day 2");
    assert_eq!(itinerary.days[3].title, "Extra Day 4");
    assert_eq!(itinerary.estimate, 4 * 130);
}

#[tokio::test]
async fn unknown_route_uses_flat_rate_fallback() {
    let planner = fixture_planner();

    let itinerary = planner
        .plan(inputs("Norway", Some("no-such-route"), Some(4), "premium"))
        .await;

    assert!(itinerary.fallback);
    assert_eq!(itinerary.region, "Norway");
    assert_eq!(itinerary.estimate, 600);
    assert_eq!(itinerary.days[0].title, "Day 1");
    assert_eq!(planner.metrics().fallback_total, 1);
}

#[tokio::test]
async fn repeated_plans_are_identical() {
    let planner = fixture_planner();
    let request = inputs("finland", None, Some(40), "budget");

    let first = planner.plan(request.clone()).await;
    let second = planner.plan(request).await;

    assert_eq!(first, second);
    assert_eq!(first.length, 6);
}

#[tokio::test]
async fn missing_catalog_degrades_to_fallback_plans() {
    let (handle, loader) =
        CatalogHandle::spawn_load(CatalogStore::file(fixture_catalog_path().with_extension("missing")));
    let planner = TripPlanner::new(handle, AppMetrics::shared());

    assert!(planner.regions().await.is_empty());
    assert!(planner.route_menu("Norway").await.options.is_empty());

    let itinerary = planner
        .plan(ItineraryInputs {
            length: Some(20),
            ..ItineraryInputs::default()
        })
        .await;
    assert_eq!(itinerary.region, "Norway");
    assert_eq!(itinerary.length, 14);
    assert_eq!(itinerary.estimate, 14 * 150);

    assert!(loader.await.unwrap().degraded);
}

#[tokio::test]
async fn itinerary_serializes_with_camel_case_keys() {
    let planner = fixture_planner();
    let itinerary = planner.plan(inputs("Finland", None, None, "mid")).await;

    let json = serde_json::to_value(&itinerary).unwrap();
    assert_eq!(json["routeId"], "lapland-aurora");
    assert_eq!(json["budget"], "mid");
    assert_eq!(json["currency"], "€");
    assert_eq!(json["length"], 3);
    assert_eq!(json["focus"], serde_json::json!([]));
    assert_eq!(
        json["affiliates"],
        serde_json::json!({ "hotel": "#", "activity": "#", "transport": "#" })
    );
}
