// HTTP handler tests for LoveFi Match

use actix_web::{http::StatusCode, test, web, App};
use lovefi_match::core::CompatibilityScorer;
use lovefi_match::models::{Coordinates, MatchResponse};
use lovefi_match::routes::{configure_routes, handle_json_payload_error, AppState};
use lovefi_match::services::{CoordinateLookup, GeocodeError, StaticGazetteer};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn state_with(lookup: Arc<dyn CoordinateLookup>, timeout: Duration) -> AppState {
    AppState {
        scorer: CompatibilityScorer::with_lookup(lookup),
        default_search_radius_km: 10.0,
        scoring_timeout: timeout,
    }
}

fn default_state() -> AppState {
    let places = StaticGazetteer::from_entries([
        ("New York", 40.7128, -74.0060),
        ("Boston", 42.3601, -71.0589),
    ])
    .unwrap();
    state_with(Arc::new(places), Duration::from_secs(5))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_check() {
    let app = app!(default_state());

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["name"], "lovefi-match");
    assert_eq!(body["endpoints"].as_array().map(Vec::len), Some(3));
}

#[actix_web::test]
async fn test_simple_match() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/match/simple")
        .set_json(json!({
            "name1": "Alice", "age1": 25, "interests1": ["reading", "hiking", "cooking"],
            "location1": "New York", "preferences1": { "max_age_diff": 5 },
            "name2": "Bob", "age2": 26, "interests2": ["reading", "hiking", "cooking"],
            "location2": "New York", "preferences2": { "max_age_diff": 5 }
        }))
        .to_request();
    let response: MatchResponse = test::call_and_read_body_json(&app, req).await;

    // 40 interests + 16 age + 20 location + 0 preferences
    assert!((response.score - 76.0).abs() < 1e-9, "got {}", response.score);
    assert!(response.details.contains("Distance: 0.0 km"));
    assert!(response.breakdown.is_some());
}

#[actix_web::test]
async fn test_full_match() {
    let app = app!(default_state());

    let preference = json!({
        "category": "lifestyle",
        "question": "What lifestyle do you prefer?",
        "options": ["quiet", "active", "balanced"],
        "selected_index": 2,
        "selected_option": "balanced"
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/match/full")
        .set_json(json!({
            "personal_info1": { "first_name": "Michael", "last_name": "Smith" },
            "gender1": "male",
            "location1": { "address": "New York", "search_radius": 15 },
            "personal_interests1": ["programming", "coffee"],
            "partner_preferences1": [preference.clone()],
            "personal_info2": { "first_name": "Sarah", "last_name": "Johnson" },
            "gender2": "female",
            "location2": { "address": "Boston", "search_radius": 20 },
            "personal_interests2": ["programming", "yoga"],
            "partner_preferences2": [preference]
        }))
        .to_request();
    let response: MatchResponse = test::call_and_read_body_json(&app, req).await;

    // 20 interests + 10 unknown age + 0 beyond radius + 20 preferences
    assert!((response.score - 50.0).abs() < 1e-9, "got {}", response.score);
    assert!(response.details.contains("Age difference: Unknown"));
}

#[actix_web::test]
async fn test_invalid_json_is_rejected() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/match/simple")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_inconsistent_preference_is_rejected() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/match/full")
        .set_json(json!({
            "personal_info1": { "first_name": "A" },
            "partner_preferences1": [{
                "options": ["quiet", "active"],
                "selected_index": 0,
                "selected_option": "active"
            }],
            "personal_info2": { "first_name": "B" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_web::test]
async fn test_lookup_failure_still_scores() {
    let failing = |_: &str| -> Result<Option<Coordinates>, GeocodeError> {
        Err(GeocodeError::Unavailable("service down".to_string()))
    };
    let app = app!(state_with(Arc::new(failing), Duration::from_secs(5)));

    let req = test::TestRequest::post()
        .uri("/api/v1/match/simple")
        .set_json(json!({ "name1": "A", "location1": "Paris", "name2": "B", "location2": "paris" }))
        .to_request();
    let response: MatchResponse = test::call_and_read_body_json(&app, req).await;

    // 0 interests + 10 unknown age + 20 identical address text + 0 preferences
    assert!((response.score - 30.0).abs() < 1e-9, "got {}", response.score);
    assert!(response.details.contains("Distance: Unknown"));
}

#[actix_web::test]
async fn test_timeout_yields_zero_score() {
    let slow = |_: &str| -> Result<Option<Coordinates>, GeocodeError> {
        std::thread::sleep(Duration::from_millis(500));
        Ok(None)
    };
    let app = app!(state_with(Arc::new(slow), Duration::from_millis(20)));

    let req = test::TestRequest::post()
        .uri("/api/v1/match/simple")
        .set_json(json!({ "name1": "A", "location1": "Paris", "name2": "B", "location2": "Rome" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let response: MatchResponse = test::read_body_json(resp).await;
    assert_eq!(response.score, 0.0);
    assert!(response.breakdown.is_none());
    assert!(response.details.starts_with("Error processing match request: scoring timed out"));
}

#[actix_web::test]
async fn test_oversized_address_is_rejected() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/match/simple")
        .set_json(json!({
            "name1": "A", "location1": "ab".repeat(2000),
            "name2": "B", "location2": "ba".repeat(2000)
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_web::test]
async fn test_out_of_range_age_is_rejected() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/match/simple")
        .set_json(json!({ "name1": "A", "age1": i32::MAX, "name2": "B", "age2": -1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
