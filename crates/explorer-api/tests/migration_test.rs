//! Integration tests for the client migration endpoint.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_first_migration_creates_itinerary() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user();

    let response = app
        .request(
            "POST",
            "/api/itineraries/migrate",
            Some(json!([
                {"id": "E1", "name": "Inti Raymi", "start": "2025-06-24"},
                {"id": "E1", "name": "Duplicate"},
                {"name": "No id"},
            ])),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["migrated"], true);
    assert_eq!(response.body["clearLegacy"], true);
    assert_eq!(response.body["rejected"], 2);
    assert_eq!(response.body["itinerary"]["name"], "My Itinerary");
    assert_eq!(response.body["itinerary"]["events"][0]["date"], "2025-06-24");
}

#[tokio::test]
async fn test_second_migration_is_skipped() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user();
    let payload = json!([{"id": "E1", "name": "Inti Raymi"}]);

    let first = app
        .request(
            "POST",
            "/api/itineraries/migrate",
            Some(payload.clone()),
            Some(&token),
        )
        .await;
    assert_eq!(first.body["migrated"], true);

    let second = app
        .request("POST", "/api/itineraries/migrate", Some(payload), Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["migrated"], false);
    assert_eq!(second.body["clearLegacy"], false);
    assert_eq!(second.body["skipped"], "hasItineraries");

    let list = app
        .request("GET", "/api/itineraries", None, Some(&token))
        .await;
    assert_eq!(list.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_payload_without_usable_events_keeps_legacy() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user();

    let response = app
        .request(
            "POST",
            "/api/itineraries/migrate",
            Some(json!([{"name": "No id"}])),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["migrated"], false);
    assert_eq!(response.body["clearLegacy"], false);
    assert_eq!(response.body["skipped"], "noUsableEvents");
}

#[tokio::test]
async fn test_non_array_payload_is_rejected() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user();

    let response = app
        .request(
            "POST",
            "/api/itineraries/migrate",
            Some(json!("not events")),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
