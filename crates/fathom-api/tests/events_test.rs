#![allow(clippy::unwrap_used)]
// Integration tests for `EventsResource` using wiremock.

use serde_json::{Value, json};
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fathom_api::{
    CreateEventParams, Error, FathomApi, ListAllOptions, PaginationParams, UpdateEventParams,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, FathomApi) {
    let server = MockServer::start().await;
    let fathom = FathomApi::builder("test-token")
        .base_url(server.uri())
        .build()
        .unwrap();
    (server, fathom)
}

fn events_path(suffix: &str) -> String {
    format!("/v1/sites/SITE1/events{suffix}")
}

fn mock_event(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "object": "event",
        "name": name,
        "site_id": "SITE1",
        "created_at": "2023-03-04 05:06:07"
    })
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_events() {
    let (server, fathom) = setup().await;

    Mock::given(method("GET"))
        .and(path(events_path("")))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "url": "/v1/sites/SITE1/events",
            "has_more": false,
            "data": [mock_event("EVT1", "Signup"), mock_event("EVT2", "Purchase")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let events = fathom.api().events("SITE1").unwrap();
    let resp = events
        .list(Some(&PaginationParams::default().with_limit(5)))
        .await
        .unwrap();

    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.data[0].site_id, "SITE1");
    assert_eq!(resp.data[1].name, "Purchase");
}

#[tokio::test]
async fn test_list_all_respects_limit() {
    let (server, fathom) = setup().await;

    Mock::given(method("GET"))
        .and(path(events_path("")))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "url": "/v1/sites/SITE1/events",
            "has_more": true,
            "data": [mock_event("EVT1", "A"), mock_event("EVT2", "B")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let events = fathom
        .api()
        .events("SITE1")
        .unwrap()
        .list_all(&ListAllOptions::default().with_limit(2))
        .await
        .unwrap();

    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn test_get_event_via_shortcut() {
    let (server, fathom) = setup().await;

    Mock::given(method("GET"))
        .and(path(events_path("/EVT1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_event("EVT1", "Signup")))
        .mount(&server)
        .await;

    let event = fathom.api().get_event("SITE1", "EVT1").await.unwrap();
    assert_eq!(event.id, "EVT1");
    assert!(event.created_at_time().is_some());
}

#[tokio::test]
async fn test_create_event() {
    let (server, fathom) = setup().await;

    Mock::given(method("POST"))
        .and(path(events_path("")))
        .and(body_json(json!({ "name": "Newsletter Signup" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(mock_event("EVT9", "Newsletter Signup")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let event = fathom
        .api()
        .events("SITE1")
        .unwrap()
        .create(&CreateEventParams {
            name: "Newsletter Signup".into(),
        })
        .await
        .unwrap();

    assert_eq!(event.id, "EVT9");
}

#[tokio::test]
async fn test_update_event() {
    let (server, fathom) = setup().await;

    Mock::given(method("POST"))
        .and(path(events_path("/EVT1")))
        .and(body_json(json!({ "name": "Renamed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_event("EVT1", "Renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let event = fathom
        .api()
        .events("SITE1")
        .unwrap()
        .update(
            "EVT1",
            &UpdateEventParams {
                name: "Renamed".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(event.name, "Renamed");
}

#[tokio::test]
async fn test_wipe_and_delete_event() {
    let (server, fathom) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(events_path("/EVT1/data")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "EVT1", "wiped": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(events_path("/EVT1")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "EVT1", "deleted": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let events = fathom.api().events("SITE1").unwrap();
    assert!(events.wipe("EVT1").await.unwrap().wiped);
    assert!(events.delete("EVT1").await.unwrap().deleted);
}

#[tokio::test]
async fn test_local_failures_never_reach_server() {
    let (server, fathom) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let events = fathom.api().events("SITE1").unwrap();

    for err in [
        events.get("").await.unwrap_err(),
        events.wipe(" ").await.unwrap_err(),
        events.delete("").await.unwrap_err(),
    ] {
        assert!(matches!(err, Error::InvalidArgument(_)), "got: {err:?}");
        assert_eq!(err.to_string(), "Event ID is required");
    }

    let err = events
        .create(&CreateEventParams {
            name: "x".repeat(256),
        })
        .await
        .unwrap_err();
    assert!(err.is_validation(), "got: {err:?}");

    let err = fathom.api().get_event("", "EVT1").await.unwrap_err();
    assert_eq!(err.to_string(), "Site ID is required");

    let err = events.delete("EVT1/data").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "got: {err:?}");
    assert!(fathom.api().events("SITE1/events/EVT1").is_err());
}
