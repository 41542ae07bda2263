use crate::app;
use crate::state::AppState;
use agenda_core::{AgendaConfig, EventConfig, ManualClock, StaticCatalog};
use agenda_planner::Planner;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{FixedOffset, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const SAMPLE: &str = include_str!("../../../data/catalog.sample.json");

/// Aug 9, 09:10 event-local.
fn state() -> AppState {
    let now = FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 8, 9, 9, 10, 0)
        .unwrap()
        .with_timezone(&Utc);
    let catalog = StaticCatalog::from_json(SAMPLE, &EventConfig::default()).unwrap();
    let planner = Planner::new(AgendaConfig::default(), Arc::new(catalog), Arc::new(ManualClock::new(now))).unwrap();
    AppState::new(Arc::new(planner))
}

async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app(state.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn start(state: &AppState) -> String {
    let (status, body) = send(state, "POST", "/api/v1/planning", Some(json!({"day": "Aug9"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["session_id"].as_str().unwrap().to_string()
}

// ========== Health ==========

#[tokio::test]
async fn test_index_and_health() {
    let s = state();
    let (status, body) = send(&s, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "agenda-server");
    assert_eq!(body["days"], json!(["Aug9", "Aug10"]));

    let (status, body) = send(&s, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["active_itineraries"], 0);
}

#[tokio::test]
async fn test_stats() {
    let s = state();
    start(&s).await;
    start(&s).await;
    let (status, body) = send(&s, "GET", "/api/v1/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], 2);
    assert_eq!(body["num_shards"], 16);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _) = send(&state(), "GET", "/api/v1/nothing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ========== Planning ==========

#[tokio::test]
async fn test_start_planning() {
    let s = state();
    let (status, body) = send(&s, "POST", "/api/v1/planning", Some(json!({"day": "Aug9"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["session_id"].as_str().unwrap().starts_with("user_09_"));
    assert_eq!(body["data"]["options"][0]["code"], "OPEN01");
    assert!(body["data"]["options"][0].get("abstract").is_none());
}

#[tokio::test]
async fn test_start_planning_bad_day() {
    let s = state();
    let (status, body) = send(&s, "POST", "/api/v1/planning", Some(json!({"day": "Aug12"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let (status, body) = send(&s, "POST", "/api/v1/planning", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("day"));
}

#[tokio::test]
async fn test_choose_and_conflict() {
    let s = state();
    let id = start(&s).await;
    let uri = format!("/api/v1/planning/{id}/choose");

    let (status, body) = send(&s, "POST", &uri, Some(json!({"session_code": "RB1030"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["selected"]["code"], "RB1030");
    assert_eq!(body["data"]["is_complete"], false);

    let (status, body) = send(&s, "POST", &uri, Some(json!({"sessionCode": "TR1030"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "time_conflict");
    assert_eq!(body["error"]["details"]["conflicts"][0]["code"], "RB1030");
    assert_eq!(body["error"]["details"]["requested"]["start"], "10:30");
}

#[tokio::test]
async fn test_not_found_errors() {
    let s = state();
    let (status, body) = send(&s, "GET", "/api/v1/planning/user_09_0_none/options", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let id = start(&s).await;
    let (status, _) =
        send(&s, "POST", &format!("/api/v1/planning/{id}/choose"), Some(json!({"session_code": "NOPE"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_options_schedule_status_finish() {
    let s = state();
    let id = start(&s).await;
    send(&s, "POST", &format!("/api/v1/planning/{id}/choose"), Some(json!({"session_code": "OPEN01"}))).await;

    let (status, body) = send(&s, "GET", &format!("/api/v1/planning/{id}/options"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["last_end_time"], "09:30");
    let options: Vec<&str> =
        body["data"]["options"].as_array().unwrap().iter().map(|o| o["code"].as_str().unwrap()).collect();
    assert!(options.contains(&"KEY001"));
    assert!(!options.contains(&"HACK09"));

    let (status, body) = send(&s, "GET", &format!("/api/v1/planning/{id}/schedule"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["schedule"][0]["code"], "OPEN01");
    assert!(body["data"]["text"].as_str().unwrap().starts_with("Your schedule for Aug9"));
    assert_eq!(body["data"]["is_complete"], false);

    let (status, body) = send(&s, "GET", &format!("/api/v1/planning/{id}/status"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ongoing");
    assert_eq!(body["data"]["remaining_minutes"], 20);
    assert!(body["data"]["message"].as_str().unwrap().contains("20 minutes left"));

    let (status, body) = send(&s, "POST", &format!("/api/v1/planning/{id}/finish"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["scheduled"], 1);
}

// ========== Catalog ==========

#[tokio::test]
async fn test_session_detail() {
    let s = state();
    let (status, body) = send(&s, "GET", "/api/v1/sessions/RB1110", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["abstract"], "Pinning, wakers and executors explained.");
    assert_eq!(body["data"]["url"], "https://coscup.org/2025/sessions/RB1110");

    let (status, _) = send(&s, "GET", "/api/v1/sessions/MISSING", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_venue_map() {
    let s = state();
    let (status, body) = send(&s, "GET", "/api/v1/venue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["map_url"], "https://coscup.org/2025/venue/");
    assert_eq!(body["data"]["buildings"][0], json!({"code": "AU", "name": "Audio-Visual Hall"}));
    assert_eq!(body["data"]["buildings"].as_array().unwrap().len(), 3);
    assert!(!body["data"]["navigation_tips"].as_array().unwrap().is_empty());
    assert!(body["message"].as_str().unwrap().contains("https://coscup.org/2025/venue/"));
}

#[tokio::test]
async fn test_room_schedule() {
    let s = state();
    let (status, body) = send(&s, "GET", "/api/v1/rooms/AU/schedule", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["mode"], "full");
    assert_eq!(body["data"]["total_sessions"], 4);
    assert_eq!(body["data"]["current"]["code"], "OPEN01");

    let (status, body) = send(&s, "GET", "/api/v1/rooms/AU/schedule?mode=next_only", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sessions"][0]["code"], "KEY001");

    let (status, body) = send(&s, "GET", "/api/v1/rooms/TR313/schedule?day=Aug10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["day"], "Aug10");

    let (status, _) = send(&s, "GET", "/api/v1/rooms/Nowhere/schedule", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
