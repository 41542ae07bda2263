use agenda_planner::{RoomScheduleMode, ScheduleView, SessionStatus};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<T, ApiError>;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/v1/stats", get(stats))
}

pub fn planning_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/planning", post(start_planning))
        .route("/api/v1/planning/{id}/choose", post(choose_session))
        .route("/api/v1/planning/{id}/options", get(get_options))
        .route("/api/v1/planning/{id}/schedule", get(get_schedule))
        .route("/api/v1/planning/{id}/status", get(get_status))
        .route("/api/v1/planning/{id}/finish", post(finish_planning))
}

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/sessions/{code}", get(session_detail))
        .route("/api/v1/rooms/{room}/schedule", get(room_schedule))
        .route("/api/v1/venue", get(venue_map))
}

async fn index(State(state): State<AppState>) -> Json<Value> {
    let event = &state.planner.config().event;
    Json(json!({
        "service": "agenda-server",
        "version": env!("CARGO_PKG_VERSION"),
        "event": event.name,
        "days": event.day_keys(),
    }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "active_itineraries": state.planner.store().len(),
    }))
}

async fn stats(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.planner.stats()))
}

#[derive(Debug, Deserialize)]
pub struct StartPlanningRequest {
    #[serde(default)]
    pub day: String,
}

async fn start_planning(
    State(state): State<AppState>,
    Json(req): Json<StartPlanningRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let started = state.planner.start_planning(&req.day)?;
    let message = format!(
        "Started planning {}. {} sessions open the day; pick one by its code.",
        started.day,
        started.options.len()
    );
    Ok((StatusCode::CREATED, Json(json!({ "data": started, "message": message }))))
}

#[derive(Debug, Deserialize)]
pub struct ChooseSessionRequest {
    #[serde(default, alias = "sessionCode")]
    pub session_code: String,
}

async fn choose_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChooseSessionRequest>,
) -> ApiResult<Json<Value>> {
    let chosen = state.planner.choose_session(&id, &req.session_code)?;
    let message = if !chosen.next_options.is_empty() {
        format!("Selection recorded. {} sessions are open for your next slot.", chosen.next_options.len())
    } else if chosen.is_complete {
        "Selection recorded. Your schedule is complete.".to_string()
    } else {
        "Selection recorded. No more sessions are available right now.".to_string()
    };
    Ok(Json(json!({ "data": chosen, "message": message })))
}

async fn get_options(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let options = state.planner.get_options(&id)?;
    Ok(Json(json!({ "data": options })))
}

#[derive(Serialize)]
struct ScheduleResponse {
    #[serde(flatten)]
    view: ScheduleView,
    text: String,
}

async fn get_schedule(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let view = state.planner.get_schedule(&id)?;
    let text = view.timeline.to_string();
    let data = ScheduleResponse { view, text };
    Ok(Json(json!({ "data": data })))
}

#[derive(Serialize)]
struct StatusResponse {
    #[serde(flatten)]
    status: SessionStatus,
    message: String,
}

async fn get_status(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let status = state.planner.get_next_status(&id)?;
    let message = status.message();
    let data = StatusResponse { status, message };
    Ok(Json(json!({ "data": data })))
}

async fn finish_planning(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let finished = state.planner.finish_planning(&id)?;
    let message = format!(
        "Planning finished: {} sessions on {}, ending at {}.",
        finished.scheduled, finished.day, finished.last_end_time
    );
    Ok(Json(json!({ "data": finished, "message": message })))
}

async fn session_detail(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<Json<Value>> {
    let session = state.planner.session_detail(&code)?;
    Ok(Json(json!({ "data": session })))
}

#[derive(Debug, Default, Deserialize)]
pub struct RoomQuery {
    pub day: Option<String>,
    #[serde(default)]
    pub mode: RoomScheduleMode,
}

async fn room_schedule(
    State(state): State<AppState>,
    Path(room): Path<String>,
    Query(query): Query<RoomQuery>,
) -> ApiResult<Json<Value>> {
    let schedule = state.planner.room_schedule(&room, query.day.as_deref(), query.mode)?;
    let message = schedule.message();
    Ok(Json(json!({ "data": schedule, "message": message })))
}

async fn venue_map(State(state): State<AppState>) -> Json<Value> {
    let map = state.planner.router().venue_map();
    let message = match &map.map_url {
        Some(url) => format!("Venue map: {url}. Rooms are grouped into {} buildings.", map.buildings.len()),
        None => format!("Rooms are grouped into {} buildings.", map.buildings.len()),
    };
    Json(json!({ "data": map, "message": message }))
}
