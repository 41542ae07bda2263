//! HTTP surface of the agenda planner (Axum).
//!
//! A thin JSON layer over [`agenda_planner::Planner`]: planning sessions,
//! status queries, catalog lookups and store statistics.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::planning_routes())
        .merge(routes::catalog_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests;
