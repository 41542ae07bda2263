//! Application state shared across all handlers.

use agenda_planner::Planner;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<Planner>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(planner: Arc<Planner>) -> Self {
        Self { planner, start_time: std::time::Instant::now() }
    }
}
