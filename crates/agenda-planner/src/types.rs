//! Results of the planner operations, shaped for direct serialization.

use agenda_core::{Session, SessionSummary, TimeOfDay};
use serde::Serialize;

use crate::timeline::Timeline;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningStarted {
    pub session_id: String,
    pub day: String,
    /// Sessions sharing the earliest start of the day.
    pub options: Vec<SessionSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionChosen {
    pub session_id: String,
    pub selected: Session,
    pub next_options: Vec<SessionSummary>,
    pub is_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningOptions {
    pub session_id: String,
    pub options: Vec<SessionSummary>,
    pub last_end_time: TimeOfDay,
    pub scheduled: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleView {
    pub session_id: String,
    pub day: String,
    /// Ordered by start time.
    pub schedule: Vec<Session>,
    pub timeline: Timeline,
    pub last_end_time: TimeOfDay,
    /// Set by finish_planning.
    pub completed: bool,
    /// Same rule as `Planner::is_complete`.
    pub is_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningFinished {
    pub session_id: String,
    pub day: String,
    pub schedule: Vec<Session>,
    pub scheduled: usize,
    pub last_end_time: TimeOfDay,
}
