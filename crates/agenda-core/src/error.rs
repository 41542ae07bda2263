use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::session::Session;
use crate::time::TimeOfDay;

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Itinerary not found: {id}")]
    ItineraryNotFound { id: String },
    #[error("Session not found: {code}")]
    SessionNotFound { code: String },
    #[error("No sessions found for room {room} on {day}")]
    RoomNotFound { room: String, day: String },
    #[error("Invalid day: {day} (expected one of {expected})")]
    InvalidDay { day: String, expected: String },
    #[error("Session {code} takes place on {session_day}, not on {itinerary_day}")]
    DayMismatch { code: String, session_day: String, itinerary_day: String },
    #[error("No session data found for {day}")]
    EmptyDay { day: String },
    #[error("{0}")]
    TimeConflict(TimeConflict),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("Invalid time: {0}")]
    InvalidTime(String),
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AgendaError {
    /// True for every "unknown identifier" kind: itinerary, session code, room.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AgendaError::ItineraryNotFound { .. }
                | AgendaError::SessionNotFound { .. }
                | AgendaError::RoomNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AgendaError>;

/// One session named in a conflict report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEntry {
    pub code: String,
    pub title: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl From<&Session> for ConflictEntry {
    fn from(s: &Session) -> Self {
        Self { code: s.code.clone(), title: s.title.clone(), start: s.start, end: s.end }
    }
}

impl fmt::Display for ConflictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} \"{}\"", self.start, self.end, self.title)
    }
}

/// A rejected selection together with every scheduled session it overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConflict {
    pub requested: ConflictEntry,
    pub conflicts: Vec<ConflictEntry>,
}

impl TimeConflict {
    pub fn codes(&self) -> Vec<&str> {
        self.conflicts.iter().map(|c| c.code.as_str()).collect()
    }
}

impl fmt::Display for TimeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.conflicts.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ");
        write!(
            f,
            "Time conflict: {} overlaps already scheduled {}. Please pick a session in another time slot",
            self.requested, list
        )
    }
}
