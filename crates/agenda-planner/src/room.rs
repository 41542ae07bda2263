use agenda_core::{SessionSummary, TimeOfDay};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomScheduleMode {
    #[default]
    Full,
    /// Only the session running right now.
    CurrentOnly,
    /// Only the first session starting after now.
    NextOnly,
}

/// What is on in one room on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSchedule {
    pub room: String,
    pub day: String,
    pub mode: RoomScheduleMode,
    /// Event-local time the view was computed at.
    pub current_time: TimeOfDay,
    /// False when "now" is not an event day; current/next then refer to the
    /// clock time applied to the requested day.
    pub during_event: bool,
    pub sessions: Vec<SessionSummary>,
    pub current: Option<SessionSummary>,
    pub next: Option<SessionSummary>,
    /// Sessions in the room that day regardless of mode.
    pub total_sessions: usize,
}

impl RoomSchedule {
    pub fn message(&self) -> String {
        match self.mode {
            RoomScheduleMode::NextOnly => match &self.next {
                Some(s) => format!("Next in {}: {}-{} \"{}\"", self.room, s.start, s.end, s.title),
                None => format!("No more sessions in {} today", self.room),
            },
            RoomScheduleMode::CurrentOnly => match &self.current {
                Some(s) => format!("Now in {}: {}-{} \"{}\"", self.room, s.start, s.end, s.title),
                None if !self.during_event => format!(
                    "Nothing is running in {} right now; the event is not in progress, showing {} for reference",
                    self.room, self.day
                ),
                None => format!("Nothing is running in {} right now", self.room),
            },
            RoomScheduleMode::Full => {
                format!("{} has {} sessions on {}", self.room, self.total_sessions, self.day)
            }
        }
    }
}
