//! Planning engine: recommendations, conflict-checked selection, the
//! "what now" status machine, and the [`Planner`] facade tying them to the
//! itinerary store.

pub mod planner;
pub mod recommend;
pub mod room;
pub mod status;
pub mod timeline;
pub mod types;

pub use planner::Planner;
pub use recommend::{is_complete, is_social_activity, next_available_per_room, recommend};
pub use room::{RoomSchedule, RoomScheduleMode};
pub use status::{analyze, MoveAdvice, SessionStatus};
pub use timeline::{format_speakers, Timeline, TimelineEntry};
pub use types::*;
