//! Next-slot recommendations and the completion heuristic.

use agenda_core::{PlanningConfig, Session, TimeOfDay};
use std::collections::BTreeMap;

/// For every room of the day, the first session starting at or after `after`
/// that fits around `schedule`. At most one per room, ordered by room name.
pub fn next_available_per_room<'a>(day_sessions: &'a [Session], after: TimeOfDay, schedule: &[Session]) -> Vec<&'a Session> {
    let mut by_room: BTreeMap<&str, Vec<&'a Session>> = BTreeMap::new();
    for s in day_sessions {
        by_room.entry(s.room.as_str()).or_default().push(s);
    }
    by_room
        .into_values()
        .filter_map(|mut sessions| {
            sessions.sort_by_key(|s| s.start);
            sessions
                .into_iter()
                .find(|s| s.start >= after && !schedule.iter().any(|chosen| chosen.overlaps(s)))
        })
        .collect()
}

/// Long or informal activities that should not anchor a timed itinerary.
pub fn is_social_activity(session: &Session, config: &PlanningConfig) -> bool {
    session.duration_minutes() >= config.long_session_minutes
        || config.social_title_markers.iter().any(|m| session.title.contains(m.as_str()))
        || config.social_room_markers.iter().any(|m| session.room.contains(m.as_str()))
}

/// Candidates worth showing to the user.
pub fn recommend<'a>(candidates: &[&'a Session], config: &PlanningConfig) -> Vec<&'a Session> {
    candidates.iter().copied().filter(|s| !is_social_activity(s, config)).collect()
}

/// Planning is complete once nothing else fits, or once the day runs late
/// and enough has been chosen. `open_slots` is the unfiltered candidate count.
pub fn is_complete(open_slots: usize, last_end_time: TimeOfDay, scheduled: usize, config: &PlanningConfig) -> bool {
    open_slots == 0 || (last_end_time >= config.completion_cutoff && scheduled >= config.completion_min_sessions)
}
