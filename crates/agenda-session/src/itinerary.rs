use agenda_core::{AgendaError, ConflictEntry, Result, Session, TimeConflict, TimeOfDay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One user's planning state for a single event day.
///
/// Invariant: no two entries of `schedule` overlap. The only way to grow the
/// schedule is [`Itinerary::add_session`], which enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: String,
    pub day: String,
    /// Chosen sessions in insertion order.
    pub schedule: Vec<Session>,
    /// End of the latest-ending chosen session; search threshold for options.
    pub last_end_time: TimeOfDay,
    /// Distinct tracks chosen so far.
    pub profile: BTreeSet<String>,
    /// The user explicitly ended planning.
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Itinerary {
    pub fn new(id: impl Into<String>, day: impl Into<String>, day_start: TimeOfDay, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            day: day.into(),
            schedule: Vec::new(),
            last_end_time: day_start,
            profile: BTreeSet::new(),
            completed: false,
            created_at: now,
            last_activity: now,
        }
    }

    /// Scheduled sessions overlapping `session`.
    pub fn conflicts_with(&self, session: &Session) -> Vec<&Session> {
        self.schedule.iter().filter(|s| s.overlaps(session)).collect()
    }

    pub fn has_conflict(&self, session: &Session) -> bool {
        self.schedule.iter().any(|s| s.overlaps(session))
    }

    /// Append `session`, or fail naming every overlapping scheduled session.
    pub fn add_session(&mut self, session: Session) -> Result<()> {
        let conflicts = self.conflicts_with(&session);
        if !conflicts.is_empty() {
            return Err(AgendaError::TimeConflict(TimeConflict {
                requested: ConflictEntry::from(&session),
                conflicts: conflicts.into_iter().map(ConflictEntry::from).collect(),
            }));
        }
        if session.end > self.last_end_time {
            self.last_end_time = session.end;
        }
        if !session.track.is_empty() {
            self.profile.insert(session.track.clone());
        }
        self.schedule.push(session);
        Ok(())
    }

    pub fn finish(&mut self) {
        self.completed = true;
    }

    /// Copy of the schedule ordered by start time.
    pub fn sorted_schedule(&self) -> Vec<Session> {
        let mut sorted = self.schedule.clone();
        sorted.sort_by_key(|s| s.start);
        sorted
    }

    pub fn contains(&self, code: &str) -> bool {
        self.schedule.iter().any(|s| s.code == code)
    }

    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Itinerary(id={}, day={}, sessions={}, last_end={}, completed={})",
            self.id,
            self.day,
            self.schedule.len(),
            self.last_end_time,
            self.completed
        )
    }
}
