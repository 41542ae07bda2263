//! Read-only session catalog.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use crate::config::EventConfig;
use crate::error::{AgendaError, Result};
use crate::session::Session;

/// Lookup surface over the static session catalog. Implementations must keep
/// code, day and room stable for the life of the process.
pub trait Catalog: Send + Sync {
    fn session_by_code(&self, code: &str) -> Option<&Session>;

    /// All sessions of a day, ordered by start time.
    fn sessions_for_day(&self, day: &str) -> &[Session];

    /// Sessions sharing the earliest start time of the day.
    fn first_sessions_of_day(&self, day: &str) -> Vec<&Session> {
        let sessions = self.sessions_for_day(day);
        match sessions.iter().map(|s| s.start).min() {
            Some(earliest) => sessions.iter().filter(|s| s.start == earliest).collect(),
            None => Vec::new(),
        }
    }

    /// Sessions held in `room` on `day`, ordered by start time.
    fn sessions_in_room(&self, day: &str, room: &str) -> Vec<&Session> {
        let mut out: Vec<&Session> = self.sessions_for_day(day).iter().filter(|s| s.room == room).collect();
        out.sort_by_key(|s| s.start);
        out
    }

    fn rooms(&self, day: &str) -> BTreeSet<&str> {
        self.sessions_for_day(day).iter().map(|s| s.room.as_str()).collect()
    }
}

/// In-memory catalog built once at startup.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    by_day: HashMap<String, Vec<Session>>,
    index: HashMap<String, (String, usize)>,
}

impl StaticCatalog {
    /// Build from sessions whose `day` already holds a day key.
    pub fn new(sessions: Vec<Session>) -> Result<Self> {
        let mut by_day: HashMap<String, Vec<Session>> = HashMap::new();
        let mut seen = BTreeSet::new();
        for s in sessions {
            if s.code.trim().is_empty() {
                return Err(AgendaError::InvalidCatalog(format!("session \"{}\" has no code", s.title)));
            }
            if s.day.is_empty() {
                return Err(AgendaError::InvalidCatalog(format!("session {} has no day", s.code)));
            }
            if s.start >= s.end {
                return Err(AgendaError::InvalidCatalog(format!(
                    "session {} ends ({}) before it starts ({})",
                    s.code, s.end, s.start
                )));
            }
            if !seen.insert(s.code.clone()) {
                return Err(AgendaError::InvalidCatalog(format!("duplicate session code {}", s.code)));
            }
            by_day.entry(s.day.clone()).or_default().push(s);
        }

        let mut index = HashMap::new();
        for (day, sessions) in by_day.iter_mut() {
            sessions.sort_by(|a, b| (a.start, &a.room, &a.code).cmp(&(b.start, &b.room, &b.code)));
            for (i, s) in sessions.iter().enumerate() {
                index.insert(s.code.clone(), (day.clone(), i));
            }
        }
        tracing::debug!(sessions = index.len(), days = by_day.len(), "catalog built");
        Ok(Self { by_day, index })
    }

    /// Build from sessions labelled with either day keys or day labels,
    /// normalizing to keys and filling in official URLs.
    pub fn with_event(sessions: Vec<Session>, event: &EventConfig) -> Result<Self> {
        let mut normalized = Vec::with_capacity(sessions.len());
        for mut s in sessions {
            let day = event
                .resolve_day(&s.day)
                .map_err(|_| AgendaError::InvalidCatalog(format!("session {} has unknown day {}", s.code, s.day)))?;
            s.day = day.key.clone();
            if s.url.is_none() {
                s.url = event.session_url(&s.code);
            }
            normalized.push(s);
        }
        Self::new(normalized)
    }

    /// Parse `{ "<day>": { "<room>": [ session, ... ] } }`.
    pub fn from_json(content: &str, event: &EventConfig) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, Vec<Session>>> = serde_json::from_str(content)?;
        let mut sessions = Vec::new();
        for (day, rooms) in raw {
            for (room, list) in rooms {
                for mut s in list {
                    s.day = day.clone();
                    s.room = room.clone();
                    sessions.push(s);
                }
            }
        }
        Self::with_event(sessions, event)
    }

    pub fn from_file(path: impl AsRef<Path>, event: &EventConfig) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AgendaError::InvalidCatalog(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&content, event)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn session_by_code(&self, code: &str) -> Option<&Session> {
        let (day, i) = self.index.get(code.trim())?;
        self.by_day.get(day).and_then(|v| v.get(*i))
    }

    fn sessions_for_day(&self, day: &str) -> &[Session] {
        self.by_day.get(day).map(Vec::as_slice).unwrap_or(&[])
    }
}
