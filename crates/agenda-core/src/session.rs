use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::{TimeOfDay, TimeSpan};

/// A timed talk or activity from the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub speakers: Vec<String>,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub track: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    /// Day key, e.g. `Aug9`.
    #[serde(default)]
    pub day: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Session {
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }

    pub fn duration_minutes(&self) -> u16 {
        self.span().duration_minutes()
    }

    pub fn overlaps(&self, other: &Session) -> bool {
        self.span().overlaps(&other.span())
    }

    pub fn is_running_at(&self, t: TimeOfDay) -> bool {
        self.span().contains(t)
    }

    /// First tag, used as the headline category.
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from(self)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {} @ {}", self.code, self.span(), self.title, self.room)
    }
}

/// List projection of a [`Session`] without abstract and difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub code: String,
    pub title: String,
    pub speakers: Vec<String>,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub room: String,
    pub track: String,
    pub language: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&Session> for SessionSummary {
    fn from(s: &Session) -> Self {
        Self {
            code: s.code.clone(),
            title: s.title.clone(),
            speakers: s.speakers.clone(),
            start: s.start,
            end: s.end,
            room: s.room.clone(),
            track: s.track.clone(),
            language: s.language.clone(),
            tags: s.tags.clone(),
            url: s.url.clone(),
        }
    }
}
