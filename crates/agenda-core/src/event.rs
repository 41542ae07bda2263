//! Event calendar: which days are valid and what "now" means locally.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EventConfig;
use crate::error::{AgendaError, Result};
use crate::time::TimeOfDay;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDay {
    /// Caller-facing name, e.g. `Aug9`.
    pub key: String,
    /// Catalog form, e.g. `Aug.9`.
    pub label: String,
    /// Two-character prefix embedded in itinerary ids.
    pub code: String,
    pub date: NaiveDate,
}

impl EventDay {
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.key.eq_ignore_ascii_case(name) || self.label.eq_ignore_ascii_case(name)
    }
}

impl EventConfig {
    /// Resolve a day by key or label.
    pub fn resolve_day(&self, name: &str) -> Result<&EventDay> {
        self.days.iter().find(|d| d.matches(name)).ok_or_else(|| AgendaError::InvalidDay {
            day: name.to_string(),
            expected: self.day_keys().join(", "),
        })
    }

    pub fn day_keys(&self) -> Vec<&str> {
        self.days.iter().map(|d| d.key.as_str()).collect()
    }

    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    pub fn local(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset())
    }

    /// Event-local time of day.
    pub fn local_time(&self, now: DateTime<Utc>) -> TimeOfDay {
        let local = self.local(now);
        TimeOfDay::from_hm(local.hour() as u16, local.minute() as u16).unwrap_or(TimeOfDay::MIDNIGHT)
    }

    /// The event day `now` falls on, if any.
    pub fn day_at(&self, now: DateTime<Utc>) -> Option<&EventDay> {
        let date = self.local(now).date_naive();
        self.days.iter().find(|d| d.date == date)
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.day_at(now).is_some()
    }

    pub fn session_url(&self, code: &str) -> Option<String> {
        self.session_url_base.as_ref().map(|base| format!("{}{}", base, code))
    }
}
