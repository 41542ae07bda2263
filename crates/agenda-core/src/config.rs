use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AgendaError, Result};
use crate::event::EventDay;
use crate::time::TimeOfDay;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    pub event: EventConfig,
    pub store: StoreConfig,
    pub planning: PlanningConfig,
    pub status: StatusConfig,
    pub server: ServerConfig,
}

/// The event's days and local timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub name: String,
    pub days: Vec<EventDay>,
    /// Offset of event-local time from UTC, in minutes.
    pub utc_offset_minutes: i32,
    /// Prefix for official session pages; the session code is appended.
    pub session_url_base: Option<String>,
}

/// Upper bound for `StoreConfig::ttl_hours` (one leap year).
pub const MAX_TTL_HOURS: i64 = 24 * 366;
/// Upper bound for `StoreConfig::sweep_interval_minutes` (one week).
pub const MAX_SWEEP_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub num_shards: usize,
    pub ttl_hours: i64,
    pub sweep_interval_minutes: u64,
    pub id_attempts: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Initial search threshold for a fresh itinerary.
    pub day_start: TimeOfDay,
    pub long_session_minutes: u16,
    pub social_title_markers: Vec<String>,
    pub social_room_markers: Vec<String>,
    pub completion_cutoff: TimeOfDay,
    pub completion_min_sessions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub just_ended_grace_minutes: u16,
    /// Spare minutes above which a transfer counts as relaxed.
    pub comfortable_buffer_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            event: EventConfig::default(),
            store: StoreConfig::default(),
            planning: PlanningConfig::default(),
            status: StatusConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        let day = |key: &str, label: &str, code: &str, d: u32| EventDay {
            key: key.into(),
            label: label.into(),
            code: code.into(),
            date: NaiveDate::from_ymd_opt(2025, 8, d).unwrap_or(NaiveDate::MIN),
        };
        Self {
            name: "COSCUP 2025".into(),
            days: vec![day("Aug9", "Aug.9", "09", 9), day("Aug10", "Aug.10", "10", 10)],
            utc_offset_minutes: 8 * 60,
            session_url_base: Some("https://coscup.org/2025/sessions/".into()),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { num_shards: 16, ttl_hours: 24, sweep_interval_minutes: 60, id_attempts: 10 }
    }
}

impl StoreConfig {
    /// Idle time after which an itinerary is evicted, clamped to the valid range.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.ttl_hours.clamp(1, MAX_TTL_HOURS))
    }

    /// Pause between sweeps, clamped to the valid range.
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_minutes.clamp(1, MAX_SWEEP_INTERVAL_MINUTES) * 60)
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            day_start: TimeOfDay::from_hm(8, 0).unwrap_or(TimeOfDay::MIDNIGHT),
            long_session_minutes: 240,
            social_title_markers: vec!["Hacking Corner".into()],
            social_room_markers: vec!["Hallway".into()],
            completion_cutoff: TimeOfDay::from_hm(17, 0).unwrap_or(TimeOfDay::MIDNIGHT),
            completion_min_sessions: 3,
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self { just_ended_grace_minutes: 10, comfortable_buffer_minutes: 5 }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 8080 }
    }
}

impl AgendaConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        let config: AgendaConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AgendaError::Config(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.event.days.is_empty() {
            return Err(AgendaError::Config("event.days must not be empty".into()));
        }
        if self.store.num_shards == 0 {
            return Err(AgendaError::Config("store.num_shards must be at least 1".into()));
        }
        if !(1..=MAX_TTL_HOURS).contains(&self.store.ttl_hours) {
            return Err(AgendaError::Config(format!("store.ttl_hours must be between 1 and {MAX_TTL_HOURS}")));
        }
        if !(1..=MAX_SWEEP_INTERVAL_MINUTES).contains(&self.store.sweep_interval_minutes) {
            return Err(AgendaError::Config(format!(
                "store.sweep_interval_minutes must be between 1 and {MAX_SWEEP_INTERVAL_MINUTES}"
            )));
        }
        if self.event.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(AgendaError::Config("event.utc_offset_minutes out of range".into()));
        }
        Ok(())
    }
}
