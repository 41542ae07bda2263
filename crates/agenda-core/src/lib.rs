//! Core data model for the event agenda planner: sessions, time-of-day,
//! configuration, errors, and the read-only catalog and clock seams.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod session;
pub mod time;

pub use catalog::{Catalog, StaticCatalog};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    AgendaConfig, EventConfig, PlanningConfig, ServerConfig, StatusConfig, StoreConfig, MAX_SWEEP_INTERVAL_MINUTES,
    MAX_TTL_HOURS,
};
pub use error::{AgendaError, ConflictEntry, Result, TimeConflict};
pub use event::EventDay;
pub use session::{Session, SessionSummary};
pub use time::{TimeOfDay, TimeSpan};

#[cfg(test)]
mod tests;
