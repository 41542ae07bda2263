//! Venue router: which building a room belongs to and how long the walk is.

pub mod config;
pub mod rules;
pub mod types;

pub use config::{default_venue_config, DEFAULT_VENUE};
pub use rules::VenueRouter;
pub use types::*;
