//! Per-user itineraries and the sharded in-memory store that owns them.

pub mod id;
pub mod itinerary;
pub mod store;
pub mod sweeper;

pub use id::{IdSource, RandomIds};
pub use itinerary::Itinerary;
pub use store::{ItineraryStore, StoreStats, SweepReport};
pub use sweeper::Sweeper;
