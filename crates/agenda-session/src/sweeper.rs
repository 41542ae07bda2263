//! Periodic eviction of idle itineraries.

use agenda_core::StoreConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;

use crate::store::{ItineraryStore, SweepReport};

pub struct Sweeper {
    store: Arc<ItineraryStore>,
    interval: Duration,
    ttl: chrono::Duration,
}

impl Sweeper {
    pub fn new(store: Arc<ItineraryStore>, config: &StoreConfig) -> Self {
        Self {
            store,
            interval: config.sweep_interval(),
            ttl: config.ttl(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// One sweep on the blocking pool; the store fans out per shard itself.
    pub async fn run_once(&self) -> Result<SweepReport, JoinError> {
        let store = Arc::clone(&self.store);
        let ttl = self.ttl;
        tokio::task::spawn_blocking(move || store.sweep(ttl)).await
    }

    /// Sweep every `interval` until the handle is aborted. The first sweep
    /// happens one interval after spawning.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                tracing::debug!("running itinerary sweep");
                match self.run_once().await {
                    Ok(report) => {
                        tracing::info!(
                            evicted = report.evicted,
                            active = report.remaining,
                            "itinerary sweep finished"
                        );
                    }
                    Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                    Err(e) => {
                        tracing::warn!(error = %e, "itinerary sweep cancelled, stopping sweeper");
                        break;
                    }
                }
            }
        })
    }
}
