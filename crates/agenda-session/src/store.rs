//! Sharded itinerary store.
//!
//! Itineraries are spread over a fixed number of shards by an FNV-1a hash of
//! the id; each shard has its own reader/writer lock and no operation ever
//! holds more than one shard lock at a time.
//!
//! Activity tracking: every slot keeps its last-activity instant in an
//! atomic, so a plain lookup refreshes it under the *shared* lock. Only
//! mutations and id allocation take the exclusive lock.

use agenda_core::{AgendaError, Clock, EventDay, Result, StoreConfig, TimeOfDay};
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use crate::id::{fallback_id, IdSource, RandomIds};
use crate::itinerary::Itinerary;

struct Slot {
    itinerary: Itinerary,
    last_activity_ms: AtomicI64,
}

impl Slot {
    fn new(itinerary: Itinerary) -> Self {
        let ms = itinerary.last_activity.timestamp_millis();
        Self { itinerary, last_activity_ms: AtomicI64::new(ms) }
    }

    /// Activity never moves backwards.
    fn touch(&self, now: DateTime<Utc>) {
        self.last_activity_ms.fetch_max(now.timestamp_millis(), Ordering::Relaxed);
    }

    fn last_activity(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.last_activity_ms.load(Ordering::Relaxed))
            .unwrap_or(self.itinerary.created_at)
    }

    fn snapshot(&self) -> Itinerary {
        let mut it = self.itinerary.clone();
        it.last_activity = self.last_activity();
        it
    }
}

#[derive(Default)]
struct Shard {
    slots: RwLock<HashMap<String, Slot>>,
}

/// Point-in-time occupancy of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub active: usize,
    pub per_shard: Vec<usize>,
    pub num_shards: usize,
    pub generated_at: DateTime<Utc>,
}

/// Outcome of one eviction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub evicted_per_shard: Vec<usize>,
    pub evicted: usize,
    pub remaining: usize,
    pub cutoff: DateTime<Utc>,
}

pub struct ItineraryStore {
    shards: Vec<Shard>,
    clock: Arc<dyn Clock>,
    ids: Box<dyn IdSource>,
    id_attempts: usize,
    fallback_counter: AtomicU64,
}

impl ItineraryStore {
    pub fn new(config: &StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let n = config.num_shards.max(1);
        Self {
            shards: (0..n).map(|_| Shard::default()).collect(),
            clock,
            ids: Box::new(RandomIds),
            id_attempts: config.id_attempts,
            fallback_counter: AtomicU64::new(0),
        }
    }

    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    pub fn shard_index(&self, id: &str) -> usize {
        fnv1a(id.as_bytes()) as usize % self.shards.len()
    }

    /// Allocate a fresh itinerary for `day` under a new unpredictable id.
    pub fn create(&self, day: &EventDay, day_start: TimeOfDay) -> Itinerary {
        let now = self.clock.now();
        for attempt in 0..self.id_attempts {
            let Some(id) = self.ids.generate(&day.code, now) else {
                break;
            };
            if let Some(it) = self.try_insert(id, day, day_start, now) {
                return it;
            }
            tracing::debug!(attempt, day = %day.key, "itinerary id collision");
        }
        loop {
            let n = self.fallback_counter.fetch_add(1, Ordering::Relaxed);
            if let Some(it) = self.try_insert(fallback_id(&day.code, now, n), day, day_start, now) {
                tracing::warn!(session_id = %it.id, "using fallback itinerary id");
                return it;
            }
        }
    }

    fn try_insert(&self, id: String, day: &EventDay, day_start: TimeOfDay, now: DateTime<Utc>) -> Option<Itinerary> {
        let shard = self.shard_index(&id);
        let mut slots = self.shards[shard].slots.write();
        match slots.entry(id) {
            Entry::Occupied(_) => None,
            Entry::Vacant(v) => {
                let it = Itinerary::new(v.key().clone(), day.key.clone(), day_start, now);
                v.insert(Slot::new(it.clone()));
                tracing::info!(session_id = %it.id, day = %it.day, shard, "created itinerary");
                Some(it)
            }
        }
    }

    /// Snapshot of the itinerary. Counts as activity.
    pub fn get(&self, id: &str) -> Result<Itinerary> {
        let now = self.clock.now();
        let slots = self.shards[self.shard_index(id)].slots.read();
        match slots.get(id) {
            Some(slot) => {
                slot.touch(now);
                Ok(slot.snapshot())
            }
            None => {
                tracing::debug!(session_id = %id, "itinerary not found");
                Err(AgendaError::ItineraryNotFound { id: id.to_string() })
            }
        }
    }

    /// Run `f` on the itinerary under the shard's exclusive lock. Any
    /// validation inside `f` is atomic with the mutation it guards.
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut Itinerary) -> Result<R>) -> Result<R> {
        let now = self.clock.now();
        let mut slots = self.shards[self.shard_index(id)].slots.write();
        let slot = slots
            .get_mut(id)
            .ok_or_else(|| AgendaError::ItineraryNotFound { id: id.to_string() })?;
        slot.touch(now);
        slot.itinerary.last_activity = slot.last_activity();
        f(&mut slot.itinerary)
    }

    /// Membership check that does not count as activity.
    pub fn contains(&self, id: &str) -> bool {
        self.shards[self.shard_index(id)].slots.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.slots.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> StoreStats {
        let per_shard: Vec<usize> = self.shards.iter().map(|s| s.slots.read().len()).collect();
        StoreStats {
            active: per_shard.iter().sum(),
            num_shards: per_shard.len(),
            per_shard,
            generated_at: self.clock.now(),
        }
    }

    /// Evict itineraries of one shard idle since before `cutoff`.
    ///
    /// Panics if `index` is not a valid shard index.
    pub fn sweep_shard(&self, index: usize, cutoff: DateTime<Utc>) -> usize {
        let cutoff_ms = cutoff.timestamp_millis();
        let mut slots = self.shards[index].slots.write();
        let before = slots.len();
        slots.retain(|id, slot| {
            let keep = slot.last_activity_ms.load(Ordering::Relaxed) >= cutoff_ms;
            if !keep {
                tracing::debug!(session_id = %id, last_activity = %slot.last_activity(), "evicting idle itinerary");
            }
            keep
        });
        before - slots.len()
    }

    /// Evict everything idle for longer than `ttl`, scanning all shards in
    /// parallel. A `ttl` reaching past the earliest representable instant
    /// evicts nothing. Returns once every shard is done.
    pub fn sweep(&self, ttl: Duration) -> SweepReport {
        let cutoff = self.clock.now().checked_sub_signed(ttl).unwrap_or(DateTime::<Utc>::MIN_UTC);
        let evicted_per_shard: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..self.shards.len())
                .map(|i| scope.spawn(move || self.sweep_shard(i, cutoff)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });
        let evicted = evicted_per_shard.iter().sum();
        let remaining = self.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining, "swept idle itineraries");
        }
        SweepReport { evicted_per_shard, evicted, remaining, cutoff }
    }
}

fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for b in bytes {
        hash ^= u32::from(*b);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
