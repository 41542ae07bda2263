//! Itinerary id generation.
//!
//! Ids look like `user_09_1754700000_1f3a9c0d5e7b2a64`: a day code and the
//! creation second for debugging, followed by 64 bits from the OS RNG.

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;

/// Produces candidate ids. The store checks uniqueness.
pub trait IdSource: Send + Sync {
    /// `None` when no unpredictable id could be produced.
    fn generate(&self, day_code: &str, now: DateTime<Utc>) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn generate(&self, day_code: &str, now: DateTime<Utc>) -> Option<String> {
        let mut bytes = [0u8; 8];
        if let Err(e) = OsRng.try_fill_bytes(&mut bytes) {
            tracing::warn!(error = %e, "OS random source unavailable");
            return None;
        }
        Some(format!("user_{}_{}_{:016x}", day_code, now.timestamp(), u64::from_be_bytes(bytes)))
    }
}

/// Always-unique id used once random generation gives up. `counter` is
/// monotonic per store, so two fallbacks never coincide.
pub(crate) fn fallback_id(day_code: &str, now: DateTime<Utc>, counter: u64) -> String {
    let nanos = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp_micros() * 1000);
    format!("user_{}_{}_{}_{:08x}", day_code, nanos, counter, rand::random::<u32>())
}
