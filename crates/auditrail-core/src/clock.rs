//! Monotonic entry timestamps
//!
//! Entry timestamps must be strictly increasing within a process even when
//! the wall clock stalls or steps backwards (NTP adjustments, coarse clock
//! granularity under fast successive writes). A mutex-guarded high-water
//! mark enforces that; ordering across processes is left to the
//! persistence layer's own discipline.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

static LAST_TIMESTAMP: Mutex<Option<DateTime<Utc>>> = Mutex::new(None);

/// Return the current time, strictly later than any previous return value
/// from this process.
///
/// Timestamps carry microsecond precision, the precision the persistence
/// schema stores, so an entry compares equal to itself after a round trip.
pub fn monotonic_now() -> DateTime<Utc> {
    let mut last = LAST_TIMESTAMP
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let now = Utc::now();
    let mut now = DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now);
    if let Some(prev) = *last {
        if now <= prev {
            now = prev + Duration::microseconds(1);
        }
    }
    *last = Some(now);
    now
}
