use core::time::Duration;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::{TWITTER_EPOCH, TimeSource};

/// A monotonic time source aligned to a user-defined epoch.
///
/// The wall clock is read exactly once, at construction, to find how far the
/// epoch lies in the past. Every later reading adds the elapsed time of a
/// monotonic [`Instant`] captured at that same moment, so NTP steps or manual
/// clock changes after construction never move the result backward.
#[derive(Copy, Clone, Debug)]
pub struct MonotonicClock {
    anchor: Instant,
    /// Nanoseconds from the epoch to `anchor`. Negative if the epoch lies in
    /// the future.
    epoch_offset: i128,
}

impl Default for MonotonicClock {
    /// Constructs a monotonic clock aligned to [`TWITTER_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(TWITTER_EPOCH)
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock whose zero point is `epoch`, given as a
    /// duration since 1970-01-01 UTC.
    ///
    /// # Example
    ///
    /// ```
    /// use snowid::{MonotonicClock, TimeSource};
    /// use std::time::{Duration, SystemTime, UNIX_EPOCH};
    ///
    /// let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
    /// let clock = MonotonicClock::with_epoch(now);
    ///
    /// std::thread::sleep(Duration::from_millis(5));
    /// assert!(clock.current_millis() >= 5);
    /// ```
    #[must_use]
    pub fn with_epoch(epoch: Duration) -> Self {
        let anchor = Instant::now();
        let wall_nanos = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => nanos(since),
            Err(err) => -nanos(err.duration()),
        };

        Self {
            anchor,
            epoch_offset: wall_nanos - nanos(epoch),
        }
    }

    /// Milliseconds between the epoch and construction of this clock.
    #[must_use]
    pub fn epoch_offset(&self) -> i64 {
        to_millis(self.epoch_offset)
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> i64 {
        // Truncate once, after summing.
        to_millis(self.epoch_offset.saturating_add(nanos(self.anchor.elapsed())))
    }
}

// `Duration::as_nanos` tops out below 2^94, so the conversion and any
// difference of two readings fit in an i128.
fn nanos(d: Duration) -> i128 {
    i128::try_from(d.as_nanos()).unwrap_or(i128::MAX)
}

fn to_millis(nanos: i128) -> i64 {
    let millis = nanos / 1_000_000;
    i64::try_from(millis).unwrap_or(if millis < 0 { i64::MIN } else { i64::MAX })
}
