use core::cmp::Ordering;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::mutex::{Mutex, lock};
use crate::{Config, Error, IdGenStatus, Layout, MonotonicClock, SnowId, TimeSource};

/// Mutable part of a generator: the last timestamp handed out and the
/// sequence used within it.
#[derive(Debug, Default)]
struct State {
    timestamp: i64,
    sequence: i64,
}

/// A lock-based Snowflake ID generator for one node.
///
/// All mutable state sits behind a single mutex, so a `Generator` can be
/// shared by reference (or in an [`Arc`]) across threads. IDs from one
/// generator are strictly increasing.
///
/// Uniqueness across generators depends on every live generator having its
/// own node number; that is up to the caller.
///
/// [`Arc`]: std::sync::Arc
pub struct Generator<T = MonotonicClock>
where
    T: TimeSource,
{
    node: i64,
    layout: Layout,
    state: Mutex<State>,
    time: T,
}

impl Generator<MonotonicClock> {
    /// Creates a generator for `node` with the default [`Config`]: 10 node
    /// bits, 12 sequence bits and the Twitter epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] unless `0 <= node <= 1023`.
    ///
    /// # Example
    /// ```
    /// use snowid::{Error, Generator};
    ///
    /// assert!(Generator::new(1023).is_ok());
    /// assert_eq!(
    ///     Generator::new(5000).err(),
    ///     Some(Error::InvalidNode { node: 5000, max: 1023 })
    /// );
    /// ```
    pub fn new(node: i64) -> Result<Self, Error> {
        Self::with_config(node, &Config::default())
    }

    /// Creates a generator for `node` from an explicit [`Config`], using a
    /// [`MonotonicClock`] anchored at `config.epoch`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLayout`] if the config's bit widths do not fit
    /// - [`Error::InvalidNode`] if `node` is outside `0..=node_max`
    pub fn with_config(node: i64, config: &Config) -> Result<Self, Error> {
        let layout = config.layout()?;
        Self::with_time(node, layout, MonotonicClock::with_epoch(config.epoch))
    }
}

impl<T> Generator<T>
where
    T: TimeSource,
{
    /// Creates a generator that reads time from `time`.
    ///
    /// The time source defines the epoch: timestamps are whatever
    /// [`TimeSource::current_millis`] returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `node` is outside `0..=node_max`.
    pub fn with_time(node: i64, layout: Layout, time: T) -> Result<Self, Error> {
        if node < 0 || node > layout.node_max() {
            return Err(Error::InvalidNode {
                node,
                max: layout.node_max(),
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            node,
            node_bits = layout.node_bits(),
            step_bits = layout.step_bits(),
            "created snowflake generator"
        );

        Ok(Self {
            node,
            layout,
            state: Mutex::new(State::default()),
            time,
        })
    }

    /// The node number stamped into every ID.
    #[must_use]
    pub const fn node(&self) -> i64 {
        self.node
    }

    /// The bit layout used to pack IDs.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Generates the next ID, blocking if necessary.
    ///
    /// When every sequence number of the current millisecond has been used,
    /// this spins on the clock until it ticks over, holding the lock the whole
    /// time. The wait cannot be cancelled. Use [`Generator::poll_id`] to back
    /// off instead.
    ///
    /// # Example
    /// ```
    /// use snowid::Generator;
    ///
    /// let generator = Generator::new(1).unwrap();
    /// let a = generator.generate();
    /// let b = generator.generate();
    /// assert!(a < b);
    /// assert_eq!(generator.layout().node(a), 1);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> SnowId {
        let mut state = lock(&self.state);

        let mut now = self.time.current_millis();
        if now == state.timestamp {
            state.sequence = (state.sequence + 1) & self.layout.step_mask();
            if state.sequence == 0 {
                now = self.wait_for_next_millis(state.timestamp);
            }
        } else {
            state.sequence = 0;
        }
        state.timestamp = now;

        self.layout.compose(now, self.node, state.sequence)
    }

    /// Attempts to generate the next ID without blocking.
    ///
    /// Unlike [`Generator::generate`], a clock that reads behind the last
    /// issued timestamp is reported as [`IdGenStatus::Pending`] rather than
    /// accepted, so this method never produces an ID lower than a previous
    /// one.
    ///
    /// # Example
    /// ```
    /// use snowid::{Generator, IdGenStatus};
    ///
    /// let generator = Generator::new(0).unwrap();
    /// match generator.poll_id() {
    ///     IdGenStatus::Ready { id } => assert!(id.is_valid()),
    ///     IdGenStatus::Pending { yield_for } => assert!(yield_for > 0),
    /// }
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> IdGenStatus {
        let mut state = lock(&self.state);
        let now = self.time.current_millis();

        match now.cmp(&state.timestamp) {
            Ordering::Equal => {
                if state.sequence < self.layout.step_mask() {
                    state.sequence += 1;
                    IdGenStatus::Ready {
                        id: self.layout.compose(now, self.node, state.sequence),
                    }
                } else {
                    IdGenStatus::Pending { yield_for: 1 }
                }
            }
            Ordering::Greater => {
                state.timestamp = now;
                state.sequence = 0;
                IdGenStatus::Ready {
                    id: self.layout.compose(now, self.node, 0),
                }
            }
            Ordering::Less => Self::cold_clock_behind(now, state.timestamp),
        }
    }

    /// Spins until the clock reads past `last`, then returns the new reading.
    ///
    /// Called with the state lock held once the sequence field has wrapped
    /// within a single millisecond.
    #[cold]
    #[inline(never)]
    fn wait_for_next_millis(&self, last: i64) -> i64 {
        #[cfg(feature = "tracing")]
        tracing::trace!(timestamp = last, "sequence exhausted, waiting for next millisecond");

        loop {
            let now = self.time.current_millis();
            if now > last {
                return now;
            }
            core::hint::spin_loop();
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: i64, last: i64) -> IdGenStatus {
        let yield_for = last - now;
        debug_assert!(yield_for > 0);

        #[cfg(feature = "tracing")]
        tracing::trace!(now, last, "clock behind last timestamp");

        IdGenStatus::Pending { yield_for }
    }
}

impl<T> core::fmt::Debug for Generator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Generator")
            .field("node", &self.node)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
