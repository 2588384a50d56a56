use core::time::Duration;

use crate::{Error, SnowId, TWITTER_EPOCH};

/// Combined width shared by the node and sequence fields. The timestamp gets
/// whatever is left of the 63 usable bits.
pub const SHARED_BITS: u8 = 22;

/// The validated bit layout of a [`SnowId`].
///
/// All shifts and masks are computed once in [`Layout::new`] and never change
/// afterwards, so a layout can be copied freely between threads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    node_bits: u8,
    step_bits: u8,
    time_shift: u8,
    node_shift: u8,
    node_max: i64,
    step_mask: i64,
    timestamp_max: i64,
}

impl Layout {
    /// 41 timestamp bits, 10 node bits, 12 sequence bits.
    pub const DEFAULT: Self = Self::build(10, 12);

    /// Creates a layout with the given node and sequence widths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] if `node_bits + step_bits` exceeds
    /// [`SHARED_BITS`].
    pub const fn new(node_bits: u8, step_bits: u8) -> Result<Self, Error> {
        if node_bits as u16 + step_bits as u16 > SHARED_BITS as u16 {
            return Err(Error::InvalidLayout {
                node_bits,
                step_bits,
            });
        }
        Ok(Self::build(node_bits, step_bits))
    }

    const fn build(node_bits: u8, step_bits: u8) -> Self {
        let time_shift = node_bits + step_bits;
        Self {
            node_bits,
            step_bits,
            time_shift,
            node_shift: step_bits,
            node_max: (1 << node_bits) - 1,
            step_mask: (1 << step_bits) - 1,
            timestamp_max: i64::MAX >> time_shift,
        }
    }

    /// Width of the node field.
    #[must_use]
    pub const fn node_bits(&self) -> u8 {
        self.node_bits
    }

    /// Width of the sequence field.
    #[must_use]
    pub const fn step_bits(&self) -> u8 {
        self.step_bits
    }

    /// Width of the timestamp field.
    #[must_use]
    pub const fn timestamp_bits(&self) -> u8 {
        63 - self.time_shift
    }

    /// Position of the lowest timestamp bit.
    #[must_use]
    pub const fn time_shift(&self) -> u8 {
        self.time_shift
    }

    /// Position of the lowest node bit.
    #[must_use]
    pub const fn node_shift(&self) -> u8 {
        self.node_shift
    }

    /// Largest node number this layout can hold.
    #[must_use]
    pub const fn node_max(&self) -> i64 {
        self.node_max
    }

    /// Mask (and largest value) of the sequence field.
    #[must_use]
    pub const fn step_mask(&self) -> i64 {
        self.step_mask
    }

    /// Largest timestamp this layout can hold.
    #[must_use]
    pub const fn timestamp_max(&self) -> i64 {
        self.timestamp_max
    }

    /// Packs the three fields into an ID.
    ///
    /// Node and sequence are masked to their widths. The timestamp is shifted
    /// as is: a negative reading (epoch in the future) yields a negative ID
    /// that still sorts below every later one and is refused by
    /// [`SnowId::try_encode`].
    #[must_use]
    pub const fn compose(&self, timestamp: i64, node: i64, sequence: i64) -> SnowId {
        let timestamp = timestamp << self.time_shift;
        let node = (node & self.node_max) << self.node_shift;
        let sequence = sequence & self.step_mask;
        SnowId::from_raw(timestamp | node | sequence)
    }

    /// Milliseconds since the generator's epoch. Negative for IDs minted
    /// before it.
    #[must_use]
    pub const fn timestamp(&self, id: SnowId) -> i64 {
        id.to_raw() >> self.time_shift
    }

    /// Node number that minted the ID.
    #[must_use]
    pub const fn node(&self, id: SnowId) -> i64 {
        (id.to_raw() >> self.node_shift) & self.node_max
    }

    /// Position of the ID within its millisecond.
    #[must_use]
    pub const fn sequence(&self, id: SnowId) -> i64 {
        id.to_raw() & self.step_mask
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything a [`Generator`] needs besides its node number.
///
/// Replaces process-wide settings: each generator gets its own copy, so two
/// generators built from different configs never observe each other's bit
/// widths.
///
/// [`Generator`]: crate::Generator
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// Width of the node field.
    pub node_bits: u8,
    /// Width of the sequence field.
    pub step_bits: u8,
    /// Zero point of the timestamp field, as a duration since 1970-01-01 UTC.
    #[cfg_attr(feature = "serde", serde(with = "epoch_millis", rename = "epoch_ms"))]
    pub epoch: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_bits: Layout::DEFAULT.node_bits(),
            step_bits: Layout::DEFAULT.step_bits(),
            epoch: TWITTER_EPOCH,
        }
    }
}

impl Config {
    /// Creates a config from explicit values. Nothing is validated until
    /// [`Config::layout`] is called.
    #[must_use]
    pub const fn new(node_bits: u8, step_bits: u8, epoch: Duration) -> Self {
        Self {
            node_bits,
            step_bits,
            epoch,
        }
    }

    /// Returns a copy with a different epoch.
    #[must_use]
    pub const fn with_epoch(mut self, epoch: Duration) -> Self {
        self.epoch = epoch;
        self
    }

    /// Validates the bit widths and derives the layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] if the widths do not fit.
    pub const fn layout(&self) -> Result<Layout, Error> {
        Layout::new(self.node_bits, self.step_bits)
    }

    /// The epoch in milliseconds since the Unix epoch.
    #[must_use]
    pub fn epoch_millis(&self) -> i64 {
        i64::try_from(self.epoch.as_millis()).unwrap_or(i64::MAX)
    }

    /// Wall-clock time (milliseconds since the Unix epoch) at which `id` was
    /// minted under this config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] if the widths do not fit.
    pub fn unix_millis(&self, id: SnowId) -> Result<i64, Error> {
        let layout = self.layout()?;
        Ok(layout.timestamp(id).saturating_add(self.epoch_millis()))
    }
}

#[cfg(feature = "serde")]
mod epoch_millis {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(epoch: &Duration, s: S) -> Result<S::Ok, S::Error> {
        u64::try_from(epoch.as_millis())
            .map_err(serde::ser::Error::custom)?
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
