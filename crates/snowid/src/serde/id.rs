use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::SnowId;

/// Serializes the ID as its base58 text form.
///
/// Negative IDs are refused with the codec's `NegativeValue` error rather than
/// written as an empty string.
impl Serialize for SnowId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = self.try_encode().map_err(serde::ser::Error::custom)?;
        s.serialize_str(encoded.as_str())
    }
}

/// Deserializes an ID from its base58 text form.
impl<'de> Deserialize<'de> for SnowId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base58Visitor;

        impl de::Visitor<'_> for Base58Visitor {
            type Value = SnowId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a canonical base58 encoded snowflake ID")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                SnowId::parse(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(Base58Visitor)
    }
}

/// Field adapter that stores a [`SnowId`] as its raw integer instead of text.
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use serde::{Deserialize, Serialize};
/// use snowid::{SnowId, as_native};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "as_native")]
///     id: SnowId,
/// }
/// # }
/// ```
pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::{Base58Error, SnowId};

    /// Serialize an ID as its raw `i64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(id: &SnowId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize an ID from its raw `i64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the value is
    /// negative.
    pub fn deserialize<'de, D>(d: D) -> Result<SnowId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(d)?;
        let id = SnowId::from_raw(raw);
        if !id.is_valid() {
            return Err(serde::de::Error::custom(Base58Error::NegativeValue {
                value: raw,
            }));
        }
        Ok(id)
    }
}
