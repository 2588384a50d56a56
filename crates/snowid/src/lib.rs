//! Time-sortable 63-bit Snowflake IDs with a canonical base58 text form.
//!
//! A [`Generator`] packs `<timestamp><node><sequence>` into a [`SnowId`]; the
//! base58 codec ([`encode_base58`], [`decode_base58`]) turns that value into a
//! short, case-sensitive string and parses it back with strict validation.
//!
//! ```
//! use snowid::{Generator, SnowId};
//!
//! let generator = Generator::new(1).expect("node 1 fits in 10 bits");
//! let id = generator.generate();
//!
//! let text = id.to_text().expect("generated IDs are never negative");
//! assert_eq!(SnowId::parse(&text), Ok(id));
//! ```
//!
//! # Feature flags
//!
//! - `parking-lot`: guard generator state with `parking_lot::Mutex` instead
//!   of `std::sync::Mutex`.
//! - `serde`: base58 `Serialize`/`Deserialize` for [`SnowId`], plus the
//!   `as_native` field adapter.
//! - `tracing`: emit `trace` spans from the generator.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base58;
mod config;
mod generator;
mod id;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base58::*;
pub use crate::config::*;
pub use crate::generator::*;
pub use crate::id::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
