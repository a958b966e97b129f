//! Serde helper functions for request payloads.
//!
//! Updates need to tell "field omitted" apart from "field cleared":
//! absent → `None`, `null` → `Some(None)`, value → `Some(Some(v))`.
//! Strings are kept exactly as submitted, blank ones included.

use serde::{Deserialize, Deserializer};

/// Deserialize a patch field. Must be paired with `#[serde(default)]` so an
/// absent field stays `None`.
pub fn deserialize_patch<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
