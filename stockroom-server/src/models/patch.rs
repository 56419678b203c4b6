//! Partial-update fields
//!
//! A field missing from an update body must leave the column untouched,
//! while a field that is present must be written even if it is empty.
//! `Option<T>` alone cannot tell "missing" from "null", so update
//! request fields are `Patch<T>` with `#[serde(default)]`:
//!
//! - field missing  -> `Patch::Keep` (the default)
//! - field present  -> `Patch::Set(value)`
//! - field is `null` -> deserialization error for non-nullable `T`

use serde::{Deserialize, Deserializer};

/// A single field of a partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was not supplied; keep the stored value
    Keep,
    /// Field was supplied; replace the stored value
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> Patch<T> {
    /// The value to bind as a query parameter; `None` keeps the column.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Keep => None,
            Self::Set(v) => Some(v),
        }
    }

    /// Validate or convert a supplied value, passing `Keep` through.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Patch<U>, E> {
        match self {
            Self::Keep => Ok(Patch::Keep),
            Self::Set(v) => f(v).map(Patch::Set),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only called when the key is present; a missing key falls back to Default.
        T::deserialize(deserializer).map(Patch::Set)
    }
}
