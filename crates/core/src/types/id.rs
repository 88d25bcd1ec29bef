//! Reviewer references.
//!
//! Books themselves carry no identity; the only IDs in the data are the
//! reviewer references inside a book's reviews. Source data writes them as
//! numbers or strings, so the ID keeps whatever text it was given.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::de;

/// The author of a review, as written in the source record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReviewerId(String);

impl ReviewerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ReviewerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        de::text(deserializer).map(Self)
    }
}
