//! Store metadata.

use serde::{Deserialize, Serialize};

use super::book::Book;
use super::de;

/// The store record supplied by the hosting page.
///
/// Everything except `inventory` is display-only text for the header and
/// footer. `inventory` is the initial book collection, rendered in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub location: String,
    #[serde(default, deserialize_with = "de::text")]
    pub address: String,
    #[serde(default, deserialize_with = "de::text")]
    pub hours: String,
    /// Phone number.
    #[serde(default, deserialize_with = "de::text")]
    pub number: String,
    #[serde(default)]
    pub inventory: Vec<Book>,
}
