use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable key of a price line within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceLineId(String);

impl PriceLineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PriceLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PriceLineId {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for PriceLineId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl Borrow<str> for PriceLineId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
