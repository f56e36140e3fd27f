//! Core type definitions for the communication graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

pub use mailgraph_algorithms::Weight;

/// Anything usable as a vertex token: hashable, totally ordered (for
/// deterministic rankings) and printable (for error messages and reports).
pub trait Vertex: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync {}

impl<T> Vertex for T where T: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync {}

/// A participant address (e.g. "alice@example.com")
///
/// The graph treats it as an opaque token; normalisation such as
/// lower-casing is the ingestion layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Address(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Address(s)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Address(s.to_string())
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
