// Identifiers handed out by remote APIs.
// Some servers send ids as JSON strings, others as integers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque id returned by an image API or a Fediverse instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Text(String),
    Number(u64),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Text(s) => write!(f, "{}", s),
            RemoteId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for RemoteId {
    fn from(s: &str) -> Self {
        RemoteId::Text(s.to_string())
    }
}
