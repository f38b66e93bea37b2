//! Unique identifiers for drive entities

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a mounted virtual drive
///
/// A drive identity is a 128-bit opaque value that distinguishes one mounted
/// drive from another for the lifetime of a session. It maps 1:1 to one
/// provider binding; every provider-facing call carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DriveId(Uuid);

impl DriveId {
    /// Creates a new random drive ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a drive ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DriveId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DriveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Drive({})", self.0)
    }
}
