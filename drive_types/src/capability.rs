//! Provider capability model
//!
//! A provider implements a subset of the capability groups; absence of a
//! capability is a normal, expected state rather than a fault. Support is
//! discovered per call, never assumed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One optional operation group a provider may implement
///
/// Each capability corresponds to one backend contract trait. The enum is
/// closed: there are exactly four groups, and dispatch matches on all of
/// them exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Listing child folders and files of a provider path
    Enumerate,
    /// Size and last-modified metadata for a single item
    FileInfo,
    /// Whole-object read access to file contents
    FileData,
    /// Mutating operations (copy in/out, delete, create, rename)
    FileOperations,
}

impl Capability {
    /// All capability groups, in dispatch order
    pub const ALL: [Capability; 4] = [
        Capability::Enumerate,
        Capability::FileInfo,
        Capability::FileData,
        Capability::FileOperations,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Enumerate => "Enumerate",
            Capability::FileInfo => "FileInfo",
            Capability::FileData => "FileData",
            Capability::FileOperations => "FileOperations",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a capability query
///
/// `NotSupported` is a control-flow branch, not an error: most
/// capability/provider pairs are unsupported and callers are expected to
/// skip the corresponding operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// The provider implements this capability group
    Supported,
    /// The provider does not implement this capability group
    NotSupported,
}

impl CapabilityStatus {
    /// Returns true for [`CapabilityStatus::Supported`]
    pub fn is_supported(&self) -> bool {
        matches!(self, CapabilityStatus::Supported)
    }
}
