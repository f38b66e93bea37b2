//! Item-id chains and their segments
//!
//! A chain is the hierarchical address of one object inside a virtual
//! drive: an ordered, root-to-leaf sequence of typed, named segments.
//! Chains are plain value types. They are immutable after construction,
//! cloned rather than shared, and never carry interior mutability.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors raised while encoding, decoding, or transforming chains
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    /// Corrupt binary input (bad size field, unknown kind, missing
    /// terminator, empty name)
    #[error("Malformed chain: {0}")]
    Malformed(String),

    /// The buffer ended before the chain terminator was reached
    #[error("Truncated chain: buffer ended before the zero terminator")]
    Truncated,

    /// The caller supplied data that cannot be encoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A prefix-skip or index beyond the chain length
    #[error("Out of range: requested {requested}, chain has {len} segments")]
    OutOfRange { requested: usize, len: usize },

    /// Malformed display-name text or an empty chain where one is required
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A segment failed re-validation after construction
    #[error("Invalid segment: {0}")]
    InvalidSegment(String),
}

/// The kind of object a segment names
///
/// The wire encoding reserves `1` for files and `2` for folders; any other
/// value invalidates the containing chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// A leaf object with contents
    File,
    /// A container of further items
    Folder,
}

impl ItemKind {
    /// Returns the wire value for this kind
    pub fn wire_value(&self) -> u32 {
        match self {
            ItemKind::File => 1,
            ItemKind::Folder => 2,
        }
    }

    /// Maps a wire value back to a kind, if recognized
    pub fn from_wire(value: u32) -> Option<Self> {
        match value {
            1 => Some(ItemKind::File),
            2 => Some(ItemKind::Folder),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::File => write!(f, "File"),
            ItemKind::Folder => write!(f, "Folder"),
        }
    }
}

/// One path component of an item-id chain
///
/// Fields are public so callers can inspect decoded segments directly, but
/// [`Segment::new`] is the validating constructor for segments built from
/// names. Operations that receive chains from outside the decode path
/// re-check [`Segment::is_valid`] before trusting the contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Whether this component names a file or a folder
    pub kind: ItemKind,
    /// The component name, without separators
    pub name: String,
}

impl Segment {
    /// Creates a validated segment
    ///
    /// The name must be non-empty and contain neither a path separator nor
    /// an embedded NUL.
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Result<Self, ChainError> {
        let name = name.into();
        let segment = Self { kind, name };
        segment.validate()?;
        Ok(segment)
    }

    /// Checks the segment invariants, reporting which one failed
    pub fn validate(&self) -> Result<(), ChainError> {
        if self.name.is_empty() {
            return Err(ChainError::InvalidSegment("empty name".to_string()));
        }
        if self.name.contains('\\') {
            return Err(ChainError::InvalidSegment(
                "name contains path separator".to_string(),
            ));
        }
        if self.name.contains('\0') {
            return Err(ChainError::InvalidSegment(
                "name contains embedded NUL".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns true if the segment satisfies all invariants
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// An owned, immutable, root-to-leaf sequence of segments
///
/// The empty chain addresses the drive root. Equality is structural:
/// two chains are equal when they have the same segments in the same
/// order, regardless of how they were constructed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemIdChain {
    segments: Vec<Segment>,
}

impl ItemIdChain {
    /// Creates an empty chain (the drive root)
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Creates a chain from already-validated segments
    ///
    /// Segments coming out of the decoder have already passed validation;
    /// this constructor does not re-check them.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Returns a new chain with one more segment appended
    pub fn append(&self, segment: Segment) -> ItemIdChain {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns a new chain that is this chain followed by `relative`
    ///
    /// This is how descent into a sub-folder combines the bound chain with
    /// a child-relative chain.
    pub fn concat(&self, relative: &ItemIdChain) -> ItemIdChain {
        let mut segments = self.segments.clone();
        segments.extend(relative.segments.iter().cloned());
        Self { segments }
    }

    /// Returns the leaf segment, or `None` for the root chain
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Returns the segments, root first
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root chain
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the suffix chain after dropping the first `n` segments
    ///
    /// Used to strip host-namespace prefix segments that are not part of
    /// the provider path.
    pub fn skip_prefix(&self, n: usize) -> Result<ItemIdChain, ChainError> {
        if n > self.segments.len() {
            return Err(ChainError::OutOfRange {
                requested: n,
                len: self.segments.len(),
            });
        }
        Ok(Self {
            segments: self.segments[n..].to_vec(),
        })
    }

    /// Returns true if every segment satisfies the segment invariants
    pub fn is_valid(&self) -> bool {
        self.segments.iter().all(Segment::is_valid)
    }

    /// Orders two chains by leaf name, case-insensitively
    ///
    /// Structurally equal chains short-circuit to `Equal` before any name
    /// comparison. If either chain contains an invalid segment the chains
    /// compare `Equal`: a deliberate leniency that keeps sorted listings
    /// stable in the presence of corrupted identifiers instead of failing
    /// the whole sort.
    pub fn compare(&self, other: &ItemIdChain) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        if !self.is_valid() || !other.is_valid() {
            return Ordering::Equal;
        }
        let a = self.last().map(|s| s.name.to_lowercase()).unwrap_or_default();
        let b = other
            .last()
            .map(|s| s.name.to_lowercase())
            .unwrap_or_default();
        a.cmp(&b)
    }
}

impl fmt::Display for ItemIdChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "\\");
        }
        for segment in &self.segments {
            write!(f, "\\{}", segment.name)?;
        }
        Ok(())
    }
}
