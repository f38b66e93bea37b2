//! Backend contracts a provider may implement
//!
//! Each capability group is one object-safe trait. A provider exposes the
//! groups it implements through [`ProviderBackend`]; an accessor returning
//! `None` is the normal "not supported" state, never a fault. All calls
//! are blocking round-trips with no cancellation primitive; timeouts are a
//! transport concern outside this core.

use drive_types::DriveId;
use std::io::{Read, Seek};
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;

/// A failure reported by a provider for a supported operation
///
/// Carries the backend-specific code so host-side diagnostics can surface
/// it without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("backend error {code}: {message}")]
pub struct BackendError {
    /// Backend-specific failure code
    pub code: u32,
    /// Human-readable description
    pub message: String,
}

impl BackendError {
    /// Creates a new backend error
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Size and modification metadata for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    /// Item size in bytes
    pub size: u64,
    /// Last modification time
    pub last_modified: SystemTime,
}

/// A seekable, finite byte source for whole-object transfer
///
/// There is no chunked-read contract: callers query [`ByteSource::len`]
/// first, size their destination, and read to end.
pub trait ByteSource: Read + Seek + Send {
    /// Total length of the object in bytes
    fn len(&self) -> u64;

    /// Returns true for a zero-length object
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Listing child folders and files of a provider path
pub trait EnumerateBackend: Send + Sync {
    /// Returns the names of child folders, fully materialized
    fn list_folders(&self, drive: DriveId, path: &str) -> Result<Vec<String>, BackendError>;

    /// Returns the names of child files, fully materialized
    fn list_files(&self, drive: DriveId, path: &str) -> Result<Vec<String>, BackendError>;
}

/// Metadata for a single item
pub trait FileInfoBackend: Send + Sync {
    /// Returns the item size in bytes
    fn size(&self, drive: DriveId, path: &str) -> Result<u64, BackendError>;

    /// Returns the last modification time
    fn last_modified(&self, drive: DriveId, path: &str) -> Result<SystemTime, BackendError>;
}

/// Whole-object read access to file contents
pub trait FileDataBackend: Send + Sync {
    /// Opens the item for reading
    fn open_read(&self, drive: DriveId, path: &str) -> Result<Box<dyn ByteSource>, BackendError>;
}

/// Mutating operations on provider items
pub trait FileOperationsBackend: Send + Sync {
    /// Copies a local file into the drive at `dest_path`
    fn copy_in(&self, drive: DriveId, local: &Path, dest_path: &str) -> Result<(), BackendError>;

    /// Copies a drive file out to a local path
    fn copy_out(&self, drive: DriveId, src_path: &str, local: &Path) -> Result<(), BackendError>;

    /// Deletes a file
    fn delete(&self, drive: DriveId, path: &str) -> Result<(), BackendError>;

    /// Creates a folder
    fn create_folder(&self, drive: DriveId, path: &str) -> Result<(), BackendError>;

    /// Moves an item to a new path
    fn rename(&self, drive: DriveId, src_path: &str, dest_path: &str) -> Result<(), BackendError>;
}

/// The root contract of a provider
///
/// Mirrors interface negotiation on a remote component: each accessor is a
/// fresh query answered from the provider's current state, so support is
/// discovered per call and never cached by the dispatch layer.
pub trait ProviderBackend: Send + Sync {
    /// The Enumerate capability, if implemented
    fn enumerate(&self) -> Option<&dyn EnumerateBackend> {
        None
    }

    /// The FileInfo capability, if implemented
    fn file_info(&self) -> Option<&dyn FileInfoBackend> {
        None
    }

    /// The FileData capability, if implemented
    fn file_data(&self) -> Option<&dyn FileDataBackend> {
        None
    }

    /// The FileOperations capability, if implemented
    fn file_operations(&self) -> Option<&dyn FileOperationsBackend> {
        None
    }
}
