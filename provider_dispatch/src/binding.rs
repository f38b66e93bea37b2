//! Capability negotiation and dispatch for one bound drive
//!
//! A binding pairs a drive identity with its resolved provider handle and
//! dispatches capability-scoped operations with three-way outcome
//! semantics: supported-and-succeeded, not-supported (a normal branch the
//! caller must handle), and supported-but-failed (an error to propagate).

use crate::backend::{BackendError, ByteSource, FileInfo};
use crate::registry::{ProviderHandle, ProviderRegistry};
use drive_types::{Capability, CapabilityStatus, DriveId};
use std::path::Path;
use thiserror::Error;

/// Errors from resolving or invoking a provider
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No provider is registered for the drive
    #[error("no provider available for {0}")]
    Unavailable(DriveId),

    /// The provider does not implement the capability
    ///
    /// This is expected for most capability/provider pairs; callers branch
    /// on it rather than treating it as a fault.
    #[error("capability {0} is not supported by this provider")]
    NotSupported(Capability),

    /// A supported capability call failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl DispatchError {
    /// Returns true for the not-supported branch
    pub fn is_not_supported(&self) -> bool {
        matches!(self, DispatchError::NotSupported(_))
    }
}

/// The fully materialized result of one enumeration
///
/// Folders and files are two independent ordered batches, never
/// interleaved; the provider's name order is preserved as returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Child folder names
    pub folders: Vec<String>,
    /// Child file names
    pub files: Vec<String>,
}

/// One drive bound to its provider
///
/// Capability support is re-queried on every call rather than cached: a
/// provider may be reloaded behind the handle, and the query is a cheap
/// accessor. Bindings are cloneable shares of the same provider handle.
#[derive(Clone)]
pub struct ProviderBinding {
    drive: DriveId,
    handle: ProviderHandle,
}

impl ProviderBinding {
    /// Resolves the provider for `drive` and binds to it
    pub fn bind(registry: &ProviderRegistry, drive: DriveId) -> Result<Self, DispatchError> {
        let handle = registry.resolve(drive)?;
        Ok(Self { drive, handle })
    }

    /// Creates a binding from an already-resolved handle
    pub fn from_handle(drive: DriveId, handle: ProviderHandle) -> Self {
        Self { drive, handle }
    }

    /// Returns the bound drive identity
    pub fn drive(&self) -> DriveId {
        self.drive
    }

    /// Queries whether the provider implements a capability
    ///
    /// Never fails: absence is an answer, not an error.
    pub fn query_capability(&self, capability: Capability) -> CapabilityStatus {
        let supported = match capability {
            Capability::Enumerate => self.handle.enumerate().is_some(),
            Capability::FileInfo => self.handle.file_info().is_some(),
            Capability::FileData => self.handle.file_data().is_some(),
            Capability::FileOperations => self.handle.file_operations().is_some(),
        };
        if supported {
            CapabilityStatus::Supported
        } else {
            CapabilityStatus::NotSupported
        }
    }

    /// Lists child folders and files of a provider path
    ///
    /// Two independent backend calls, folders first. The whole listing is
    /// materialized before return; there is no paging to the backend.
    pub fn invoke_enumerate(&self, path: &str) -> Result<Listing, DispatchError> {
        let backend = self
            .handle
            .enumerate()
            .ok_or(DispatchError::NotSupported(Capability::Enumerate))?;

        let folders = backend.list_folders(self.drive, path)?;
        let files = backend.list_files(self.drive, path)?;
        Ok(Listing { folders, files })
    }

    /// Fetches size and last-modified metadata for one item
    pub fn invoke_file_info(&self, path: &str) -> Result<FileInfo, DispatchError> {
        let backend = self
            .handle
            .file_info()
            .ok_or(DispatchError::NotSupported(Capability::FileInfo))?;

        let size = backend.size(self.drive, path)?;
        let last_modified = backend.last_modified(self.drive, path)?;
        Ok(FileInfo {
            size,
            last_modified,
        })
    }

    /// Opens an item for whole-object reading
    pub fn invoke_file_data(&self, path: &str) -> Result<Box<dyn ByteSource>, DispatchError> {
        let backend = self
            .handle
            .file_data()
            .ok_or(DispatchError::NotSupported(Capability::FileData))?;
        Ok(backend.open_read(self.drive, path)?)
    }

    /// Copies a local file into the drive
    pub fn invoke_copy_in(&self, local: &Path, dest_path: &str) -> Result<(), DispatchError> {
        Ok(self.file_operations()?.copy_in(self.drive, local, dest_path)?)
    }

    /// Copies a drive file out to a local path
    pub fn invoke_copy_out(&self, src_path: &str, local: &Path) -> Result<(), DispatchError> {
        Ok(self.file_operations()?.copy_out(self.drive, src_path, local)?)
    }

    /// Deletes a file on the drive
    pub fn invoke_delete(&self, path: &str) -> Result<(), DispatchError> {
        Ok(self.file_operations()?.delete(self.drive, path)?)
    }

    /// Creates a folder on the drive
    pub fn invoke_create_folder(&self, path: &str) -> Result<(), DispatchError> {
        Ok(self.file_operations()?.create_folder(self.drive, path)?)
    }

    /// Moves an item to a new path on the drive
    pub fn invoke_rename(&self, src_path: &str, dest_path: &str) -> Result<(), DispatchError> {
        Ok(self.file_operations()?.rename(self.drive, src_path, dest_path)?)
    }

    fn file_operations(
        &self,
    ) -> Result<&dyn crate::backend::FileOperationsBackend, DispatchError> {
        self.handle
            .file_operations()
            .ok_or(DispatchError::NotSupported(Capability::FileOperations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{EnumerateBackend, ProviderBackend};
    use std::sync::Arc;

    /// Provider that implements only Enumerate
    struct EnumerateOnly;

    impl EnumerateBackend for EnumerateOnly {
        fn list_folders(&self, _: DriveId, _: &str) -> Result<Vec<String>, BackendError> {
            Ok(vec!["alpha".to_string(), "beta".to_string()])
        }

        fn list_files(&self, _: DriveId, _: &str) -> Result<Vec<String>, BackendError> {
            Ok(vec!["notes.txt".to_string()])
        }
    }

    impl ProviderBackend for EnumerateOnly {
        fn enumerate(&self) -> Option<&dyn EnumerateBackend> {
            Some(self)
        }
    }

    /// Provider whose enumerate calls always fail
    struct FailingEnumerate;

    impl EnumerateBackend for FailingEnumerate {
        fn list_folders(&self, _: DriveId, _: &str) -> Result<Vec<String>, BackendError> {
            Err(BackendError::new(31, "device not functioning"))
        }

        fn list_files(&self, _: DriveId, _: &str) -> Result<Vec<String>, BackendError> {
            Err(BackendError::new(31, "device not functioning"))
        }
    }

    impl ProviderBackend for FailingEnumerate {
        fn enumerate(&self) -> Option<&dyn EnumerateBackend> {
            Some(self)
        }
    }

    fn bind(provider: impl ProviderBackend + 'static) -> ProviderBinding {
        ProviderBinding::from_handle(DriveId::new(), Arc::new(provider))
    }

    #[test]
    fn test_query_capability_three_states() {
        let binding = bind(EnumerateOnly);
        assert_eq!(
            binding.query_capability(Capability::Enumerate),
            CapabilityStatus::Supported
        );
        assert_eq!(
            binding.query_capability(Capability::FileData),
            CapabilityStatus::NotSupported
        );
        assert_eq!(
            binding.query_capability(Capability::FileOperations),
            CapabilityStatus::NotSupported
        );
    }

    #[test]
    fn test_enumerate_returns_folders_then_files() {
        let binding = bind(EnumerateOnly);
        let listing = binding.invoke_enumerate("\\").unwrap();
        assert_eq!(listing.folders, vec!["alpha", "beta"]);
        assert_eq!(listing.files, vec!["notes.txt"]);
    }

    #[test]
    fn test_unsupported_file_data_is_not_supported_not_backend_error() {
        let binding = bind(EnumerateOnly);
        let result = binding.invoke_file_data("\\notes.txt");
        match result {
            Err(DispatchError::NotSupported(Capability::FileData)) => {}
            other => panic!("expected NotSupported, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_backend_failure_is_backend_error() {
        let binding = bind(FailingEnumerate);
        let result = binding.invoke_enumerate("\\");
        match result {
            Err(DispatchError::Backend(err)) => assert_eq!(err.code, 31),
            other => panic!("expected Backend error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_capability_queries_are_idempotent() {
        let binding = bind(EnumerateOnly);
        for _ in 0..3 {
            assert!(binding.query_capability(Capability::Enumerate).is_supported());
            assert!(!binding.query_capability(Capability::FileInfo).is_supported());
        }
    }
}
