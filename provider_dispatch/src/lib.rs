//! # Provider Dispatch
//!
//! Per-drive provider registration and capability-negotiated dispatch.
//!
//! ## Philosophy
//!
//! A provider advertises what it can do by handing out trait objects for
//! the operation groups it implements, and callers negotiate before each
//! call rather than assuming a full-featured backend. Missing capability
//! is an expected outcome ([`DispatchError::NotSupported`]), distinct from
//! a backend that tried and failed ([`DispatchError::Backend`]).
//!
//! [`ProviderRegistry`] maps drive identities to live provider handles;
//! [`ProviderBinding`] pairs one drive with its resolved handle and carries
//! every operation the rest of the system invokes against a provider.

pub mod backend;
pub mod binding;
pub mod memory_provider;
pub mod registry;

pub use backend::{
    BackendError, ByteSource, EnumerateBackend, FileDataBackend, FileInfo, FileInfoBackend,
    FileOperationsBackend, ProviderBackend,
};
pub use binding::{DispatchError, Listing, ProviderBinding};
pub use memory_provider::{MemoryByteSource, MemoryProvider};
pub use registry::{ProviderHandle, ProviderRegistry, RegistryError};
