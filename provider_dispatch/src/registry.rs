//! Drive-to-provider registry
//!
//! Maps each mounted drive identity to the live provider that answers for
//! it. One drive has exactly one provider for the lifetime of a session;
//! a second registration for the same identity is a configuration error.

use crate::backend::ProviderBackend;
use crate::binding::DispatchError;
use drive_types::DriveId;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// A shared handle to a live provider
///
/// Plain atomically-counted sharing: clone to share, drop to release. The
/// provider is destroyed when the last handle goes away.
pub type ProviderHandle = Arc<dyn ProviderBackend>;

/// Errors for registry mutation
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A provider is already registered for this drive
    #[error("provider already registered for {0}")]
    AlreadyRegistered(DriveId),
}

/// Provider registry
///
/// Read-mostly shared state: registration happens at mount time, lookups
/// happen on every bind.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<DriveId, ProviderHandle>,
}

impl ProviderRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the provider for a drive
    pub fn register(
        &mut self,
        drive: DriveId,
        provider: ProviderHandle,
    ) -> Result<(), RegistryError> {
        if self.providers.contains_key(&drive) {
            return Err(RegistryError::AlreadyRegistered(drive));
        }
        self.providers.insert(drive, provider);
        Ok(())
    }

    /// Removes the provider for a drive, if any
    pub fn unregister(&mut self, drive: DriveId) -> Option<ProviderHandle> {
        self.providers.remove(&drive)
    }

    /// Resolves the provider handle for a drive
    pub fn resolve(&self, drive: DriveId) -> Result<ProviderHandle, DispatchError> {
        self.providers
            .get(&drive)
            .cloned()
            .ok_or(DispatchError::Unavailable(drive))
    }

    /// Returns the number of registered drives
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no drive is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;
    impl ProviderBackend for Bare {}

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ProviderRegistry::new();
        let drive = DriveId::new();
        registry.register(drive, Arc::new(Bare)).unwrap();
        assert!(registry.resolve(drive).is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = ProviderRegistry::new();
        let drive = DriveId::new();
        registry.register(drive, Arc::new(Bare)).unwrap();
        let result = registry.register(drive, Arc::new(Bare));
        assert!(matches!(result, Err(RegistryError::AlreadyRegistered(_))));
    }

    #[test]
    fn test_unknown_drive_is_unavailable() {
        let registry = ProviderRegistry::new();
        let result = registry.resolve(DriveId::new());
        assert!(matches!(result, Err(DispatchError::Unavailable(_))));
    }

    #[test]
    fn test_unregister() {
        let mut registry = ProviderRegistry::new();
        let drive = DriveId::new();
        registry.register(drive, Arc::new(Bare)).unwrap();
        assert!(registry.unregister(drive).is_some());
        assert!(registry.resolve(drive).is_err());
    }

    #[test]
    fn test_handle_is_shared_not_copied() {
        let mut registry = ProviderRegistry::new();
        let drive = DriveId::new();
        let provider: ProviderHandle = Arc::new(Bare);
        registry.register(drive, Arc::clone(&provider)).unwrap();

        let resolved = registry.resolve(drive).unwrap();
        assert!(Arc::ptr_eq(&provider, &resolved));
    }
}
