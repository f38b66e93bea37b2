//! Folder navigation against a bound provider
//!
//! A [`FolderNavigator`] is the view of one folder on one drive: it holds
//! the drive's provider binding and the absolute item-id chain of the
//! folder, and serves enumeration, child binding, comparison, and display
//! naming from that position.

use crate::enumerator::NamespaceEnumerator;
use drive_log::{EventLog, LogEntry, LogLevel};
use drive_types::{Capability, DriveId};
use item_chain::{ChainError, ItemIdChain, ItemKind, PathResolver, Segment};
use provider_dispatch::{
    ByteSource, DispatchError, FileInfo, ProviderBinding, ProviderRegistry,
};
use std::cmp::Ordering;
use std::path::Path;

/// Errors from navigation operations
#[derive(Debug, thiserror::Error)]
pub enum NavigatorError {
    /// The item-id chain could not be interpreted
    #[error(transparent)]
    Chain(#[from] ChainError),
    /// The provider call failed or could not be dispatched
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// A bound view of one folder on one virtual drive
///
/// Binding resolves the provider handle once; every operation afterwards
/// re-negotiates capability at call time, so a provider that changes what
/// it supports is honored on the next call. A failed operation never
/// poisons the navigator.
pub struct FolderNavigator {
    binding: ProviderBinding,
    chain: ItemIdChain,
    host_prefix_len: usize,
    log: EventLog,
}

impl FolderNavigator {
    /// Binds to a folder on a drive
    ///
    /// `absolute_chain` addresses the folder from the namespace root;
    /// `host_prefix_len` is the number of leading segments owned by the
    /// hosting shell rather than the provider.
    pub fn bind(
        registry: &ProviderRegistry,
        drive: DriveId,
        absolute_chain: ItemIdChain,
        host_prefix_len: usize,
        log: EventLog,
    ) -> Result<Self, NavigatorError> {
        let binding = ProviderBinding::bind(registry, drive)?;
        Ok(Self {
            binding,
            chain: absolute_chain,
            host_prefix_len,
            log,
        })
    }

    /// The drive this navigator is bound to
    pub fn drive(&self) -> DriveId {
        self.binding.drive()
    }

    /// The absolute chain of the folder this navigator views
    pub fn chain(&self) -> &ItemIdChain {
        &self.chain
    }

    /// Lists the folder's children as an enumerator of relative chains
    ///
    /// Each child is a single-segment chain relative to this folder,
    /// folders before files. A provider without the enumerate capability
    /// yields an empty enumerator; a provider that fails mid-call aborts
    /// the whole listing and the failure is recorded in the event log.
    pub fn enumerate_children(
        &self,
        include_folders: bool,
        include_files: bool,
    ) -> Result<NamespaceEnumerator, NavigatorError> {
        if !self.binding.query_capability(Capability::Enumerate).is_supported() {
            return Ok(NamespaceEnumerator::new());
        }

        let path = PathResolver::chain_to_provider_path(&self.chain, self.host_prefix_len)?;
        let listing = match self.binding.invoke_enumerate(&path) {
            Ok(listing) => listing,
            Err(error) => {
                self.log.record(
                    LogEntry::new(
                        LogLevel::Error,
                        format!("enumeration failed: {}", error),
                    )
                    .with_drive(self.drive())
                    .with_field(
                        "path".to_string(),
                        PathResolver::logging_path(self.drive(), &self.chain),
                    ),
                );
                return Err(error.into());
            }
        };

        let mut enumerator = NamespaceEnumerator::new();
        if include_folders {
            for name in &listing.folders {
                enumerator.add(single_segment(ItemKind::Folder, name)?);
            }
        }
        if include_files {
            for name in &listing.files {
                enumerator.add(single_segment(ItemKind::File, name)?);
            }
        }
        Ok(enumerator)
    }

    /// Binds a navigator for a child folder, without provider I/O
    ///
    /// The child is addressed by a chain relative to this folder. The new
    /// navigator shares the provider binding; whether the child actually
    /// exists is discovered on its first operation.
    pub fn bind_to_child(&self, relative: &ItemIdChain) -> FolderNavigator {
        FolderNavigator {
            binding: self.binding.clone(),
            chain: self.chain.concat(relative),
            host_prefix_len: self.host_prefix_len,
            log: self.log.clone(),
        }
    }

    /// Orders two children for stable display
    pub fn compare_children(&self, a: &ItemIdChain, b: &ItemIdChain) -> Ordering {
        a.compare(b)
    }

    /// The display name of an item addressed by `chain`
    pub fn display_name_of(&self, chain: &ItemIdChain) -> Result<String, NavigatorError> {
        Ok(PathResolver::display_string(chain)?)
    }

    /// Parses user-entered text into a chain relative to this folder
    pub fn parse_display_name(
        &self,
        text: &str,
        leaf_kind: ItemKind,
    ) -> Result<ItemIdChain, NavigatorError> {
        Ok(PathResolver::parse_display_name(text, leaf_kind)?)
    }

    /// Size and modification time of a file in this folder's subtree
    pub fn file_info(&self, relative: &ItemIdChain) -> Result<FileInfo, NavigatorError> {
        let path = self.child_path(relative)?;
        Ok(self.binding.invoke_file_info(&path)?)
    }

    /// Opens a file in this folder's subtree for reading
    pub fn open_file(&self, relative: &ItemIdChain) -> Result<Box<dyn ByteSource>, NavigatorError> {
        let path = self.child_path(relative)?;
        Ok(self.binding.invoke_file_data(&path)?)
    }

    /// Copies a local file into this folder's subtree
    pub fn copy_file_in(
        &self,
        local: &Path,
        relative: &ItemIdChain,
    ) -> Result<(), NavigatorError> {
        let path = self.child_path(relative)?;
        Ok(self.binding.invoke_copy_in(local, &path)?)
    }

    fn child_path(&self, relative: &ItemIdChain) -> Result<String, ChainError> {
        let absolute = self.chain.concat(relative);
        PathResolver::chain_to_provider_path(&absolute, self.host_prefix_len)
    }
}

fn single_segment(kind: ItemKind, name: &str) -> Result<ItemIdChain, ChainError> {
    Ok(ItemIdChain::from_segments(vec![Segment::new(kind, name)?]))
}
