//! In-memory provider for exercising dispatch and navigation
//!
//! A complete provider implementation over an in-memory folder/file tree,
//! with a selectable capability set so tests can model providers that
//! implement any subset of the operation groups. Useful for testing
//! negotiation fallbacks without a live out-of-process backend.

use crate::backend::{
    BackendError, ByteSource, EnumerateBackend, FileDataBackend, FileInfoBackend,
    FileOperationsBackend, ProviderBackend,
};
use drive_types::{Capability, DriveId};
use std::collections::BTreeMap;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;

const CODE_NOT_FOUND: u32 = 2;
const CODE_EXISTS: u32 = 80;
const CODE_NOT_A_FILE: u32 = 5;
const CODE_IO: u32 = 29;

#[derive(Debug, Clone)]
enum Node {
    Folder,
    File {
        data: Vec<u8>,
        modified: SystemTime,
    },
}

/// A seekable byte source over an owned buffer
pub struct MemoryByteSource {
    inner: Cursor<Vec<u8>>,
}

impl MemoryByteSource {
    /// Wraps a buffer
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }
}

impl Read for MemoryByteSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for MemoryByteSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl ByteSource for MemoryByteSource {
    fn len(&self) -> u64 {
        self.inner.get_ref().len() as u64
    }
}

/// An in-memory provider with a selectable capability set
///
/// Paths are canonical provider paths: `\`-separated with a leading `\`.
/// The tree is keyed by full path; the root folder always exists.
pub struct MemoryProvider {
    nodes: Mutex<BTreeMap<String, Node>>,
    capabilities: Vec<Capability>,
}

impl MemoryProvider {
    /// Creates an empty provider implementing all four capability groups
    pub fn new() -> Self {
        Self::with_capabilities(&Capability::ALL)
    }

    /// Creates an empty provider implementing only the listed groups
    pub fn with_capabilities(capabilities: &[Capability]) -> Self {
        Self {
            nodes: Mutex::new(BTreeMap::new()),
            capabilities: capabilities.to_vec(),
        }
    }

    /// Adds a folder at `path`
    pub fn add_folder(&self, path: &str) {
        self.lock().insert(path.to_string(), Node::Folder);
    }

    /// Adds a file at `path` with the current time as modification time
    pub fn add_file(&self, path: &str, data: &[u8]) {
        self.add_file_modified(path, data, SystemTime::now());
    }

    /// Adds a file at `path` with an explicit modification time
    pub fn add_file_modified(&self, path: &str, data: &[u8], modified: SystemTime) {
        self.lock().insert(
            path.to_string(),
            Node::File {
                data: data.to_vec(),
                modified,
            },
        );
    }

    /// Returns true if any node exists at `path`
    pub fn contains(&self, path: &str) -> bool {
        path == "\\" || self.lock().contains_key(path)
    }

    /// Returns a file's contents, if a file exists at `path`
    pub fn file_data(&self, path: &str) -> Option<Vec<u8>> {
        match self.lock().get(path) {
            Some(Node::File { data, .. }) => Some(data.clone()),
            _ => None,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Node>> {
        // A poisoned tree is still readable; take it as-is.
        self.nodes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Returns the child name if `candidate` is a direct child of `parent`
    fn child_name<'a>(parent: &str, candidate: &'a str) -> Option<&'a str> {
        let rest = if parent == "\\" {
            candidate.strip_prefix('\\')?
        } else {
            candidate.strip_prefix(parent)?.strip_prefix('\\')?
        };
        if rest.is_empty() || rest.contains('\\') {
            None
        } else {
            Some(rest)
        }
    }

    fn list_children(&self, path: &str, want_folders: bool) -> Result<Vec<String>, BackendError> {
        let nodes = self.lock();
        if path != "\\" && !matches!(nodes.get(path), Some(Node::Folder)) {
            return Err(BackendError::new(
                CODE_NOT_FOUND,
                format!("folder not found: {}", path),
            ));
        }
        Ok(nodes
            .iter()
            .filter(|(_, node)| matches!(node, Node::Folder) == want_folders)
            .filter_map(|(full, _)| Self::child_name(path, full))
            .map(str::to_string)
            .collect())
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EnumerateBackend for MemoryProvider {
    fn list_folders(&self, _drive: DriveId, path: &str) -> Result<Vec<String>, BackendError> {
        self.list_children(path, true)
    }

    fn list_files(&self, _drive: DriveId, path: &str) -> Result<Vec<String>, BackendError> {
        self.list_children(path, false)
    }
}

impl FileInfoBackend for MemoryProvider {
    fn size(&self, _drive: DriveId, path: &str) -> Result<u64, BackendError> {
        match self.lock().get(path) {
            Some(Node::File { data, .. }) => Ok(data.len() as u64),
            Some(Node::Folder) => Err(BackendError::new(CODE_NOT_A_FILE, "not a file")),
            None => Err(BackendError::new(
                CODE_NOT_FOUND,
                format!("file not found: {}", path),
            )),
        }
    }

    fn last_modified(&self, _drive: DriveId, path: &str) -> Result<SystemTime, BackendError> {
        match self.lock().get(path) {
            Some(Node::File { modified, .. }) => Ok(*modified),
            Some(Node::Folder) => Err(BackendError::new(CODE_NOT_A_FILE, "not a file")),
            None => Err(BackendError::new(
                CODE_NOT_FOUND,
                format!("file not found: {}", path),
            )),
        }
    }
}

impl FileDataBackend for MemoryProvider {
    fn open_read(&self, _drive: DriveId, path: &str) -> Result<Box<dyn ByteSource>, BackendError> {
        match self.lock().get(path) {
            Some(Node::File { data, .. }) => Ok(Box::new(MemoryByteSource::new(data.clone()))),
            Some(Node::Folder) => Err(BackendError::new(CODE_NOT_A_FILE, "not a file")),
            None => Err(BackendError::new(
                CODE_NOT_FOUND,
                format!("file not found: {}", path),
            )),
        }
    }
}

impl FileOperationsBackend for MemoryProvider {
    fn copy_in(&self, _drive: DriveId, local: &Path, dest_path: &str) -> Result<(), BackendError> {
        let data = std::fs::read(local)
            .map_err(|e| BackendError::new(CODE_IO, format!("read {}: {}", local.display(), e)))?;
        self.lock().insert(
            dest_path.to_string(),
            Node::File {
                data,
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    fn copy_out(&self, _drive: DriveId, src_path: &str, local: &Path) -> Result<(), BackendError> {
        let data = match self.lock().get(src_path) {
            Some(Node::File { data, .. }) => data.clone(),
            Some(Node::Folder) => return Err(BackendError::new(CODE_NOT_A_FILE, "not a file")),
            None => {
                return Err(BackendError::new(
                    CODE_NOT_FOUND,
                    format!("file not found: {}", src_path),
                ))
            }
        };
        std::fs::write(local, data)
            .map_err(|e| BackendError::new(CODE_IO, format!("write {}: {}", local.display(), e)))
    }

    fn delete(&self, _drive: DriveId, path: &str) -> Result<(), BackendError> {
        match self.lock().remove(path) {
            Some(_) => Ok(()),
            None => Err(BackendError::new(
                CODE_NOT_FOUND,
                format!("file not found: {}", path),
            )),
        }
    }

    fn create_folder(&self, _drive: DriveId, path: &str) -> Result<(), BackendError> {
        let mut nodes = self.lock();
        if nodes.contains_key(path) {
            return Err(BackendError::new(
                CODE_EXISTS,
                format!("already exists: {}", path),
            ));
        }
        nodes.insert(path.to_string(), Node::Folder);
        Ok(())
    }

    fn rename(&self, _drive: DriveId, src_path: &str, dest_path: &str) -> Result<(), BackendError> {
        let mut nodes = self.lock();
        if !nodes.contains_key(src_path) {
            return Err(BackendError::new(
                CODE_NOT_FOUND,
                format!("file not found: {}", src_path),
            ));
        }
        if nodes.contains_key(dest_path) {
            return Err(BackendError::new(
                CODE_EXISTS,
                format!("already exists: {}", dest_path),
            ));
        }

        // Move the node and, for folders, every descendant under it.
        let moved: Vec<(String, Node)> = nodes
            .iter()
            .filter(|(full, _)| {
                full.as_str() == src_path || full.starts_with(&format!("{}\\", src_path))
            })
            .map(|(full, node)| {
                let suffix = &full[src_path.len()..];
                (format!("{}{}", dest_path, suffix), node.clone())
            })
            .collect();
        nodes.retain(|full, _| {
            full.as_str() != src_path && !full.starts_with(&format!("{}\\", src_path))
        });
        nodes.extend(moved);
        Ok(())
    }
}

impl ProviderBackend for MemoryProvider {
    fn enumerate(&self) -> Option<&dyn EnumerateBackend> {
        self.supports(Capability::Enumerate)
            .then_some(self as &dyn EnumerateBackend)
    }

    fn file_info(&self) -> Option<&dyn FileInfoBackend> {
        self.supports(Capability::FileInfo)
            .then_some(self as &dyn FileInfoBackend)
    }

    fn file_data(&self) -> Option<&dyn FileDataBackend> {
        self.supports(Capability::FileData)
            .then_some(self as &dyn FileDataBackend)
    }

    fn file_operations(&self) -> Option<&dyn FileOperationsBackend> {
        self.supports(Capability::FileOperations)
            .then_some(self as &dyn FileOperationsBackend)
    }
}
