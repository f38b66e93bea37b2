//! # Drive View Service
//!
//! Folder navigation and child enumeration for virtual drives.
//!
//! ## Philosophy
//!
//! The view layer owns position, not data: a [`FolderNavigator`] is a
//! bound position inside one drive's namespace, and everything it serves
//! (listings, child bindings, names, orderings) is derived on demand from
//! the provider behind that drive. Providers come and go and vary in what
//! they support; the navigator negotiates capability per call and treats
//! a missing capability as an empty or unsupported answer, never a crash.
//!
//! Enumeration follows the batch-cursor model: [`NamespaceEnumerator`]
//! yields relative item-id chains in stable order (folders first) and
//! reports exhaustion as a status, not an error.

pub mod enumerator;
pub mod navigator;

pub use enumerator::{EnumStatus, NamespaceEnumerator};
pub use navigator::{FolderNavigator, NavigatorError};
