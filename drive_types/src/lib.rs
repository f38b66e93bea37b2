//! # Drive Types
//!
//! This crate defines the fundamental types shared across the drive
//! namespace core.
//!
//! ## Philosophy
//!
//! - **Identity is opaque**: a drive is named by a 128-bit value, never by
//!   a mount letter or display string.
//! - **Capabilities are negotiated**: nothing assumes a provider implements
//!   an operation group; support is queried and absence is normal.
//!
//! ## Key Types
//!
//! - [`DriveId`]: Unique identifier for a mounted virtual drive
//! - [`Capability`]: One optional provider operation group
//! - [`CapabilityStatus`]: Three-way negotiation outcome, minus the error leg

pub mod capability;
pub mod ids;

pub use capability::{Capability, CapabilityStatus};
pub use ids::DriveId;
