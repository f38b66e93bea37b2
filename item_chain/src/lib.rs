//! # Item Chain
//!
//! This crate implements the namespace addressing core for virtual drives:
//! the binary item-id encoding, the typed chain representation, and the
//! resolution between chains and provider path strings.
//!
//! ## Philosophy
//!
//! - **Validate at the boundary, trust inside**: every byte of untrusted
//!   input goes through the bounds-checked decoder; nothing downstream
//!   re-parses a chain that already passed `decode_chain`.
//! - **Chains are values**: immutable after construction, deeply cloned,
//!   never shared mutably.
//! - **No hidden roots**: host-namespace prefixes are explicit arguments,
//!   not process-wide state.
//!
//! ## Layout
//!
//! - [`codec`]: wire encode/decode plus the hex transport form
//! - [`chain`]: [`Segment`], [`ItemIdChain`], comparison semantics
//! - [`resolver`]: [`PathResolver`] between chains and `\`-paths

pub mod chain;
pub mod codec;
pub mod resolver;

pub use chain::{ChainError, ItemIdChain, ItemKind, Segment};
pub use codec::{
    decode_chain, decode_hex, decode_segment_at, encode_chain, encode_hex, ByteCursor,
};
pub use resolver::PathResolver;
