//! Cursor-based enumeration over item-id chains
//!
//! Enumeration hands out batches of relative chains and reports whether the
//! batch was filled, so callers can distinguish "gave you everything asked
//! for" from "the set ran out" without treating exhaustion as an error.

use item_chain::ItemIdChain;

/// Outcome of a batch request against an enumerator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumStatus {
    /// The full requested count was delivered (or skipped)
    Full,
    /// Fewer items remained than were requested
    Exhausted,
}

/// A clonable forward cursor over a frozen set of item-id chains
///
/// The backing set is filled with [`add`](NamespaceEnumerator::add) while
/// the enumerator is being built, then only read. Clones share no cursor
/// state; each advances independently over the same items.
#[derive(Debug, Clone, Default)]
pub struct NamespaceEnumerator {
    items: Vec<ItemIdChain>,
    cursor: usize,
}

impl NamespaceEnumerator {
    /// Creates an empty enumerator
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an enumerator over a prepared set of chains
    pub fn from_items(items: Vec<ItemIdChain>) -> Self {
        Self { items, cursor: 0 }
    }

    /// Appends a chain to the backing set
    pub fn add(&mut self, chain: ItemIdChain) {
        self.items.push(chain);
    }

    /// Returns up to `count` chains, advancing the cursor
    ///
    /// The status is [`EnumStatus::Exhausted`] when fewer than `count`
    /// items remained; the returned items are still valid.
    pub fn next(&mut self, count: usize) -> (Vec<ItemIdChain>, EnumStatus) {
        let available = self.items.len() - self.cursor;
        let taken = count.min(available);
        let batch = self.items[self.cursor..self.cursor + taken].to_vec();
        self.cursor += taken;
        let status = if taken < count {
            EnumStatus::Exhausted
        } else {
            EnumStatus::Full
        };
        (batch, status)
    }

    /// Advances the cursor by up to `count` without yielding items
    pub fn skip(&mut self, count: usize) -> EnumStatus {
        let available = self.items.len() - self.cursor;
        if count > available {
            self.cursor = self.items.len();
            EnumStatus::Exhausted
        } else {
            self.cursor += count;
            EnumStatus::Full
        }
    }

    /// Rewinds the cursor to the first item
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Number of chains in the backing set, independent of the cursor
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the backing set is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of chains not yet yielded
    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }
}
