//! Path resolution between chains and provider path strings
//!
//! Providers speak `\`-delimited path strings rooted at a single leading
//! `\`; the host shell speaks item-id chains. This module maps between the
//! two. The host-namespace prefix ("this computer", the drive root entry)
//! is stripped by an explicit `host_prefix_len` argument so the resolver
//! carries no hidden global state.

use crate::chain::{ChainError, ItemIdChain, ItemKind, Segment};
use drive_types::DriveId;

/// Path resolver
///
/// Stateless; all operations are associated functions.
pub struct PathResolver;

impl PathResolver {
    /// Converts a chain into the path string a provider expects
    ///
    /// Drops `host_prefix_len` leading segments, then joins the remaining
    /// names with `\` under a single leading `\`. Every retained segment is
    /// re-validated: chains handed in from outside the decode path may have
    /// been corrupted, and a bad name must fail here rather than reach the
    /// provider.
    ///
    /// # Examples
    ///
    /// ```
    /// use item_chain::{ItemIdChain, ItemKind, PathResolver, Segment};
    ///
    /// let chain = ItemIdChain::from_segments(vec![
    ///     Segment::new(ItemKind::Folder, "A").unwrap(),
    ///     Segment::new(ItemKind::File, "c.txt").unwrap(),
    /// ]);
    /// let path = PathResolver::chain_to_provider_path(&chain, 0).unwrap();
    /// assert_eq!(path, "\\A\\c.txt");
    /// ```
    pub fn chain_to_provider_path(
        chain: &ItemIdChain,
        host_prefix_len: usize,
    ) -> Result<String, ChainError> {
        let suffix = chain.skip_prefix(host_prefix_len)?;

        let mut path = String::from("\\");
        for segment in suffix.segments() {
            segment.validate()?;
            if path.len() > 1 {
                path.push('\\');
            }
            path.push_str(&segment.name);
        }
        Ok(path)
    }

    /// Returns the leaf segment's name, for UI display
    ///
    /// Distinct from the full provider path: the shell shows one item at a
    /// time and only ever needs the last component.
    pub fn display_string(chain: &ItemIdChain) -> Result<String, ChainError> {
        let leaf = chain.last().ok_or_else(|| {
            ChainError::InvalidArgument("root chain has no display name".to_string())
        })?;
        leaf.validate()?;
        Ok(leaf.name.clone())
    }

    /// Parses display-name text into a chain
    ///
    /// Splits on `\` and discards a single leading empty component (from a
    /// leading separator). Every component becomes a Folder segment except
    /// the last, whose kind the caller supplies from context: the parser
    /// cannot know whether `Reports\Q1` names a folder or a file.
    pub fn parse_display_name(text: &str, leaf_kind: ItemKind) -> Result<ItemIdChain, ChainError> {
        if text.is_empty() {
            return Err(ChainError::InvalidArgument(
                "empty display name".to_string(),
            ));
        }

        let trimmed = text.strip_prefix('\\').unwrap_or(text);
        let components: Vec<&str> = trimmed.split('\\').collect();

        let mut segments = Vec::with_capacity(components.len());
        for (index, component) in components.iter().enumerate() {
            if component.is_empty() {
                return Err(ChainError::Malformed(
                    "display name contains an empty component".to_string(),
                ));
            }
            let kind = if index == components.len() - 1 {
                leaf_kind
            } else {
                ItemKind::Folder
            };
            segments.push(Segment::new(kind, *component)?);
        }

        Ok(ItemIdChain::from_segments(segments))
    }

    /// Renders a chain for diagnostics, prefixed with its drive identity
    ///
    /// Infallible: invalid segments render as `<invalid>` so a corrupted
    /// chain can still be described in an error report.
    pub fn logging_path(drive: DriveId, chain: &ItemIdChain) -> String {
        let mut path = format!("\\\\{}", drive);
        if chain.is_empty() {
            path.push('\\');
            return path;
        }
        for segment in chain.segments() {
            path.push('\\');
            if segment.is_valid() {
                path.push_str(&segment.name);
            } else {
                path.push_str("<invalid>");
            }
        }
        path
    }
}
