//! Binary wire codec for item-id chains
//!
//! One segment on the wire, little-endian:
//!
//! ```text
//! u16  total_size   // 2 (this field) + 4 (kind) + (chars + 1) * 2
//! u32  kind         // 1 = File, 2 = Folder
//! utf16le name      // NUL-terminated
//! ```
//!
//! A chain is a back-to-back sequence of such records terminated by a
//! single `u16` zero. All parsing goes through [`ByteCursor`], which
//! validates every length field against the remaining buffer before any
//! read; untrusted size fields can never cause a read past the end.

use crate::chain::{ChainError, ItemIdChain, ItemKind, Segment};

/// Bytes occupied by the size and kind fields of one segment
pub const SEGMENT_HEADER_LEN: usize = 2 + 4;

/// Maximum name length in UTF-16 units
///
/// The segment size is a `u16` that covers the header, the name, and the
/// NUL terminator.
pub const MAX_NAME_UTF16_LEN: usize = (u16::MAX as usize - SEGMENT_HEADER_LEN) / 2 - 1;

/// A bounds-checked reader over a byte buffer
///
/// Every read checks the remaining length first and reports [`ChainError::
/// Truncated`] instead of reading out of bounds.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at the start of `buf`
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Creates a cursor at `offset` into `buf`
    pub fn at(buf: &'a [u8], offset: usize) -> Result<Self, ChainError> {
        if offset > buf.len() {
            return Err(ChainError::Truncated);
        }
        Ok(Self { buf, pos: offset })
    }

    /// Returns the current byte offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Reads a little-endian `u16`
    pub fn read_u16(&mut self) -> Result<u16, ChainError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a little-endian `u32`
    pub fn read_u32(&mut self) -> Result<u32, ChainError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Consumes and returns the next `n` bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], ChainError> {
        if self.remaining() < n {
            return Err(ChainError::Truncated);
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }
}

/// Encodes one segment onto the end of `out`
///
/// Fails with [`ChainError::Encoding`] if the segment violates the name
/// invariants or the encoded name would overflow the 16-bit size field.
pub fn encode_segment(segment: &Segment, out: &mut Vec<u8>) -> Result<(), ChainError> {
    segment
        .validate()
        .map_err(|e| ChainError::Encoding(e.to_string()))?;

    let units: Vec<u16> = segment.name.encode_utf16().collect();
    if units.len() > MAX_NAME_UTF16_LEN {
        return Err(ChainError::Encoding(format!(
            "name of {} UTF-16 units exceeds the maximum of {}",
            units.len(),
            MAX_NAME_UTF16_LEN
        )));
    }

    let total_size = SEGMENT_HEADER_LEN + (units.len() + 1) * 2;
    out.extend_from_slice(&(total_size as u16).to_le_bytes());
    out.extend_from_slice(&segment.kind.wire_value().to_le_bytes());
    for unit in &units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out.extend_from_slice(&0u16.to_le_bytes());
    Ok(())
}

/// Encodes a full chain, including the zero terminator
pub fn encode_chain(chain: &ItemIdChain) -> Result<Vec<u8>, ChainError> {
    let mut out = Vec::new();
    for segment in chain.segments() {
        encode_segment(segment, &mut out)?;
    }
    out.extend_from_slice(&0u16.to_le_bytes());
    Ok(out)
}

/// Decodes one segment at the cursor position
///
/// The cursor must be positioned at a segment's size field. On success the
/// cursor advances to the start of the next record.
pub fn decode_segment(cursor: &mut ByteCursor<'_>) -> Result<Segment, ChainError> {
    let total_size = cursor.read_u16()? as usize;

    // Smallest valid segment: header plus a one-unit name and its NUL.
    if total_size < SEGMENT_HEADER_LEN + 2 * 2 {
        return Err(ChainError::Malformed(format!(
            "segment size {} is smaller than the minimum record",
            total_size
        )));
    }
    if cursor.remaining() < total_size - 2 {
        return Err(ChainError::Truncated);
    }

    let kind_value = cursor.read_u32()?;
    let kind = ItemKind::from_wire(kind_value)
        .ok_or_else(|| ChainError::Malformed(format!("unrecognized item kind {}", kind_value)))?;

    let name_bytes = cursor.take(total_size - SEGMENT_HEADER_LEN)?;
    if name_bytes.len() % 2 != 0 {
        return Err(ChainError::Malformed(
            "name region is not a whole number of UTF-16 units".to_string(),
        ));
    }

    let units: Vec<u16> = name_bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let nul = units
        .iter()
        .position(|&u| u == 0)
        .ok_or_else(|| ChainError::Malformed("name is not NUL-terminated".to_string()))?;
    if nul == 0 {
        return Err(ChainError::Malformed("segment name is empty".to_string()));
    }

    let name = String::from_utf16(&units[..nul])
        .map_err(|_| ChainError::Malformed("name is not valid UTF-16".to_string()))?;

    Segment::new(kind, name).map_err(|e| ChainError::Malformed(e.to_string()))
}

/// Decodes one segment at `offset`, returning it with the next offset
///
/// Decoding is a pure function of the bytes: applying this twice at the
/// same offset yields identical results.
pub fn decode_segment_at(bytes: &[u8], offset: usize) -> Result<(Segment, usize), ChainError> {
    let mut cursor = ByteCursor::at(bytes, offset)?;
    let segment = decode_segment(&mut cursor)?;
    Ok((segment, cursor.position()))
}

/// Decodes a full chain from `bytes`
///
/// Segments are decoded until the `u16` zero terminator. A buffer holding
/// only the terminator decodes to the empty (root) chain. If the terminator
/// is never reached the chain is [`ChainError::Truncated`].
pub fn decode_chain(bytes: &[u8]) -> Result<ItemIdChain, ChainError> {
    let mut cursor = ByteCursor::new(bytes);
    let mut segments = Vec::new();

    loop {
        if cursor.remaining() < 2 {
            return Err(ChainError::Truncated);
        }
        // Peek at the size field; zero marks the end of the chain.
        let peek = cursor.clone().read_u16()?;
        if peek == 0 {
            return Ok(ItemIdChain::from_segments(segments));
        }
        segments.push(decode_segment(&mut cursor)?);
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Encodes a chain as uppercase hex over the wire bytes
///
/// Used to move chains through string-only channels (persisted navigation
/// state, command arguments) without loosening the binary format.
pub fn encode_hex(chain: &ItemIdChain) -> Result<String, ChainError> {
    let bytes = encode_chain(chain)?;
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        out.push(HEX_DIGITS[(byte & 0x0F) as usize] as char);
    }
    Ok(out)
}

/// Decodes a chain from its hex transport form
///
/// Accepts both upper- and lowercase digits. An odd-length string or a
/// non-hex character is [`ChainError::Malformed`].
pub fn decode_hex(text: &str) -> Result<ItemIdChain, ChainError> {
    if text.len() % 2 != 0 {
        return Err(ChainError::Malformed(
            "hex chain has an odd number of digits".to_string(),
        ));
    }

    fn nibble(c: u8) -> Result<u8, ChainError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            _ => Err(ChainError::Malformed(format!(
                "invalid hex digit {:?}",
                c as char
            ))),
        }
    }

    let raw = text.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len() / 2);
    for pair in raw.chunks_exact(2) {
        bytes.push((nibble(pair[0])? << 4) | nibble(pair[1])?);
    }
    decode_chain(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(name: &str) -> Segment {
        Segment::new(ItemKind::Folder, name).unwrap()
    }

    fn file(name: &str) -> Segment {
        Segment::new(ItemKind::File, name).unwrap()
    }

    #[test]
    fn test_segment_wire_layout() {
        let mut bytes = Vec::new();
        encode_segment(&file("ab"), &mut bytes).unwrap();

        // total_size = 2 + 4 + (2 + 1) * 2 = 12
        assert_eq!(bytes.len(), 12);
        assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), 12);
        assert_eq!(
            u32::from_le_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]),
            1
        );
        assert_eq!(u16::from_le_bytes([bytes[6], bytes[7]]), 'a' as u16);
        assert_eq!(u16::from_le_bytes([bytes[10], bytes[11]]), 0);
    }

    #[test]
    fn test_chain_roundtrip() {
        let chain = ItemIdChain::from_segments(vec![
            folder("Reports"),
            folder("2024"),
            file("Q1.txt"),
        ]);
        let bytes = encode_chain(&chain).unwrap();
        let decoded = decode_chain(&bytes).unwrap();
        assert_eq!(decoded, chain);
    }

    #[test]
    fn test_empty_chain_roundtrip() {
        let bytes = encode_chain(&ItemIdChain::empty()).unwrap();
        assert_eq!(bytes, vec![0, 0]);
        let decoded = decode_chain(&bytes).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_terminator_only_buffer_is_empty_chain() {
        let decoded = decode_chain(&[0u8, 0u8]).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_is_idempotent_at_offset() {
        let chain = ItemIdChain::from_segments(vec![folder("A"), file("b.txt")]);
        let bytes = encode_chain(&chain).unwrap();

        let (first, next) = decode_segment_at(&bytes, 0).unwrap();
        let (again, next_again) = decode_segment_at(&bytes, 0).unwrap();
        assert_eq!(first, again);
        assert_eq!(next, next_again);

        let (second, _) = decode_segment_at(&bytes, next).unwrap();
        assert_eq!(second.name, "b.txt");
    }

    #[test]
    fn test_unicode_name_roundtrip() {
        let chain = ItemIdChain::from_segments(vec![file("r\u{00e9}sum\u{00e9} \u{1F4C1}.txt")]);
        let bytes = encode_chain(&chain).unwrap();
        assert_eq!(decode_chain(&bytes).unwrap(), chain);
    }

    #[test]
    fn test_encode_rejects_empty_name() {
        let bad = Segment {
            kind: ItemKind::File,
            name: String::new(),
        };
        let mut out = Vec::new();
        assert!(matches!(
            encode_segment(&bad, &mut out),
            Err(ChainError::Encoding(_))
        ));
    }

    #[test]
    fn test_encode_rejects_oversized_name() {
        let bad = Segment {
            kind: ItemKind::File,
            name: "x".repeat(MAX_NAME_UTF16_LEN + 1),
        };
        let mut out = Vec::new();
        assert!(matches!(
            encode_segment(&bad, &mut out),
            Err(ChainError::Encoding(_))
        ));
    }

    #[test]
    fn test_encode_accepts_maximum_name() {
        let segment = Segment::new(ItemKind::File, "x".repeat(MAX_NAME_UTF16_LEN)).unwrap();
        let mut out = Vec::new();
        encode_segment(&segment, &mut out).unwrap();

        // Name bytes come in UTF-16 pairs, so the largest record is one
        // byte short of the u16 ceiling: 6 + (32763 + 1) * 2 = 65534.
        assert_eq!(out.len(), u16::MAX as usize - 1);

        let (decoded, consumed) = decode_segment_at(&out, 0).unwrap();
        assert_eq!(decoded, segment);
        assert_eq!(consumed, out.len());
    }

    #[test]
    fn test_decode_rejects_undersized_record() {
        // total_size of 6 leaves no room for even a one-char name.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&6u16.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        assert!(matches!(
            decode_chain(&bytes),
            Err(ChainError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_kind() {
        let mut bytes = Vec::new();
        encode_segment(&file("a"), &mut bytes).unwrap();
        // Corrupt the kind field.
        bytes[2..6].copy_from_slice(&7u32.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        assert!(matches!(
            decode_chain(&bytes),
            Err(ChainError::Malformed(_))
        ));
    }

    #[test]
    fn test_declared_size_past_buffer_is_truncated() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&200u16.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&('a' as u16).to_le_bytes());
        assert_eq!(decode_chain(&bytes), Err(ChainError::Truncated));
    }

    #[test]
    fn test_missing_terminator_is_truncated() {
        let mut bytes = Vec::new();
        encode_segment(&file("a"), &mut bytes).unwrap();
        // No trailing zero terminator.
        assert_eq!(decode_chain(&bytes), Err(ChainError::Truncated));
    }

    #[test]
    fn test_empty_buffer_is_truncated() {
        assert_eq!(decode_chain(&[]), Err(ChainError::Truncated));
        assert_eq!(decode_chain(&[0u8]), Err(ChainError::Truncated));
    }

    #[test]
    fn test_name_without_nul_is_malformed() {
        // Record sized for two units, both non-zero.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&10u16.to_le_bytes());
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&('a' as u16).to_le_bytes());
        bytes.extend_from_slice(&('b' as u16).to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        assert!(matches!(
            decode_chain(&bytes),
            Err(ChainError::Malformed(_))
        ));
    }

    #[test]
    fn test_nul_as_first_character_is_malformed() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&10u16.to_le_bytes());
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&('a' as u16).to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        assert!(matches!(
            decode_chain(&bytes),
            Err(ChainError::Malformed(_))
        ));
    }

    #[test]
    fn test_hex_roundtrip() {
        let chain = ItemIdChain::from_segments(vec![folder("Docs"), file("a.txt")]);
        let hex = encode_hex(&chain).unwrap();
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(decode_hex(&hex).unwrap(), chain);
        // Lowercase transport is accepted too.
        assert_eq!(decode_hex(&hex.to_lowercase()).unwrap(), chain);
    }

    #[test]
    fn test_hex_rejects_bad_input() {
        assert!(matches!(decode_hex("ABC"), Err(ChainError::Malformed(_))));
        assert!(matches!(decode_hex("ZZZZ"), Err(ChainError::Malformed(_))));
    }
}
