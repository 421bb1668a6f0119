//! UTF-8 decoding for text layout
//!
//! Handles 1, 2 and 3 byte sequences only, so codepoints stop at U+FFFF.
//! Continuation bytes are taken by position and their high bits are not
//! checked. A NUL byte terminates the text like a C string.

use crate::core::MalformedUtf8Policy;

/// Decode the codepoint at the head of `bytes`.
///
/// Returns the codepoint and the bytes after it, or `None` at the end of
/// the text (empty input or a NUL) and on a sequence that cannot be
/// decoded: a 4-byte lead, a stray continuation byte, or a multibyte
/// sequence cut short.
pub fn next_codepoint(bytes: &[u8]) -> Option<(u32, &[u8])> {
    let (&lead, rest) = bytes.split_first()?;
    match lead {
        0 => None,
        0x01..=0x7F => Some((u32::from(lead), rest)),
        0xC0..=0xDF => {
            let &[b1, ..] = rest else { return None };
            if b1 == 0 {
                return None;
            }
            let cp = (u32::from(lead & 0x1F) << 6) | u32::from(b1 & 0x3F);
            Some((cp, &rest[1..]))
        }
        0xE0..=0xEF => {
            let &[b1, b2, ..] = rest else { return None };
            if b1 == 0 || b2 == 0 {
                return None;
            }
            let cp = (u32::from(lead & 0x0F) << 12) | (u32::from(b1 & 0x3F) << 6) | u32::from(b2 & 0x3F);
            Some((cp, &rest[2..]))
        }
        _ => None,
    }
}

/// Iterator over the codepoints of a byte string
#[derive(Debug, Clone)]
pub struct Codepoints<'t> {
    remaining: &'t [u8],
    policy: MalformedUtf8Policy,
}

impl<'t> Codepoints<'t> {
    /// Decode `text` with the given malformed-input policy
    pub fn new(text: &'t [u8], policy: MalformedUtf8Policy) -> Self {
        Self { remaining: text, policy }
    }

    /// Bytes not yet decoded
    pub fn remaining(&self) -> &'t [u8] {
        self.remaining
    }
}

impl Iterator for Codepoints<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            if let Some((cp, rest)) = next_codepoint(self.remaining) {
                self.remaining = rest;
                return Some(cp);
            }

            match (self.policy, self.remaining.first()) {
                (MalformedUtf8Policy::Resync, Some(&byte)) if byte != 0 => {
                    log::trace!("Skipping undecodable byte {byte:#04x}");
                    self.remaining = &self.remaining[1..];
                }
                (_, first) => {
                    if matches!(first, Some(&byte) if byte != 0) {
                        log::debug!("Malformed UTF-8; dropping {} trailing bytes", self.remaining.len());
                    }
                    self.remaining = &[];
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &[u8], policy: MalformedUtf8Policy) -> Vec<u32> {
        Codepoints::new(text, policy).collect()
    }

    #[test]
    fn test_ascii() {
        assert_eq!(next_codepoint(b"Ab"), Some((0x41, &b"b"[..])));
        assert_eq!(decode(b"Hi!", MalformedUtf8Policy::Truncate), vec![0x48, 0x69, 0x21]);
    }

    #[test]
    fn test_two_byte_sequence() {
        assert_eq!(next_codepoint(&[0xC3, 0xA4]), Some((0xE4, &[][..])));
    }

    #[test]
    fn test_three_byte_sequence() {
        // U+20AC EURO SIGN
        assert_eq!(next_codepoint(&[0xE2, 0x82, 0xAC, b'x']), Some((0x20AC, &b"x"[..])));
        assert_eq!(decode("€ä".as_bytes(), MalformedUtf8Policy::Truncate), vec![0x20AC, 0xE4]);
    }

    #[test]
    fn test_end_of_text() {
        assert_eq!(next_codepoint(b""), None);
        assert_eq!(next_codepoint(b"\0abc"), None);
        assert_eq!(decode(b"ab\0cd", MalformedUtf8Policy::Resync), vec![0x61, 0x62]);
    }

    #[test]
    fn test_unsupported_leads() {
        assert_eq!(next_codepoint(&[0xFF]), None);
        assert_eq!(next_codepoint(&[0x80, 0x41]), None);
        // four-byte sequence
        assert_eq!(next_codepoint("😀".as_bytes()), None);
    }

    #[test]
    fn test_cut_short_sequences() {
        assert_eq!(next_codepoint(&[0xC3]), None);
        assert_eq!(next_codepoint(&[0xE2, 0x82]), None);
        assert_eq!(next_codepoint(&[0xC3, 0x00]), None);
    }

    #[test]
    fn test_truncate_stops_at_malformed_byte() {
        assert_eq!(decode(&[b'A', 0xFF, b'B'], MalformedUtf8Policy::Truncate), vec![0x41]);
    }

    #[test]
    fn test_resync_skips_malformed_byte() {
        assert_eq!(decode(&[b'A', 0xFF, b'B'], MalformedUtf8Policy::Resync), vec![0x41, 0x42]);
        assert_eq!(decode(&[0xF0, 0x9F, b'C'], MalformedUtf8Policy::Resync), vec![0x43]);
    }

    #[test]
    fn test_iterator_is_fused_after_truncation() {
        let mut codepoints = Codepoints::new(&[0xFF, b'A'], MalformedUtf8Policy::Truncate);
        assert_eq!(codepoints.next(), None);
        assert_eq!(codepoints.next(), None);
        assert!(codepoints.remaining().is_empty());
    }
}
