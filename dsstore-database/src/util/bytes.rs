/*!
 Helpers to display raw bytes.
*/

use std::fmt::Write;

/// Render bytes as `0x` followed by lowercase hex
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", to_hex_digits(bytes))
}

/// Render bytes as lowercase hex without a prefix
pub fn to_hex_digits(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    bytes.iter().for_each(|byte| {
        let _ = write!(out, "{byte:02x}");
    });
    out
}

/// Render bytes as a quoted string, escaping anything that is not printable ASCII
pub fn to_escaped(bytes: &[u8]) -> String {
    format!("\"{}\"", bytes.escape_ascii())
}

/// Read up to 8 little-endian bytes as an integer, padding short inputs with zeros
pub fn le_u64(bytes: &[u8]) -> Option<u64> {
    if bytes.len() > 8 {
        return None;
    }
    let mut padded = [0; 8];
    padded[..bytes.len()].copy_from_slice(bytes);
    Some(u64::from_le_bytes(padded))
}

#[cfg(test)]
mod tests {
    use crate::util::bytes::{le_u64, to_escaped, to_hex, to_hex_digits};

    #[test]
    fn can_hex() {
        assert_eq!(to_hex(&[0x00, 0x0f, 0xab]), "0x000fab");
        assert_eq!(to_hex(&[]), "0x");
        assert_eq!(to_hex_digits(&[0xff, 0x00]), "ff00");
    }

    #[test]
    fn can_escape() {
        assert_eq!(to_escaped(b"book\x00\x01"), "\"book\\x00\\x01\"");
    }

    #[test]
    fn can_read_little_endian() {
        assert_eq!(le_u64(&[0x01, 0x02]), Some(0x0201));
        assert_eq!(le_u64(&[0x01, 0, 0, 0, 0, 0, 0, 0x01]), Some(0x0100000000000001));
        assert_eq!(le_u64(&[0x01, 0x02, 0x03]), Some(0x030201));
        assert_eq!(le_u64(&[0; 9]), None);
    }
}
