//! Utility Functions Module
//!
//! This module provides common helpers used throughout the OCP.1 codec and
//! by tools built on top of it. The main customers are message-inspection
//! frontends: every OCP.1 buffer this crate produces is ultimately shown to
//! a human as a hex string, and received strings travel the other way.
//!
//! # Overview
//!
//! Utilities provided include:
//! - Hex string rendering and parsing for OCP.1 buffers
//! - Annotated hex dumps for debugging
//! - The [`generate_wire_enum`](crate::generate_wire_enum) macro used for
//!   wire-level enumerations
//!
//! # Example
//!
//! ```
//! use ocp1_rs::util::{to_hex_string, from_hex_string};
//!
//! let data = [0x3b, 0x00, 0x01];
//! assert_eq!(to_hex_string(&data), "3b0001");
//! assert_eq!(from_hex_string("3b 00 01").unwrap(), data);
//! ```

pub mod enum_macros;

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};

/// Render a byte buffer as a lowercase hex string without separators.
///
/// This is the canonical display form for generated OCP.1 messages.
pub fn to_hex_string(data: &[u8]) -> String {
    hex::encode(data)
}

/// Parse a hex string into a byte buffer.
///
/// Whitespace between byte pairs is accepted, so strings copied out of
/// wireshark-style displays ("3b 00 01 ...") parse as-is.
pub fn from_hex_string(s: &str) -> core::result::Result<Vec<u8>, hex::FromHexError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact)
}

/// Hex dump utility for debugging
pub fn hex_dump(data: &[u8], prefix: &str) -> String {
    let mut result = String::new();

    for (i, chunk) in data.chunks(16).enumerate() {
        result.push_str(prefix);
        result.push_str(&format!("{:04X}: ", i * 16));

        // Hex bytes
        for (j, byte) in chunk.iter().enumerate() {
            if j == 8 {
                result.push(' ');
            }
            result.push_str(&format!("{:02X} ", byte));
        }

        // Padding
        for j in chunk.len()..16 {
            if j == 8 {
                result.push(' ');
            }
            result.push_str("   ");
        }

        result.push_str(" |");

        // ASCII representation
        for byte in chunk {
            if byte.is_ascii_graphic() || *byte == b' ' {
                result.push(*byte as char);
            } else {
                result.push('.');
            }
        }

        result.push_str("|\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_string_round_trip() {
        let data = vec![0x3b, 0x00, 0x01, 0xff, 0x80];
        let s = to_hex_string(&data);
        assert_eq!(s, "3b0001ff80");
        assert_eq!(from_hex_string(&s).unwrap(), data);
    }

    #[test]
    fn test_from_hex_string_with_separators() {
        assert_eq!(
            from_hex_string("3b 00 01\tff  80").unwrap(),
            vec![0x3b, 0x00, 0x01, 0xff, 0x80]
        );
    }

    #[test]
    fn test_from_hex_string_rejects_garbage() {
        assert!(from_hex_string("3b zz").is_err());
        assert!(from_hex_string("3b0").is_err());
    }

    #[test]
    fn test_hex_dump_format() {
        let data: Vec<u8> = (0..20).collect();
        let dump = hex_dump(&data, "  ");
        assert!(dump.starts_with("  0000: "));
        assert!(dump.contains("0010: "));
        assert!(dump.ends_with("|\n"));
    }

    #[test]
    fn test_hex_dump_empty() {
        assert_eq!(hex_dump(&[], ""), "");
    }
}
