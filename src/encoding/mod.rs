//! OCP.1 Primitive Encoding/Decoding Module
//!
//! This module converts typed AES70 property values to and from their OCP.1
//! wire representation. All multi-byte quantities are big-endian, per
//! AES70-3.
//!
//! # Overview
//!
//! The encoding module is responsible for:
//! - Converting primitive values (booleans, integers, floats, strings) to
//!   wire format and back
//! - The [`DataType`] tag set describing which wire format a property uses
//! - Checked narrowing from user-level values into narrower wire types
//!
//! Wire formats:
//!
//! | Data type         | Encoding                                          |
//! |-------------------|---------------------------------------------------|
//! | boolean           | 1 byte, `0x01` = true, `0x00` = false             |
//! | int8/uint8        | 1 byte                                            |
//! | int16/uint16      | 2 bytes, big-endian                               |
//! | int32/uint32      | 4 bytes, big-endian                               |
//! | int64/uint64      | 8 bytes, big-endian                               |
//! | float32/float64   | IEEE-754, big-endian                              |
//! | string            | 2-byte big-endian character count, then UTF-8     |
//!
//! # Example
//!
//! ```
//! use ocp1_rs::encoding::{DataType, OcaValue};
//!
//! let encoded = OcaValue::Float32(-6.0).encode().unwrap();
//! assert_eq!(encoded, vec![0xc0, 0xc0, 0x00, 0x00]);
//!
//! let decoded = OcaValue::decode(DataType::Float32, &encoded).unwrap();
//! assert_eq!(decoded, OcaValue::Float32(-6.0));
//! ```

#[cfg(feature = "std")]
use std::error::Error;

#[cfg(not(feature = "std"))]
use core::fmt;

#[cfg(feature = "std")]
use std::fmt;

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

/// Result type for encoding operations
#[cfg(feature = "std")]
pub type Result<T> = std::result::Result<T, EncodingError>;

#[cfg(not(feature = "std"))]
pub type Result<T> = core::result::Result<T, EncodingError>;

/// Errors that can occur during encoding/decoding operations
#[derive(Debug, Clone, PartialEq)]
pub enum EncodingError {
    /// Data type tag the codec cannot encode or decode
    UnsupportedType(u8),
    /// Value does not fit the target wire type
    ValueOutOfRange,
    /// Encoded data has the wrong length for its declared type
    InvalidLength,
    /// Unexpected end of data during decoding
    UnexpectedEndOfData,
    /// Invalid encoding format
    InvalidFormat(String),
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::UnsupportedType(tag) => write!(f, "Unsupported data type: {}", tag),
            EncodingError::ValueOutOfRange => write!(f, "Value out of range for wire type"),
            EncodingError::InvalidLength => write!(f, "Invalid length for declared data type"),
            EncodingError::UnexpectedEndOfData => write!(f, "Unexpected end of data"),
            EncodingError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl Error for EncodingError {}

/// OCP.1 data type tags.
///
/// The numbering matches the parameter-type identifiers used by OCP.1
/// tooling; `None` (0) marks a command that carries no parameter data and
/// is not itself encodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DataType {
    None = 0,
    Boolean = 1,
    Int8 = 2,
    Int16 = 3,
    Int32 = 4,
    Int64 = 5,
    UInt8 = 6,
    UInt16 = 7,
    UInt32 = 8,
    UInt64 = 9,
    Float32 = 10,
    Float64 = 11,
    String = 12,
}

impl DataType {
    /// Encoded width in bytes for fixed-width types, `None` for `String`
    /// and for the `None` tag.
    pub fn wire_size(&self) -> Option<usize> {
        match self {
            DataType::Boolean | DataType::Int8 | DataType::UInt8 => Some(1),
            DataType::Int16 | DataType::UInt16 => Some(2),
            DataType::Int32 | DataType::UInt32 | DataType::Float32 => Some(4),
            DataType::Int64 | DataType::UInt64 | DataType::Float64 => Some(8),
            DataType::String | DataType::None => None,
        }
    }

    /// AES70 name of the data type, for selection lists and display.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::None => "OcaNone",
            DataType::Boolean => "OcaBoolean",
            DataType::Int8 => "OcaInt8",
            DataType::Int16 => "OcaInt16",
            DataType::Int32 => "OcaInt32",
            DataType::Int64 => "OcaInt64",
            DataType::UInt8 => "OcaUint8",
            DataType::UInt16 => "OcaUint16",
            DataType::UInt32 => "OcaUint32",
            DataType::UInt64 => "OcaUint64",
            DataType::Float32 => "OcaFloat32",
            DataType::Float64 => "OcaFloat64",
            DataType::String => "OcaString",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u8> for DataType {
    type Error = EncodingError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(DataType::None),
            1 => Ok(DataType::Boolean),
            2 => Ok(DataType::Int8),
            3 => Ok(DataType::Int16),
            4 => Ok(DataType::Int32),
            5 => Ok(DataType::Int64),
            6 => Ok(DataType::UInt8),
            7 => Ok(DataType::UInt16),
            8 => Ok(DataType::UInt32),
            9 => Ok(DataType::UInt64),
            10 => Ok(DataType::Float32),
            11 => Ok(DataType::Float64),
            12 => Ok(DataType::String),
            other => Err(EncodingError::UnsupportedType(other)),
        }
    }
}

/// A typed AES70 property value.
///
/// One variant per encodable [`DataType`]. Values decode back to the
/// variant matching the data type they were encoded from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OcaValue {
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
}

impl OcaValue {
    /// The data type tag this value encodes as.
    pub fn data_type(&self) -> DataType {
        match self {
            OcaValue::Boolean(_) => DataType::Boolean,
            OcaValue::Int8(_) => DataType::Int8,
            OcaValue::Int16(_) => DataType::Int16,
            OcaValue::Int32(_) => DataType::Int32,
            OcaValue::Int64(_) => DataType::Int64,
            OcaValue::UInt8(_) => DataType::UInt8,
            OcaValue::UInt16(_) => DataType::UInt16,
            OcaValue::UInt32(_) => DataType::UInt32,
            OcaValue::UInt64(_) => DataType::UInt64,
            OcaValue::Float32(_) => DataType::Float32,
            OcaValue::Float64(_) => DataType::Float64,
            OcaValue::String(_) => DataType::String,
        }
    }

    /// Encode this value to its OCP.1 wire bytes.
    ///
    /// Strings whose character count exceeds the 16-bit length prefix are
    /// rejected with [`EncodingError::ValueOutOfRange`].
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        match self {
            OcaValue::Boolean(v) => encode_boolean(&mut buffer, *v),
            OcaValue::Int8(v) => encode_i8(&mut buffer, *v),
            OcaValue::Int16(v) => encode_i16(&mut buffer, *v),
            OcaValue::Int32(v) => encode_i32(&mut buffer, *v),
            OcaValue::Int64(v) => encode_i64(&mut buffer, *v),
            OcaValue::UInt8(v) => encode_u8(&mut buffer, *v),
            OcaValue::UInt16(v) => encode_u16(&mut buffer, *v),
            OcaValue::UInt32(v) => encode_u32(&mut buffer, *v),
            OcaValue::UInt64(v) => encode_u64(&mut buffer, *v),
            OcaValue::Float32(v) => encode_f32(&mut buffer, *v),
            OcaValue::Float64(v) => encode_f64(&mut buffer, *v),
            OcaValue::String(v) => encode_string(&mut buffer, v)?,
        }
        Ok(buffer)
    }

    /// Decode a value of the given data type from `data`.
    ///
    /// The whole slice must be consumed: fixed-width types require an exact
    /// width match and strings must account for every trailing byte.
    pub fn decode(data_type: DataType, data: &[u8]) -> Result<OcaValue> {
        match data_type {
            DataType::Boolean => Ok(OcaValue::Boolean(decode_boolean(data)?)),
            DataType::Int8 => Ok(OcaValue::Int8(decode_i8(data)?)),
            DataType::Int16 => Ok(OcaValue::Int16(decode_i16(data)?)),
            DataType::Int32 => Ok(OcaValue::Int32(decode_i32(data)?)),
            DataType::Int64 => Ok(OcaValue::Int64(decode_i64(data)?)),
            DataType::UInt8 => Ok(OcaValue::UInt8(decode_u8(data)?)),
            DataType::UInt16 => Ok(OcaValue::UInt16(decode_u16(data)?)),
            DataType::UInt32 => Ok(OcaValue::UInt32(decode_u32(data)?)),
            DataType::UInt64 => Ok(OcaValue::UInt64(decode_u64(data)?)),
            DataType::Float32 => Ok(OcaValue::Float32(decode_f32(data)?)),
            DataType::Float64 => Ok(OcaValue::Float64(decode_f64(data)?)),
            DataType::String => Ok(OcaValue::String(decode_string(data)?)),
            DataType::None => Err(EncodingError::UnsupportedType(DataType::None as u8)),
        }
    }

    /// Build a value of `data_type` from a signed user-level integer,
    /// rejecting values that do not fit the wire type.
    pub fn from_i64(data_type: DataType, value: i64) -> Result<OcaValue> {
        let out_of_range = |_| EncodingError::ValueOutOfRange;
        match data_type {
            DataType::Boolean => match value {
                0 => Ok(OcaValue::Boolean(false)),
                1 => Ok(OcaValue::Boolean(true)),
                _ => Err(EncodingError::ValueOutOfRange),
            },
            DataType::Int8 => Ok(OcaValue::Int8(i8::try_from(value).map_err(out_of_range)?)),
            DataType::Int16 => Ok(OcaValue::Int16(i16::try_from(value).map_err(out_of_range)?)),
            DataType::Int32 => Ok(OcaValue::Int32(i32::try_from(value).map_err(out_of_range)?)),
            DataType::Int64 => Ok(OcaValue::Int64(value)),
            DataType::UInt8 => Ok(OcaValue::UInt8(u8::try_from(value).map_err(out_of_range)?)),
            DataType::UInt16 => Ok(OcaValue::UInt16(u16::try_from(value).map_err(out_of_range)?)),
            DataType::UInt32 => Ok(OcaValue::UInt32(u32::try_from(value).map_err(out_of_range)?)),
            DataType::UInt64 => Ok(OcaValue::UInt64(u64::try_from(value).map_err(out_of_range)?)),
            DataType::Float32 => Ok(OcaValue::Float32(value as f32)),
            DataType::Float64 => Ok(OcaValue::Float64(value as f64)),
            other => Err(EncodingError::UnsupportedType(other as u8)),
        }
    }

    /// Build a value of `data_type` from a user-level float, rejecting
    /// values that overflow the wire type instead of saturating.
    pub fn from_f64(data_type: DataType, value: f64) -> Result<OcaValue> {
        match data_type {
            DataType::Float32 => {
                let narrowed = value as f32;
                if value.is_finite() && !narrowed.is_finite() {
                    return Err(EncodingError::ValueOutOfRange);
                }
                Ok(OcaValue::Float32(narrowed))
            }
            DataType::Float64 => Ok(OcaValue::Float64(value)),
            _ => {
                // Casting would saturate silently on huge values.
                if value.fract() != 0.0
                    || value < i64::MIN as f64
                    || value > i64::MAX as f64
                {
                    return Err(EncodingError::ValueOutOfRange);
                }
                Self::from_i64(data_type, value as i64)
            }
        }
    }

    /// Get the value as a display string
    pub fn as_display_string(&self) -> String {
        match self {
            OcaValue::Boolean(b) => {
                if *b {
                    "True".to_string()
                } else {
                    "False".to_string()
                }
            }
            OcaValue::Int8(v) => v.to_string(),
            OcaValue::Int16(v) => v.to_string(),
            OcaValue::Int32(v) => v.to_string(),
            OcaValue::Int64(v) => v.to_string(),
            OcaValue::UInt8(v) => v.to_string(),
            OcaValue::UInt16(v) => v.to_string(),
            OcaValue::UInt32(v) => v.to_string(),
            OcaValue::UInt64(v) => v.to_string(),
            OcaValue::Float32(v) => format!("{:.2}", v),
            OcaValue::Float64(v) => format!("{:.2}", v),
            OcaValue::String(s) => s.clone(),
        }
    }
}

/// Encode an OCP.1 boolean value
pub fn encode_boolean(buffer: &mut Vec<u8>, value: bool) {
    buffer.push(if value { 0x01 } else { 0x00 });
}

/// Decode an OCP.1 boolean value.
///
/// Only `0x00` and `0x01` are accepted; any other byte is a format error
/// rather than a silent truthiness coercion.
pub fn decode_boolean(data: &[u8]) -> Result<bool> {
    if data.len() != 1 {
        return Err(EncodingError::InvalidLength);
    }
    match data[0] {
        0x00 => Ok(false),
        0x01 => Ok(true),
        other => Err(EncodingError::InvalidFormat(format!(
            "invalid boolean byte 0x{:02x}",
            other
        ))),
    }
}

macro_rules! fixed_width_codec {
    ($encode:ident, $decode:ident, $ty:ty, $width:expr) => {
        #[doc = concat!("Encode an OCP.1 `", stringify!($ty), "` value, big-endian")]
        pub fn $encode(buffer: &mut Vec<u8>, value: $ty) {
            buffer.extend_from_slice(&value.to_be_bytes());
        }

        #[doc = concat!("Decode an OCP.1 `", stringify!($ty), "` value, big-endian")]
        pub fn $decode(data: &[u8]) -> Result<$ty> {
            let bytes: [u8; $width] = data.try_into().map_err(|_| {
                if data.len() < $width {
                    EncodingError::UnexpectedEndOfData
                } else {
                    EncodingError::InvalidLength
                }
            })?;
            Ok(<$ty>::from_be_bytes(bytes))
        }
    };
}

fixed_width_codec!(encode_i8, decode_i8, i8, 1);
fixed_width_codec!(encode_i16, decode_i16, i16, 2);
fixed_width_codec!(encode_i32, decode_i32, i32, 4);
fixed_width_codec!(encode_i64, decode_i64, i64, 8);
fixed_width_codec!(encode_u8, decode_u8, u8, 1);
fixed_width_codec!(encode_u16, decode_u16, u16, 2);
fixed_width_codec!(encode_u32, decode_u32, u32, 4);
fixed_width_codec!(encode_u64, decode_u64, u64, 8);
fixed_width_codec!(encode_f32, decode_f32, f32, 4);
fixed_width_codec!(encode_f64, decode_f64, f64, 8);

/// Encode an OCP.1 string: 2-byte big-endian character count followed by
/// the UTF-8 bytes, no terminator.
///
/// The prefix counts characters, not bytes, so multi-byte UTF-8 strings
/// carry a prefix smaller than their byte length.
pub fn encode_string(buffer: &mut Vec<u8>, value: &str) -> Result<()> {
    let char_count =
        u16::try_from(value.chars().count()).map_err(|_| EncodingError::ValueOutOfRange)?;
    encode_u16(buffer, char_count);
    buffer.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Decode an OCP.1 string, consuming the whole slice.
///
/// The character count in the prefix must match the decoded UTF-8 text.
pub fn decode_string(data: &[u8]) -> Result<String> {
    if data.len() < 2 {
        return Err(EncodingError::UnexpectedEndOfData);
    }
    let char_count = decode_u16(&data[..2])? as usize;
    let text = core::str::from_utf8(&data[2..])
        .map_err(|_| EncodingError::InvalidFormat("invalid UTF-8 string data".to_string()))?;
    if text.chars().count() != char_count {
        return Err(EncodingError::InvalidLength);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_wire_bytes() {
        assert_eq!(OcaValue::Boolean(true).encode().unwrap(), vec![0x01]);
        assert_eq!(OcaValue::Boolean(false).encode().unwrap(), vec![0x00]);
    }

    #[test]
    fn test_boolean_decode_rejects_other_bytes() {
        assert!(matches!(
            decode_boolean(&[0x02]),
            Err(EncodingError::InvalidFormat(_))
        ));
        assert_eq!(decode_boolean(&[]), Err(EncodingError::InvalidLength));
    }

    #[test]
    fn test_integer_big_endian() {
        assert_eq!(
            OcaValue::UInt16(0x1234).encode().unwrap(),
            vec![0x12, 0x34]
        );
        assert_eq!(
            OcaValue::UInt32(0xDEADBEEF).encode().unwrap(),
            vec![0xDE, 0xAD, 0xBE, 0xEF]
        );
        assert_eq!(
            OcaValue::Int16(-1).encode().unwrap(),
            vec![0xFF, 0xFF]
        );
        assert_eq!(
            OcaValue::Int64(i64::MIN).encode().unwrap(),
            vec![0x80, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_float_big_endian() {
        // -6.0f32 = 0xC0C00000
        assert_eq!(
            OcaValue::Float32(-6.0).encode().unwrap(),
            vec![0xC0, 0xC0, 0x00, 0x00]
        );
        assert_eq!(
            OcaValue::Float64(1.0).encode().unwrap(),
            vec![0x3F, 0xF0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_string_char_count_prefix() {
        let encoded = OcaValue::String("Mute".to_string()).encode().unwrap();
        assert_eq!(encoded, vec![0x00, 0x04, b'M', b'u', b't', b'e']);

        // Three characters, four UTF-8 bytes.
        let encoded = OcaValue::String("dB\u{00B5}".to_string()).encode().unwrap();
        assert_eq!(encoded[..2], [0x00, 0x03]);
        assert_eq!(encoded.len(), 2 + 4);
    }

    #[test]
    fn test_empty_string() {
        let encoded = OcaValue::String(String::new()).encode().unwrap();
        assert_eq!(encoded, vec![0x00, 0x00]);
        assert_eq!(
            OcaValue::decode(DataType::String, &encoded).unwrap(),
            OcaValue::String(String::new())
        );
    }

    #[test]
    fn test_round_trip_boundary_values() {
        let samples = [
            OcaValue::Boolean(true),
            OcaValue::Int8(i8::MIN),
            OcaValue::Int8(i8::MAX),
            OcaValue::Int16(0),
            OcaValue::Int32(i32::MIN),
            OcaValue::Int64(i64::MAX),
            OcaValue::UInt8(u8::MAX),
            OcaValue::UInt16(u16::MAX),
            OcaValue::UInt32(0),
            OcaValue::UInt64(u64::MAX),
            OcaValue::Float32(f32::MIN_POSITIVE),
            OcaValue::Float64(-0.0),
            OcaValue::String(String::new()),
            OcaValue::String("g\u{00FC}ltig \u{2713}".to_string()),
        ];
        for value in samples {
            let encoded = value.encode().unwrap();
            let decoded = OcaValue::decode(value.data_type(), &encoded).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_decode_wrong_width() {
        assert_eq!(
            OcaValue::decode(DataType::UInt32, &[0x00, 0x01]),
            Err(EncodingError::UnexpectedEndOfData)
        );
        assert_eq!(
            OcaValue::decode(DataType::UInt8, &[0x00, 0x01]),
            Err(EncodingError::InvalidLength)
        );
    }

    #[test]
    fn test_decode_string_count_mismatch() {
        // Prefix says 5 characters but only 4 follow.
        let data = [0x00, 0x05, b'a', b'b', b'c', b'd'];
        assert_eq!(
            decode_string(&data),
            Err(EncodingError::InvalidLength)
        );
    }

    #[test]
    fn test_decode_string_invalid_utf8() {
        let data = [0x00, 0x01, 0xFF];
        assert!(matches!(
            decode_string(&data),
            Err(EncodingError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_unsupported_type_tag() {
        assert_eq!(
            DataType::try_from(14),
            Err(EncodingError::UnsupportedType(14))
        );
        assert_eq!(
            OcaValue::decode(DataType::None, &[]),
            Err(EncodingError::UnsupportedType(0))
        );
    }

    #[test]
    fn test_from_i64_rejects_overflow() {
        assert_eq!(
            OcaValue::from_i64(DataType::UInt8, 256),
            Err(EncodingError::ValueOutOfRange)
        );
        assert_eq!(
            OcaValue::from_i64(DataType::Int16, -40000),
            Err(EncodingError::ValueOutOfRange)
        );
        assert_eq!(
            OcaValue::from_i64(DataType::UInt16, -1),
            Err(EncodingError::ValueOutOfRange)
        );
        assert_eq!(
            OcaValue::from_i64(DataType::UInt8, 255).unwrap(),
            OcaValue::UInt8(255)
        );
    }

    #[test]
    fn test_from_f64_narrowing() {
        assert_eq!(
            OcaValue::from_f64(DataType::Float32, 1e300),
            Err(EncodingError::ValueOutOfRange)
        );
        assert_eq!(
            OcaValue::from_f64(DataType::Int32, 1.5),
            Err(EncodingError::ValueOutOfRange)
        );
        assert_eq!(
            OcaValue::from_f64(DataType::Int32, -12.0).unwrap(),
            OcaValue::Int32(-12)
        );
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(OcaValue::Boolean(true).as_display_string(), "True");
        assert_eq!(OcaValue::Float32(-6.0).as_display_string(), "-6.00");
        assert_eq!(DataType::Float32.to_string(), "OcaFloat32");
    }

    mod round_trip_properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_value() -> impl Strategy<Value = OcaValue> {
            prop_oneof![
                any::<bool>().prop_map(OcaValue::Boolean),
                any::<i8>().prop_map(OcaValue::Int8),
                any::<i16>().prop_map(OcaValue::Int16),
                any::<i32>().prop_map(OcaValue::Int32),
                any::<i64>().prop_map(OcaValue::Int64),
                any::<u8>().prop_map(OcaValue::UInt8),
                any::<u16>().prop_map(OcaValue::UInt16),
                any::<u32>().prop_map(OcaValue::UInt32),
                any::<u64>().prop_map(OcaValue::UInt64),
                any::<f32>().prop_map(OcaValue::Float32),
                any::<f64>().prop_map(OcaValue::Float64),
                "\\PC{0,64}".prop_map(OcaValue::String),
            ]
        }

        proptest! {
            #[test]
            fn encode_decode_round_trip(value in arb_value()) {
                let encoded = value.encode().unwrap();
                let decoded = OcaValue::decode(value.data_type(), &encoded).unwrap();
                // NaN != NaN, so compare the re-encoded bytes instead.
                prop_assert_eq!(decoded.encode().unwrap(), encoded);
            }

            #[test]
            fn fixed_width_matches_declared_size(value in arb_value()) {
                if let Some(size) = value.data_type().wire_size() {
                    prop_assert_eq!(value.encode().unwrap().len(), size);
                }
            }
        }
    }
}
