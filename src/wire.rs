//! Wire format primitives for Google's Protocol Buffers, aka [protobuf](https://protobuf.dev).
//!
//! Only the decoding half lives here; generated descriptor sets are handed to
//! the caller as values and never serialized by this crate.

use bytes::Buf;

use crate::error::DecodeError;

/// Maximum size for a single length-delimited value (64MB).
const MAX_MESSAGE_SIZE: u64 = 64 * 1024 * 1024;

/// Denotes the type of a field in an encoded protobuf message.
///
/// Protobuf messages are a series of key-value pairs. When encoded each key-value pair
/// is turned into a record consisting of a field number, a [`WireType`], and a payload.
/// The [`WireType`] indicates how large the proceeding payload is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum WireType {
    /// Variable length integer.
    ///
    /// Used for: `int32`, `int64`, `uint32`, `uint64`, `sint32`, `sint64`, `bool`, `enum`.
    Varint = 0,
    /// 64-bit integer.
    ///
    /// Used for: `fixed64`, `sfixed64`, `double`.
    I64 = 1,
    /// Variable length field.
    ///
    /// Used for: `string`, `bytes`, `message`, packed `repeated` fields.
    Len = 2,
    /// Group start (deprecated).
    SGroup = 3,
    /// Group end (deprecated).
    EGroup = 4,
    /// 32-bit integer.
    ///
    /// Used for: `fixed32`, `sfixed32`, `float`.
    I32 = 5,
}

static_assertions::assert_eq_size!(WireType, u8);

impl TryFrom<u8> for WireType {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::I64),
            2 => Ok(WireType::Len),
            3 => Ok(WireType::SGroup),
            4 => Ok(WireType::EGroup),
            5 => Ok(WireType::I32),
            other => Err(DecodeError::InvalidWireType(other)),
        }
    }
}

/// Decodes the key from a protobuf encoded message.
///
/// Follows the specification from <https://protobuf.dev/programming-guides/encoding>
/// under the "Message Structure" section.
pub fn decode_key(buf: &mut &[u8]) -> Result<(u32, WireType), DecodeError> {
    let key = decode_varint(buf)?;
    // The first three bits of the key are the wire type.
    let wire_type = WireType::try_from((key & 0b111) as u8)?;
    // The remaining bits are the tag / field number.
    let tag = (key >> 3) as u32;
    Ok((tag, wire_type))
}

/// Decode a LEB128 varint.
pub fn decode_varint(buf: &mut &[u8]) -> Result<u64, DecodeError> {
    Ok(leb128::read::unsigned(buf)?)
}

/// Decode a length prefix and validate it against the remaining input.
pub fn decode_len(buf: &mut &[u8]) -> Result<usize, DecodeError> {
    let len = decode_varint(buf)?;
    if len > MAX_MESSAGE_SIZE {
        return Err(DecodeError::LengthOverflow(len));
    }
    let len = len as usize;
    if buf.remaining() < len {
        return Err(DecodeError::UnexpectedEof);
    }
    Ok(len)
}

/// Split off a length-delimited payload.
pub fn decode_bytes<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], DecodeError> {
    let len = decode_len(buf)?;
    let data: &'a [u8] = *buf;
    let (payload, rest) = data.split_at(len);
    *buf = rest;
    Ok(payload)
}

/// Decode a length-delimited UTF-8 string.
pub fn decode_string(buf: &mut &[u8]) -> Result<String, DecodeError> {
    let payload = decode_bytes(buf)?;
    std::str::from_utf8(payload)
        .map(str::to_string)
        .map_err(|_| DecodeError::InvalidUtf8)
}

/// Skip a field based on its wire type.
pub fn skip_field(buf: &mut &[u8], wire_type: WireType) -> Result<(), DecodeError> {
    match wire_type {
        WireType::Varint => {
            decode_varint(buf)?;
        }
        WireType::I64 => advance(buf, 8)?,
        WireType::Len => {
            let len = decode_len(buf)?;
            buf.advance(len);
        }
        WireType::I32 => advance(buf, 4)?,
        WireType::SGroup | WireType::EGroup => {
            return Err(DecodeError::InvalidWireType(wire_type as u8));
        }
    }
    Ok(())
}

fn advance(buf: &mut &[u8], amt: usize) -> Result<(), DecodeError> {
    if buf.remaining() < amt {
        return Err(DecodeError::UnexpectedEof);
    }
    buf.advance(amt);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_wire_type_values() {
        for i in u8::MIN..u8::MAX {
            match (i, WireType::try_from(i)) {
                (0, Ok(WireType::Varint))
                | (1, Ok(WireType::I64))
                | (2, Ok(WireType::Len))
                | (3, Ok(WireType::SGroup))
                | (4, Ok(WireType::EGroup))
                | (5, Ok(WireType::I32)) => (),
                (_, Err(DecodeError::InvalidWireType(v))) => assert_eq!(v, i),
                other => panic!("unexpected value {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_key() {
        // Field 1, wire type 0 (varint): key = (1 << 3) | 0 = 8
        let mut buf: &[u8] = &[0x08];
        assert_eq!(decode_key(&mut buf).unwrap(), (1, WireType::Varint));

        // Field 2, wire type 2 (len): key = (2 << 3) | 2 = 18
        let mut buf: &[u8] = &[0x12];
        assert_eq!(decode_key(&mut buf).unwrap(), (2, WireType::Len));
    }

    #[test]
    fn test_decode_string() {
        let mut buf: &[u8] = &[0x05, b'h', b'e', b'l', b'l', b'o', 0x01];
        assert_eq!(decode_string(&mut buf).unwrap(), "hello");
        assert_eq!(buf, &[0x01]);

        let mut buf: &[u8] = &[0x00];
        assert_eq!(decode_string(&mut buf).unwrap(), "");
    }

    #[test]
    fn test_decode_string_errors() {
        let mut buf: &[u8] = &[0x02, 0xFF, 0xFE];
        assert_eq!(decode_string(&mut buf), Err(DecodeError::InvalidUtf8));

        // Length says 5 bytes but only 3 available.
        let mut buf: &[u8] = &[0x05, b'h', b'e', b'l'];
        assert_eq!(decode_string(&mut buf), Err(DecodeError::UnexpectedEof));
    }

    #[test]
    fn test_decode_len_too_large() {
        // 128MB encoded as varint.
        let mut buf: &[u8] = &[0x80, 0x80, 0x80, 0x40];
        assert!(matches!(decode_len(&mut buf), Err(DecodeError::LengthOverflow(_))));
    }

    #[test]
    fn test_skip_field() {
        let mut buf: &[u8] = &[0xAC, 0x02, 0x01];
        skip_field(&mut buf, WireType::Varint).unwrap();
        assert_eq!(buf, &[0x01]);

        let mut buf: &[u8] = &[0, 0, 0];
        assert_eq!(skip_field(&mut buf, WireType::I32), Err(DecodeError::UnexpectedEof));

        let mut buf: &[u8] = &[];
        assert!(matches!(
            skip_field(&mut buf, WireType::SGroup),
            Err(DecodeError::InvalidWireType(3))
        ));
    }
}
