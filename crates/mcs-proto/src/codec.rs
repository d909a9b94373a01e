//! Protocol encoding/decoding traits and helpers.

use bytes::{Buf, BufMut};

use crate::error::{ensure_remaining, ProtoError};
use crate::types::VarUInt32;

/// Encode a value onto a buffer.
pub trait ProtoEncode {
    fn proto_encode(&self, buf: &mut impl BufMut);
}

/// Decode a value from a buffer.
pub trait ProtoDecode: Sized {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError>;
}

/// Write a length-prefixed byte slice (VarUInt32 length + raw bytes).
pub fn write_bytes(buf: &mut impl BufMut, data: &[u8]) {
    VarUInt32(data.len() as u32).proto_encode(buf);
    buf.put_slice(data);
}

/// Read a length-prefixed byte slice.
pub fn read_bytes(buf: &mut impl Buf) -> Result<Vec<u8>, ProtoError> {
    let len = VarUInt32::proto_decode(buf)?.0 as usize;
    ensure_remaining(buf, len)?;
    Ok(buf.copy_to_bytes(len).to_vec())
}

/// Write a Bedrock protocol string (VarUInt32 length + UTF-8).
pub fn write_string(buf: &mut impl BufMut, s: &str) {
    write_bytes(buf, s.as_bytes());
}

/// Read a Bedrock protocol string (VarUInt32 length + UTF-8).
pub fn read_string(buf: &mut impl Buf) -> Result<String, ProtoError> {
    String::from_utf8(read_bytes(buf)?).map_err(|_| ProtoError::InvalidUtf8)
}

/// Read a single byte, failing on an exhausted buffer.
pub fn read_u8(buf: &mut impl Buf) -> Result<u8, ProtoError> {
    ensure_remaining(buf, 1)?;
    Ok(buf.get_u8())
}

/// Read a little-endian f32.
pub fn read_f32(buf: &mut impl Buf) -> Result<f32, ProtoError> {
    ensure_remaining(buf, 4)?;
    Ok(buf.get_f32_le())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn string_unicode() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "日本語テスト");
        let result = read_string(&mut buf.freeze()).unwrap();
        assert_eq!(result, "日本語テスト");
    }

    #[test]
    fn string_buffer_too_short() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "Hello");
        let truncated = buf.freeze().slice(..3);
        assert!(read_string(&mut truncated.clone()).is_err());
    }

    #[test]
    fn bytes_keep_raw_content() {
        let mut buf = BytesMut::new();
        write_bytes(&mut buf, b"null");
        assert_eq!(buf[0], 4);
        assert_eq!(read_bytes(&mut buf.freeze()).unwrap(), b"null".to_vec());
    }

    #[test]
    fn read_u8_on_empty_buffer() {
        let mut empty: &[u8] = &[];
        assert!(matches!(
            read_u8(&mut empty),
            Err(ProtoError::BufferTooShort { needed: 1, .. })
        ));
    }
}
