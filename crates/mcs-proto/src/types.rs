//! Base data types used throughout the Bedrock protocol.

use std::fmt;
use std::ops::{Add, Sub};

use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{ProtoDecode, ProtoEncode};
use crate::error::{ensure_remaining, ProtoError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum VarIntError {
    #[error("buffer too short")]
    BufferTooShort,
    #[error("VarInt is too long (more than {max_bytes} bytes)")]
    TooManyBytes { max_bytes: usize },
}

// ---------------------------------------------------------------------------
// LEB128 core shared by all variable-length integers
// ---------------------------------------------------------------------------

fn write_leb128(buf: &mut impl BufMut, mut value: u64) {
    while value & !0x7F != 0 {
        buf.put_u8((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

fn read_leb128(buf: &mut impl Buf, max_bytes: usize) -> Result<u64, VarIntError> {
    let mut result = 0u64;
    for i in 0..max_bytes {
        if !buf.has_remaining() {
            return Err(VarIntError::BufferTooShort);
        }
        let byte = buf.get_u8();
        result |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(VarIntError::TooManyBytes { max_bytes })
}

/// Declares a newtype over an integer with its LEB128 wire codec.
macro_rules! var_int {
    ($(#[$doc:meta])* $name:ident($inner:ty), $max:expr, $enc:expr, $dec:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub $inner);

        impl $name {
            /// Maximum bytes this integer can occupy on the wire.
            pub const MAX_BYTES: usize = $max;
        }

        impl ProtoEncode for $name {
            fn proto_encode(&self, buf: &mut impl BufMut) {
                let enc: fn($inner) -> u64 = $enc;
                write_leb128(buf, enc(self.0));
            }
        }

        impl ProtoDecode for $name {
            fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
                let dec: fn(u64) -> $inner = $dec;
                Ok($name(dec(read_leb128(buf, Self::MAX_BYTES)?)))
            }
        }

        impl From<$inner> for $name {
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

var_int!(
    /// Signed 32-bit integer, ZigZag + LEB128.
    VarInt(i32),
    5,
    |v| u64::from(((v << 1) ^ (v >> 31)) as u32),
    |raw| {
        let n = raw as u32;
        ((n >> 1) as i32) ^ -((n & 1) as i32)
    }
);

var_int!(
    /// Unsigned 32-bit integer, LEB128.
    VarUInt32(u32),
    5,
    u64::from,
    |raw| raw as u32
);

var_int!(
    /// Signed 64-bit integer, ZigZag + LEB128.
    VarLong(i64),
    10,
    |v| ((v << 1) ^ (v >> 63)) as u64,
    |raw| ((raw >> 1) as i64) ^ -((raw & 1) as i64)
);

var_int!(
    /// Unsigned 64-bit integer, LEB128. Used for entity runtime IDs.
    VarUInt64(u64),
    10,
    |v| v,
    |raw| raw
);

// ---------------------------------------------------------------------------
// Vec3 (f32 x, y, z)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl ProtoEncode for Vec3 {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_f32_le(self.x);
        buf.put_f32_le(self.y);
        buf.put_f32_le(self.z);
    }
}

impl ProtoDecode for Vec3 {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        ensure_remaining(buf, 12)?;
        Ok(Self::new(buf.get_f32_le(), buf.get_f32_le(), buf.get_f32_le()))
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Uuid
// ---------------------------------------------------------------------------

/// 128-bit UUID as stored by Bedrock: two little-endian u64 halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Uuid {
    pub most_significant: u64,
    pub least_significant: u64,
}

impl Uuid {
    pub const ZERO: Self = Self {
        most_significant: 0,
        least_significant: 0,
    };

    pub fn new(most: u64, least: u64) -> Self {
        Self {
            most_significant: most,
            least_significant: least,
        }
    }

    /// Build a version-4 UUID from 128 random bits.
    pub fn from_random_bits(most: u64, least: u64) -> Self {
        Self::new(
            (most & !0xF000) | 0x4000,
            (least & !(0xC << 60)) | (0x8 << 60),
        )
    }
}

impl ProtoEncode for Uuid {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u64_le(self.most_significant);
        buf.put_u64_le(self.least_significant);
    }
}

impl ProtoDecode for Uuid {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        ensure_remaining(buf, 16)?;
        Ok(Self::new(buf.get_u64_le(), buf.get_u64_le()))
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hi, lo) = (self.most_significant, self.least_significant);
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            hi >> 32,
            (hi >> 16) & 0xFFFF,
            hi & 0xFFFF,
            lo >> 48,
            lo & 0xFFFF_FFFF_FFFF,
        )
    }
}

// ---------------------------------------------------------------------------
// BlockPos (i32 x, y, z)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Truncate a floating-point position towards zero, as the client does
    /// for chunk publisher centres.
    pub fn truncated(v: Vec3) -> Self {
        Self::new(v.x as i32, v.y as i32, v.z as i32)
    }
}

/// Wire format: VarInt(x) + VarUInt32(y) + VarInt(z).
impl ProtoEncode for BlockPos {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.x).proto_encode(buf);
        VarUInt32(self.y as u32).proto_encode(buf);
        VarInt(self.z).proto_encode(buf);
    }
}

impl ProtoDecode for BlockPos {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let x = VarInt::proto_decode(buf)?.0;
        let y = VarUInt32::proto_decode(buf)?.0 as i32;
        let z = VarInt::proto_decode(buf)?.0;
        Ok(Self { x, y, z })
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn encoded(v: &impl ProtoEncode) -> Vec<u8> {
        let mut buf = BytesMut::new();
        v.proto_encode(&mut buf);
        buf.to_vec()
    }

    #[test]
    fn varint_zigzag_bytes() {
        assert_eq!(encoded(&VarInt(0)), [0x00]);
        assert_eq!(encoded(&VarInt(-1)), [0x01]);
        assert_eq!(encoded(&VarInt(1)), [0x02]);
        assert_eq!(encoded(&VarInt(-64)), [0x7F]);
        assert_eq!(encoded(&VarInt(64)), [0x80, 0x01]);
    }

    #[test]
    fn varint_extremes_decode() {
        for v in [i32::MIN, i32::MAX, -300, 300] {
            let bytes = encoded(&VarInt(v));
            assert_eq!(VarInt::proto_decode(&mut &bytes[..]).unwrap().0, v);
        }
        let bytes = encoded(&VarLong(i64::MIN));
        assert_eq!(VarLong::proto_decode(&mut &bytes[..]).unwrap().0, i64::MIN);
    }

    #[test]
    fn varuint32_multi_byte() {
        assert_eq!(encoded(&VarUInt32(300)), [0xAC, 0x02]);
        assert_eq!(encoded(&VarUInt32(u32::MAX)).len(), VarUInt32::MAX_BYTES);
    }

    #[test]
    fn varint_too_long() {
        let data = [0xFFu8; 6];
        assert!(matches!(
            VarInt::proto_decode(&mut &data[..]),
            Err(ProtoError::VarInt(VarIntError::TooManyBytes { max_bytes: 5 }))
        ));
    }

    #[test]
    fn varint_truncated() {
        let data = [0x80u8];
        assert!(matches!(
            VarUInt64::proto_decode(&mut &data[..]),
            Err(ProtoError::VarInt(VarIntError::BufferTooShort))
        ));
    }

    #[test]
    fn block_pos_truncates_towards_zero() {
        let pos = BlockPos::truncated(Vec3::new(-0.7, 64.9, 12.2));
        assert_eq!(pos, BlockPos::new(0, 64, 12));
    }

    #[test]
    fn uuid_display_and_version() {
        let id = Uuid::new(0x0011_2233_4455_6677, 0x8899_aabb_ccdd_eeff);
        assert_eq!(id.to_string(), "00112233-4455-6677-8899-aabbccddeeff");
        let random = Uuid::from_random_bits(u64::MAX, u64::MAX);
        assert_eq!((random.most_significant >> 12) & 0xF, 4);
        assert_eq!(random.least_significant >> 62, 0b10);
    }
}
