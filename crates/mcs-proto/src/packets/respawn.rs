//! Respawn (0x2D): Bidirectional.
//!
//! The client sends state 2 when the player presses respawn; the server
//! answers with state 1 and the spawn position.

use bytes::{Buf, BufMut};

use crate::codec::{read_u8, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{VarUInt64, Vec3};

pub const STATE_SEARCHING_FOR_SPAWN: u8 = 0;
pub const STATE_READY_TO_SPAWN: u8 = 1;
pub const STATE_CLIENT_READY_TO_SPAWN: u8 = 2;

/// Respawn packet.
#[derive(Debug, Clone, PartialEq)]
pub struct Respawn {
    pub position: Vec3,
    pub state: u8,
    pub entity_runtime_id: u64,
}

impl ProtoEncode for Respawn {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        self.position.proto_encode(buf);
        buf.put_u8(self.state);
        VarUInt64(self.entity_runtime_id).proto_encode(buf);
    }
}

impl ProtoDecode for Respawn {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            position: Vec3::proto_decode(buf)?,
            state: read_u8(buf)?,
            entity_runtime_id: VarUInt64::proto_decode(buf)?.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn state_byte_after_position() {
        let pkt = Respawn {
            position: Vec3::new(0.5, 5.62, 0.5),
            state: STATE_READY_TO_SPAWN,
            entity_runtime_id: 1,
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(buf.len(), 14);
        assert_eq!(buf[12], STATE_READY_TO_SPAWN);
    }

    #[test]
    fn decode_client_ready() {
        let pkt = Respawn {
            position: Vec3::ZERO,
            state: STATE_CLIENT_READY_TO_SPAWN,
            entity_runtime_id: 1,
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(Respawn::proto_decode(&mut buf.freeze()).unwrap(), pkt);
    }

    #[test]
    fn missing_state() {
        let mut buf = BytesMut::new();
        Vec3::ZERO.proto_encode(&mut buf);
        assert!(Respawn::proto_decode(&mut buf.freeze()).is_err());
    }
}
