//! MovePlayer (0x13): Client → Server.
//!
//! The client reports its absolute position and rotation every tick it moves.

use bytes::{Buf, BufMut};

use crate::codec::{read_u8, ProtoDecode, ProtoEncode};
use crate::error::{ensure_remaining, ProtoError};
use crate::types::{VarUInt64, Vec3};

/// How the movement should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MoveMode {
    Normal = 0,
    Reset = 1,
    Teleport = 2,
    Rotation = 3,
}

impl TryFrom<u8> for MoveMode {
    type Error = ProtoError;

    fn try_from(v: u8) -> Result<Self, ProtoError> {
        match v {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Reset),
            2 => Ok(Self::Teleport),
            3 => Ok(Self::Rotation),
            _ => Err(ProtoError::InvalidData(format!("unknown move mode {v}"))),
        }
    }
}

/// MovePlayer packet.
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlayer {
    /// Runtime handle the client claims to be moving.
    pub entity_runtime_id: u64,
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub mode: MoveMode,
    pub on_ground: bool,
    pub ridden_entity_runtime_id: u64,
    /// `(cause, source entity type)`, present only for [`MoveMode::Teleport`].
    pub teleport: Option<(i32, i32)>,
}

impl MovePlayer {
    /// A plain movement update for `entity_runtime_id`.
    pub fn new(entity_runtime_id: u64, position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            entity_runtime_id,
            position,
            pitch,
            yaw,
            head_yaw: yaw,
            mode: MoveMode::Normal,
            on_ground: false,
            ridden_entity_runtime_id: 0,
            teleport: None,
        }
    }
}

impl ProtoEncode for MovePlayer {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.entity_runtime_id).proto_encode(buf);
        self.position.proto_encode(buf);
        buf.put_f32_le(self.pitch);
        buf.put_f32_le(self.yaw);
        buf.put_f32_le(self.head_yaw);
        buf.put_u8(self.mode as u8);
        buf.put_u8(u8::from(self.on_ground));
        VarUInt64(self.ridden_entity_runtime_id).proto_encode(buf);
        if self.mode == MoveMode::Teleport {
            let (cause, source) = self.teleport.unwrap_or_default();
            buf.put_i32_le(cause);
            buf.put_i32_le(source);
        }
    }
}

impl ProtoDecode for MovePlayer {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let entity_runtime_id = VarUInt64::proto_decode(buf)?.0;
        let position = Vec3::proto_decode(buf)?;

        ensure_remaining(buf, 12)?;
        let pitch = buf.get_f32_le();
        let yaw = buf.get_f32_le();
        let head_yaw = buf.get_f32_le();
        let mode = MoveMode::try_from(read_u8(buf)?)?;
        let on_ground = read_u8(buf)? != 0;
        let ridden_entity_runtime_id = VarUInt64::proto_decode(buf)?.0;

        let teleport = if mode == MoveMode::Teleport {
            ensure_remaining(buf, 8)?;
            Some((buf.get_i32_le(), buf.get_i32_le()))
        } else {
            None
        };

        Ok(Self {
            entity_runtime_id,
            position,
            pitch,
            yaw,
            head_yaw,
            mode,
            on_ground,
            ridden_entity_runtime_id,
            teleport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn decode_normal_move() {
        let pkt = MovePlayer::new(1, Vec3::new(10.0, 65.0, 20.0), 90.0, -5.0);
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        let decoded = MovePlayer::proto_decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, pkt);
        assert!(decoded.teleport.is_none());
    }

    #[test]
    fn teleport_carries_cause() {
        let pkt = MovePlayer {
            mode: MoveMode::Teleport,
            teleport: Some((2, 0)),
            ..MovePlayer::new(1, Vec3::ZERO, 0.0, 0.0)
        };
        let mut plain = BytesMut::new();
        MovePlayer::new(1, Vec3::ZERO, 0.0, 0.0).proto_encode(&mut plain);
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(buf.len(), plain.len() + 8);
        let decoded = MovePlayer::proto_decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded.teleport, Some((2, 0)));
    }

    #[test]
    fn unknown_mode_rejected() {
        assert!(MoveMode::try_from(4).is_err());
    }

    #[test]
    fn truncated_rotation() {
        let mut buf = BytesMut::new();
        VarUInt64(1).proto_encode(&mut buf);
        Vec3::ZERO.proto_encode(&mut buf);
        buf.put_f32_le(0.0);
        assert!(matches!(
            MovePlayer::proto_decode(&mut buf.freeze()),
            Err(ProtoError::BufferTooShort { needed: 12, .. })
        ));
    }
}
