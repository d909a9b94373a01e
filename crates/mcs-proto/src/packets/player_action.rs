//! PlayerAction (0x24): Client → Server.

use bytes::{Buf, BufMut};

use crate::codec::{ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{BlockPos, VarInt, VarUInt64};

/// The action codes the session reacts to. Everything else is kept raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerActionType {
    StartSprint,
    StopSprint,
    StartSneak,
    StopSneak,
    Other(i32),
}

impl PlayerActionType {
    pub const START_SPRINT: i32 = 9;
    pub const STOP_SPRINT: i32 = 10;
    pub const START_SNEAK: i32 = 11;
    pub const STOP_SNEAK: i32 = 12;

    pub fn from_i32(v: i32) -> Self {
        match v {
            Self::START_SPRINT => Self::StartSprint,
            Self::STOP_SPRINT => Self::StopSprint,
            Self::START_SNEAK => Self::StartSneak,
            Self::STOP_SNEAK => Self::StopSneak,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::StartSprint => Self::START_SPRINT,
            Self::StopSprint => Self::STOP_SPRINT,
            Self::StartSneak => Self::START_SNEAK,
            Self::StopSneak => Self::STOP_SNEAK,
            Self::Other(code) => code,
        }
    }
}

/// PlayerAction packet fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAction {
    pub entity_runtime_id: u64,
    pub action: PlayerActionType,
    pub block_position: BlockPos,
    pub face: i32,
}

impl PlayerAction {
    pub fn new(entity_runtime_id: u64, action: PlayerActionType) -> Self {
        Self {
            entity_runtime_id,
            action,
            block_position: BlockPos::default(),
            face: 0,
        }
    }
}

impl ProtoEncode for PlayerAction {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.entity_runtime_id).proto_encode(buf);
        VarInt(self.action.code()).proto_encode(buf);
        self.block_position.proto_encode(buf);
        VarInt(self.face).proto_encode(buf);
    }
}

impl ProtoDecode for PlayerAction {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            entity_runtime_id: VarUInt64::proto_decode(buf)?.0,
            action: PlayerActionType::from_i32(VarInt::proto_decode(buf)?.0),
            block_position: BlockPos::proto_decode(buf)?,
            face: VarInt::proto_decode(buf)?.0,
        })
    }
}
