//! SetPlayerGameType (0x3E): Server → Client.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::types::VarInt;

pub const GAME_TYPE_SURVIVAL: i32 = 0;
pub const GAME_TYPE_CREATIVE: i32 = 1;
pub const GAME_TYPE_ADVENTURE: i32 = 2;
pub const GAME_TYPE_CREATIVE_SPECTATOR: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPlayerGameType {
    pub game_type: i32,
}

impl ProtoEncode for SetPlayerGameType {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.game_type).proto_encode(buf);
    }
}
