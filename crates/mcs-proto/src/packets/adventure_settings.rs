//! AdventureSettings (0x37): Server → Client.
//!
//! Permission flags that decide what the player may do in the current game
//! mode: build, fly, clip through blocks, and so on.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::types::VarUInt32;

pub mod flag {
    pub const WORLD_IMMUTABLE: u32 = 0x01;
    pub const NO_PVP: u32 = 0x02;
    pub const AUTO_JUMP: u32 = 0x20;
    pub const ALLOW_FLIGHT: u32 = 0x40;
    pub const NO_CLIP: u32 = 0x80;
    pub const WORLD_BUILDER: u32 = 0x100;
    pub const FLYING: u32 = 0x200;
    pub const MUTED: u32 = 0x400;
}

pub mod action_permission {
    pub const BUILD_AND_MINE: u32 = 0x01;
    pub const DOORS_AND_SWITCHES: u32 = 0x02;
    pub const OPEN_CONTAINERS: u32 = 0x04;
    pub const ATTACK_PLAYERS: u32 = 0x08;
    pub const ATTACK_MOBS: u32 = 0x10;
    pub const ALL: u32 =
        BUILD_AND_MINE | DOORS_AND_SWITCHES | OPEN_CONTAINERS | ATTACK_PLAYERS | ATTACK_MOBS;
}

pub const PERMISSION_LEVEL_VISITOR: u32 = 0;
pub const PERMISSION_LEVEL_MEMBER: u32 = 1;
pub const PERMISSION_LEVEL_OPERATOR: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdventureSettings {
    pub flags: u32,
    pub command_permission_level: u32,
    pub action_permissions: u32,
    pub permission_level: u32,
    pub custom_stored_permissions: u32,
    pub player_unique_id: i64,
}

impl AdventureSettings {
    /// Settings for a regular member with every action permission and the
    /// given mode flags.
    pub fn member(flags: u32, player_unique_id: i64) -> Self {
        Self {
            flags,
            command_permission_level: 0,
            action_permissions: action_permission::ALL,
            permission_level: PERMISSION_LEVEL_MEMBER,
            custom_stored_permissions: 0,
            player_unique_id,
        }
    }
}

impl ProtoEncode for AdventureSettings {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.flags).proto_encode(buf);
        VarUInt32(self.command_permission_level).proto_encode(buf);
        VarUInt32(self.action_permissions).proto_encode(buf);
        VarUInt32(self.permission_level).proto_encode(buf);
        VarUInt32(self.custom_stored_permissions).proto_encode(buf);
        buf.put_i64_le(self.player_unique_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn member_layout() {
        let pkt = AdventureSettings::member(flag::ALLOW_FLIGHT, 1);
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..5], &[0x40, 0x00, 0x1F, 0x01, 0x00]);
        assert_eq!(&buf[5..], &1i64.to_le_bytes());
    }
}
