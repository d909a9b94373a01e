//! PlayerList (0x3F): Server → Client.
//!
//! Adds entries to or removes entries from the client's player list. An
//! entity must be in the list before the client can render it as a player.

use bytes::BufMut;

use crate::codec::{write_bytes, write_string, ProtoEncode};
use crate::types::{Uuid, VarLong, VarUInt32};

/// An RGBA skin, cape, or animation image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkinImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl ProtoEncode for SkinImage {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u32_le(self.width);
        buf.put_u32_le(self.height);
        write_bytes(buf, &self.data);
    }
}

pub const ANIMATION_HEAD: u32 = 1;
pub const ANIMATION_BODY_32X32: u32 = 2;
pub const ANIMATION_BODY_128X128: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct SkinAnimation {
    pub image: SkinImage,
    pub animation_type: u32,
    pub frame_count: f32,
    pub expression_type: u32,
}

/// Everything the client needs to render another player's skin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinData {
    pub skin_id: String,
    pub play_fab_id: String,
    pub resource_patch: String,
    pub image: SkinImage,
    pub animations: Vec<SkinAnimation>,
    pub cape: SkinImage,
    pub geometry: String,
    pub animation_data: String,
    pub premium: bool,
    pub persona: bool,
    pub cape_on_classic_skin: bool,
    pub cape_id: String,
    pub full_id: String,
    pub arm_size: String,
    pub colour: String,
}

impl ProtoEncode for SkinData {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_string(buf, &self.skin_id);
        write_string(buf, &self.play_fab_id);
        write_string(buf, &self.resource_patch);
        self.image.proto_encode(buf);
        buf.put_u32_le(self.animations.len() as u32);
        for anim in &self.animations {
            anim.image.proto_encode(buf);
            buf.put_u32_le(anim.animation_type);
            buf.put_f32_le(anim.frame_count);
            buf.put_u32_le(anim.expression_type);
        }
        self.cape.proto_encode(buf);
        write_string(buf, &self.geometry);
        write_string(buf, &self.animation_data);
        buf.put_u8(u8::from(self.premium));
        buf.put_u8(u8::from(self.persona));
        buf.put_u8(u8::from(self.cape_on_classic_skin));
        write_string(buf, &self.cape_id);
        write_string(buf, &self.full_id);
        write_string(buf, &self.arm_size);
        write_string(buf, &self.colour);
        // persona pieces, piece tint colours
        buf.put_u32_le(0);
        buf.put_u32_le(0);
    }
}

/// A single "add" entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerListEntry {
    pub uuid: Uuid,
    /// The runtime handle the receiving client knows the entity by.
    pub entity_unique_id: i64,
    pub username: String,
    pub xuid: String,
    pub platform_chat_id: String,
    pub build_platform: i32,
    pub skin: SkinData,
    pub host: bool,
}

impl ProtoEncode for PlayerListEntry {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        self.uuid.proto_encode(buf);
        VarLong(self.entity_unique_id).proto_encode(buf);
        write_string(buf, &self.username);
        write_string(buf, &self.xuid);
        write_string(buf, &self.platform_chat_id);
        buf.put_i32_le(self.build_platform);
        self.skin.proto_encode(buf);
        buf.put_u8(0); // classroom role
        buf.put_u8(u8::from(self.host));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerList {
    Add(Vec<PlayerListEntry>),
    /// Removal references identity only.
    Remove(Vec<Uuid>),
}

impl ProtoEncode for PlayerList {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        match self {
            Self::Add(entries) => {
                buf.put_u8(0);
                VarUInt32(entries.len() as u32).proto_encode(buf);
                for entry in entries {
                    entry.proto_encode(buf);
                }
            }
            Self::Remove(uuids) => {
                buf.put_u8(1);
                VarUInt32(uuids.len() as u32).proto_encode(buf);
                for uuid in uuids {
                    uuid.proto_encode(buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn entry() -> PlayerListEntry {
        PlayerListEntry {
            uuid: Uuid::new(1, 2),
            entity_unique_id: 2,
            username: "Steve".into(),
            xuid: "".into(),
            platform_chat_id: "".into(),
            build_platform: -1,
            skin: SkinData::default(),
            host: false,
        }
    }

    #[test]
    fn encode_remove_single() {
        let pkt = PlayerList::Remove(vec![Uuid::new(1, 2)]);
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(buf[0], 1);
        assert_eq!(buf[1], 1);
        assert_eq!(buf.len(), 1 + 1 + 16);
    }

    #[test]
    fn encode_add_single() {
        let mut buf = BytesMut::new();
        PlayerList::Add(vec![entry()]).proto_encode(&mut buf);
        assert_eq!(buf[0], 0);
        assert_eq!(buf[1], 1);
        // uuid, then VarLong(2) zigzagged
        assert_eq!(buf[18], 4);
        assert_eq!(buf[19] as usize, "Steve".len());
    }

    #[test]
    fn animations_add_fixed_fields() {
        let mut plain = BytesMut::new();
        SkinData::default().proto_encode(&mut plain);

        let skin = SkinData {
            animations: vec![SkinAnimation {
                image: SkinImage::default(),
                animation_type: ANIMATION_HEAD,
                frame_count: 2.0,
                expression_type: 0,
            }],
            ..SkinData::default()
        };
        let mut buf = BytesMut::new();
        skin.proto_encode(&mut buf);
        // width + height + empty data + type + frames + expression
        assert_eq!(buf.len(), plain.len() + 4 + 4 + 1 + 4 + 4 + 4);
    }
}
