//! Game packets handled by the session core.

pub mod adventure_settings;
pub mod disconnect;
pub mod game_rules_changed;
pub mod inventory_slot;
pub mod inventory_transaction;
pub mod mob_equipment;
pub mod modal_form;
pub mod move_player;
pub mod network_chunk_publisher_update;
pub mod player_action;
pub mod player_list;
pub mod respawn;
pub mod set_entity_motion;
pub mod set_player_game_type;
pub mod transfer;
pub mod update_attributes;

use bytes::{Buf, BufMut, BytesMut};

use crate::codec::{ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::VarUInt32;

pub use adventure_settings::AdventureSettings;
pub use disconnect::Disconnect;
pub use game_rules_changed::{GameRule, GameRuleValue, GameRulesChanged};
pub use inventory_slot::InventorySlot;
pub use inventory_transaction::{
    InventoryAction, InventorySource, InventoryTransaction, ReleaseItemData, TransactionData,
    UseItemAction, UseItemData, UseItemOnEntityAction, UseItemOnEntityData,
};
pub use mob_equipment::MobEquipment;
pub use modal_form::{ModalFormRequest, ModalFormResponse};
pub use move_player::{MoveMode, MovePlayer};
pub use network_chunk_publisher_update::NetworkChunkPublisherUpdate;
pub use player_action::{PlayerAction, PlayerActionType};
pub use player_list::{PlayerList, PlayerListEntry, SkinAnimation, SkinData, SkinImage};
pub use respawn::Respawn;
pub use set_entity_motion::SetEntityMotion;
pub use set_player_game_type::SetPlayerGameType;
pub use transfer::Transfer;
pub use update_attributes::{AttributeEntry, UpdateAttributes};

/// Game packet IDs.
pub mod id {
    pub const DISCONNECT: u32 = 0x05;
    pub const MOVE_PLAYER: u32 = 0x13;
    pub const UPDATE_ATTRIBUTES: u32 = 0x1D;
    pub const INVENTORY_TRANSACTION: u32 = 0x1E;
    pub const MOB_EQUIPMENT: u32 = 0x1F;
    pub const PLAYER_ACTION: u32 = 0x24;
    pub const SET_ENTITY_MOTION: u32 = 0x28;
    pub const RESPAWN: u32 = 0x2D;
    pub const INVENTORY_SLOT: u32 = 0x32;
    pub const ADVENTURE_SETTINGS: u32 = 0x37;
    pub const SET_PLAYER_GAME_TYPE: u32 = 0x3E;
    pub const PLAYER_LIST: u32 = 0x3F;
    pub const GAME_RULES_CHANGED: u32 = 0x48;
    pub const TRANSFER: u32 = 0x55;
    pub const MODAL_FORM_REQUEST: u32 = 0x64;
    pub const MODAL_FORM_RESPONSE: u32 = 0x65;
    pub const NETWORK_CHUNK_PUBLISHER_UPDATE: u32 = 0x79;
}

/// Window IDs the client uses for the player's own inventories.
pub mod window {
    pub const INVENTORY: i32 = 0;
    pub const OFFHAND: i32 = 119;
    pub const ARMOUR: i32 = 120;
    pub const UI: i32 = 124;
}

/// Every client packet the session reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundPacket {
    MovePlayer(MovePlayer),
    MobEquipment(MobEquipment),
    PlayerAction(PlayerAction),
    ModalFormResponse(ModalFormResponse),
    Respawn(Respawn),
    InventoryTransaction(InventoryTransaction),
}

impl InboundPacket {
    /// Decode the payload of packet `packet_id`.
    ///
    /// Returns `Ok(None)` for packets outside the handled set so the caller
    /// can pass them on without treating them as errors.
    pub fn decode(packet_id: u32, buf: &mut impl Buf) -> Result<Option<Self>, ProtoError> {
        let packet = match packet_id {
            id::MOVE_PLAYER => Self::MovePlayer(MovePlayer::proto_decode(buf)?),
            id::MOB_EQUIPMENT => Self::MobEquipment(MobEquipment::proto_decode(buf)?),
            id::PLAYER_ACTION => Self::PlayerAction(PlayerAction::proto_decode(buf)?),
            id::MODAL_FORM_RESPONSE => {
                Self::ModalFormResponse(ModalFormResponse::proto_decode(buf)?)
            }
            id::RESPAWN => Self::Respawn(Respawn::proto_decode(buf)?),
            id::INVENTORY_TRANSACTION => {
                Self::InventoryTransaction(InventoryTransaction::proto_decode(buf)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(packet))
    }

    /// Decode a framed packet: VarUInt32 packet ID followed by the payload.
    pub fn decode_framed(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let packet_id = VarUInt32::proto_decode(buf)?.0;
        Self::decode(packet_id, buf)?.ok_or(ProtoError::UnknownPacketId(packet_id))
    }

    pub fn packet_id(&self) -> u32 {
        match self {
            Self::MovePlayer(_) => id::MOVE_PLAYER,
            Self::MobEquipment(_) => id::MOB_EQUIPMENT,
            Self::PlayerAction(_) => id::PLAYER_ACTION,
            Self::ModalFormResponse(_) => id::MODAL_FORM_RESPONSE,
            Self::Respawn(_) => id::RESPAWN,
            Self::InventoryTransaction(_) => id::INVENTORY_TRANSACTION,
        }
    }
}

/// Every packet the session core sends.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundPacket {
    ChunkPublisherUpdate(NetworkChunkPublisherUpdate),
    UpdateAttributes(UpdateAttributes),
    SetEntityMotion(SetEntityMotion),
    ModalFormRequest(ModalFormRequest),
    PlayerList(PlayerList),
    InventorySlot(InventorySlot),
    AdventureSettings(AdventureSettings),
    SetPlayerGameType(SetPlayerGameType),
    GameRulesChanged(GameRulesChanged),
    Transfer(Transfer),
    Disconnect(Disconnect),
    MobEquipment(MobEquipment),
    Respawn(Respawn),
}

impl OutboundPacket {
    pub fn packet_id(&self) -> u32 {
        match self {
            Self::ChunkPublisherUpdate(_) => id::NETWORK_CHUNK_PUBLISHER_UPDATE,
            Self::UpdateAttributes(_) => id::UPDATE_ATTRIBUTES,
            Self::SetEntityMotion(_) => id::SET_ENTITY_MOTION,
            Self::ModalFormRequest(_) => id::MODAL_FORM_REQUEST,
            Self::PlayerList(_) => id::PLAYER_LIST,
            Self::InventorySlot(_) => id::INVENTORY_SLOT,
            Self::AdventureSettings(_) => id::ADVENTURE_SETTINGS,
            Self::SetPlayerGameType(_) => id::SET_PLAYER_GAME_TYPE,
            Self::GameRulesChanged(_) => id::GAME_RULES_CHANGED,
            Self::Transfer(_) => id::TRANSFER,
            Self::Disconnect(_) => id::DISCONNECT,
            Self::MobEquipment(_) => id::MOB_EQUIPMENT,
            Self::Respawn(_) => id::RESPAWN,
        }
    }

    /// Encode as a framed packet: VarUInt32 packet ID followed by the payload.
    pub fn encode_framed(&self) -> BytesMut {
        let mut buf = BytesMut::new();
        VarUInt32(self.packet_id()).proto_encode(&mut buf);
        self.proto_encode(&mut buf);
        buf
    }
}

impl ProtoEncode for OutboundPacket {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        match self {
            Self::ChunkPublisherUpdate(p) => p.proto_encode(buf),
            Self::UpdateAttributes(p) => p.proto_encode(buf),
            Self::SetEntityMotion(p) => p.proto_encode(buf),
            Self::ModalFormRequest(p) => p.proto_encode(buf),
            Self::PlayerList(p) => p.proto_encode(buf),
            Self::InventorySlot(p) => p.proto_encode(buf),
            Self::AdventureSettings(p) => p.proto_encode(buf),
            Self::SetPlayerGameType(p) => p.proto_encode(buf),
            Self::GameRulesChanged(p) => p.proto_encode(buf),
            Self::Transfer(p) => p.proto_encode(buf),
            Self::Disconnect(p) => p.proto_encode(buf),
            Self::MobEquipment(p) => p.proto_encode(buf),
            Self::Respawn(p) => p.proto_encode(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec3;

    #[test]
    fn framed_inbound_dispatches_by_id() {
        let mut buf = BytesMut::new();
        VarUInt32(id::RESPAWN).proto_encode(&mut buf);
        Respawn {
            position: Vec3::ZERO,
            state: respawn::STATE_CLIENT_READY_TO_SPAWN,
            entity_runtime_id: 1,
        }
        .proto_encode(&mut buf);
        let packet = InboundPacket::decode_framed(&mut buf.freeze()).unwrap();
        assert!(matches!(packet, InboundPacket::Respawn(ref r) if r.state == 2));
        assert_eq!(packet.packet_id(), id::RESPAWN);
    }

    #[test]
    fn unhandled_id_is_not_an_error() {
        let mut empty: &[u8] = &[];
        assert!(InboundPacket::decode(0x09, &mut empty).unwrap().is_none());
    }

    #[test]
    fn framed_unknown_id() {
        let data = [0x09u8];
        assert!(matches!(
            InboundPacket::decode_framed(&mut &data[..]),
            Err(ProtoError::UnknownPacketId(0x09))
        ));
    }

    #[test]
    fn outbound_prefixes_id() {
        let pkt = OutboundPacket::Transfer(Transfer::new("a", 1));
        let framed = pkt.encode_framed();
        assert_eq!(framed[0] as u32, id::TRANSFER);
        assert_eq!(framed.len(), 1 + 2 + 2);
    }
}
