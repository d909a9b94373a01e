//! InventoryTransaction (0x1E): Client → Server.
//!
//! One packet carries one of five transaction kinds. Only the `Normal` kind
//! names inventory slots directly; the others describe an interaction with a
//! block, an entity, or the held item.

use bytes::{Buf, BufMut};

use crate::codec::{read_bytes, read_u8, write_bytes, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::item_stack::NetworkItemStack;
use crate::types::{BlockPos, VarInt, VarUInt32, VarUInt64, Vec3};

pub const TYPE_NORMAL: u32 = 0;
pub const TYPE_MISMATCH: u32 = 1;
pub const TYPE_USE_ITEM: u32 = 2;
pub const TYPE_USE_ITEM_ON_ENTITY: u32 = 3;
pub const TYPE_RELEASE_ITEM: u32 = 4;

// ---------------------------------------------------------------------------
// Inventory actions
// ---------------------------------------------------------------------------

/// Where the items of an [`InventoryAction`] come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventorySource {
    /// A window the player has open, identified by window ID.
    Container { window_id: i32 },
    Global,
    /// Dropping or picking up items in the world.
    WorldInteraction { flags: u32 },
    Creative,
    /// Crafting grids and other pseudo containers (source type >= 100).
    Craft { source_type: u32, window_id: i32 },
}

impl InventorySource {
    /// The window ID if the source is a real container.
    pub fn window_id(&self) -> Option<i32> {
        match self {
            Self::Container { window_id } => Some(*window_id),
            _ => None,
        }
    }

    fn source_type(&self) -> u32 {
        match self {
            Self::Container { .. } => 0,
            Self::Global => 1,
            Self::WorldInteraction { .. } => 2,
            Self::Creative => 3,
            Self::Craft { source_type, .. } => *source_type,
        }
    }
}

impl ProtoEncode for InventorySource {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.source_type()).proto_encode(buf);
        match self {
            Self::Container { window_id } | Self::Craft { window_id, .. } => {
                VarInt(*window_id).proto_encode(buf)
            }
            Self::WorldInteraction { flags } => VarUInt32(*flags).proto_encode(buf),
            Self::Global | Self::Creative => {}
        }
    }
}

impl ProtoDecode for InventorySource {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let source_type = VarUInt32::proto_decode(buf)?.0;
        match source_type {
            0 => Ok(Self::Container {
                window_id: VarInt::proto_decode(buf)?.0,
            }),
            1 => Ok(Self::Global),
            2 => Ok(Self::WorldInteraction {
                flags: VarUInt32::proto_decode(buf)?.0,
            }),
            3 => Ok(Self::Creative),
            t if t >= 100 => Ok(Self::Craft {
                source_type: t,
                window_id: VarInt::proto_decode(buf)?.0,
            }),
            t => Err(ProtoError::InvalidData(format!(
                "unknown inventory source type {t}"
            ))),
        }
    }
}

/// A single proposed slot change: the client claims `slot` currently holds
/// `old_item` and asks for it to hold `new_item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryAction {
    pub source: InventorySource,
    pub slot: u32,
    pub old_item: NetworkItemStack,
    pub new_item: NetworkItemStack,
}

impl ProtoEncode for InventoryAction {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        self.source.proto_encode(buf);
        VarUInt32(self.slot).proto_encode(buf);
        self.old_item.proto_encode(buf);
        self.new_item.proto_encode(buf);
    }
}

impl ProtoDecode for InventoryAction {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            source: InventorySource::proto_decode(buf)?,
            slot: VarUInt32::proto_decode(buf)?.0,
            old_item: NetworkItemStack::proto_decode(buf)?,
            new_item: NetworkItemStack::proto_decode(buf)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Transaction payloads
// ---------------------------------------------------------------------------

/// Action within a UseItem transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseItemAction {
    ClickBlock = 0,
    ClickAir = 1,
    BreakBlock = 2,
}

impl TryFrom<u32> for UseItemAction {
    type Error = ProtoError;

    fn try_from(v: u32) -> Result<Self, ProtoError> {
        match v {
            0 => Ok(Self::ClickBlock),
            1 => Ok(Self::ClickAir),
            2 => Ok(Self::BreakBlock),
            _ => Err(ProtoError::InvalidData(format!("unknown use item action {v}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseItemData {
    pub action: UseItemAction,
    pub block_position: BlockPos,
    pub face: i32,
    pub hotbar_slot: i32,
    pub held_item: NetworkItemStack,
    pub player_position: Vec3,
    /// Offset of the click within the clicked block.
    pub click_position: Vec3,
    pub block_runtime_id: u32,
}

/// Action within a UseItemOnEntity transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseItemOnEntityAction {
    Interact = 0,
    Attack = 1,
}

impl TryFrom<u32> for UseItemOnEntityAction {
    type Error = ProtoError;

    fn try_from(v: u32) -> Result<Self, ProtoError> {
        match v {
            0 => Ok(Self::Interact),
            1 => Ok(Self::Attack),
            _ => Err(ProtoError::InvalidData(format!(
                "unknown use item on entity action {v}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseItemOnEntityData {
    /// Runtime handle of the target, as known to this client.
    pub target_runtime_id: u64,
    pub action: UseItemOnEntityAction,
    pub hotbar_slot: i32,
    pub held_item: NetworkItemStack,
    pub player_position: Vec3,
    pub click_position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseItemData {
    /// 0 = release (bows), 1 = consume (food, potions).
    pub action: u32,
    pub hotbar_slot: i32,
    pub held_item: NetworkItemStack,
    pub head_position: Vec3,
}

/// The closed set of transaction kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionData {
    Normal(Vec<InventoryAction>),
    /// The client noticed it is out of sync and asks for a resend.
    Mismatch,
    UseItem(UseItemData),
    UseItemOnEntity(UseItemOnEntityData),
    ReleaseItem(ReleaseItemData),
}

impl TransactionData {
    pub fn type_id(&self) -> u32 {
        match self {
            Self::Normal(_) => TYPE_NORMAL,
            Self::Mismatch => TYPE_MISMATCH,
            Self::UseItem(_) => TYPE_USE_ITEM,
            Self::UseItemOnEntity(_) => TYPE_USE_ITEM_ON_ENTITY,
            Self::ReleaseItem(_) => TYPE_RELEASE_ITEM,
        }
    }
}

/// Legacy slot bookkeeping some clients still attach to a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacySetItemSlot {
    pub container_id: u8,
    pub slots: Vec<u8>,
}

/// Parsed InventoryTransaction.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryTransaction {
    pub legacy_request_id: i32,
    pub legacy_set_item_slots: Vec<LegacySetItemSlot>,
    pub data: TransactionData,
}

impl InventoryTransaction {
    pub fn new(data: TransactionData) -> Self {
        Self {
            legacy_request_id: 0,
            legacy_set_item_slots: Vec::new(),
            data,
        }
    }
}

impl ProtoEncode for InventoryTransaction {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.legacy_request_id).proto_encode(buf);
        if self.legacy_request_id != 0 {
            VarUInt32(self.legacy_set_item_slots.len() as u32).proto_encode(buf);
            for entry in &self.legacy_set_item_slots {
                buf.put_u8(entry.container_id);
                write_bytes(buf, &entry.slots);
            }
        }
        VarUInt32(self.data.type_id()).proto_encode(buf);

        let no_actions: &[InventoryAction] = &[];
        let actions = match &self.data {
            TransactionData::Normal(actions) => actions.as_slice(),
            _ => no_actions,
        };
        VarUInt32(actions.len() as u32).proto_encode(buf);
        for action in actions {
            action.proto_encode(buf);
        }

        match &self.data {
            TransactionData::Normal(_) | TransactionData::Mismatch => {}
            TransactionData::UseItem(d) => {
                VarUInt32(d.action as u32).proto_encode(buf);
                d.block_position.proto_encode(buf);
                VarInt(d.face).proto_encode(buf);
                VarInt(d.hotbar_slot).proto_encode(buf);
                d.held_item.proto_encode(buf);
                d.player_position.proto_encode(buf);
                d.click_position.proto_encode(buf);
                VarUInt32(d.block_runtime_id).proto_encode(buf);
            }
            TransactionData::UseItemOnEntity(d) => {
                VarUInt64(d.target_runtime_id).proto_encode(buf);
                VarUInt32(d.action as u32).proto_encode(buf);
                VarInt(d.hotbar_slot).proto_encode(buf);
                d.held_item.proto_encode(buf);
                d.player_position.proto_encode(buf);
                d.click_position.proto_encode(buf);
            }
            TransactionData::ReleaseItem(d) => {
                VarUInt32(d.action).proto_encode(buf);
                VarInt(d.hotbar_slot).proto_encode(buf);
                d.held_item.proto_encode(buf);
                d.head_position.proto_encode(buf);
            }
        }
    }
}

impl ProtoDecode for InventoryTransaction {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let legacy_request_id = VarInt::proto_decode(buf)?.0;
        let mut legacy_set_item_slots = Vec::new();
        if legacy_request_id != 0 {
            let count = VarUInt32::proto_decode(buf)?.0;
            for _ in 0..count {
                legacy_set_item_slots.push(LegacySetItemSlot {
                    container_id: read_u8(buf)?,
                    slots: read_bytes(buf)?,
                });
            }
        }

        let transaction_type = VarUInt32::proto_decode(buf)?.0;

        let action_count = VarUInt32::proto_decode(buf)?.0;
        let mut actions = Vec::new();
        for _ in 0..action_count {
            actions.push(InventoryAction::proto_decode(buf)?);
        }

        let data = match transaction_type {
            TYPE_NORMAL => TransactionData::Normal(actions),
            TYPE_MISMATCH => TransactionData::Mismatch,
            TYPE_USE_ITEM => TransactionData::UseItem(UseItemData {
                action: UseItemAction::try_from(VarUInt32::proto_decode(buf)?.0)?,
                block_position: BlockPos::proto_decode(buf)?,
                face: VarInt::proto_decode(buf)?.0,
                hotbar_slot: VarInt::proto_decode(buf)?.0,
                held_item: NetworkItemStack::proto_decode(buf)?,
                player_position: Vec3::proto_decode(buf)?,
                click_position: Vec3::proto_decode(buf)?,
                block_runtime_id: VarUInt32::proto_decode(buf)?.0,
            }),
            TYPE_USE_ITEM_ON_ENTITY => TransactionData::UseItemOnEntity(UseItemOnEntityData {
                target_runtime_id: VarUInt64::proto_decode(buf)?.0,
                action: UseItemOnEntityAction::try_from(VarUInt32::proto_decode(buf)?.0)?,
                hotbar_slot: VarInt::proto_decode(buf)?.0,
                held_item: NetworkItemStack::proto_decode(buf)?,
                player_position: Vec3::proto_decode(buf)?,
                click_position: Vec3::proto_decode(buf)?,
            }),
            TYPE_RELEASE_ITEM => TransactionData::ReleaseItem(ReleaseItemData {
                action: VarUInt32::proto_decode(buf)?.0,
                hotbar_slot: VarInt::proto_decode(buf)?.0,
                held_item: NetworkItemStack::proto_decode(buf)?,
                head_position: Vec3::proto_decode(buf)?,
            }),
            t => {
                return Err(ProtoError::InvalidData(format!(
                    "unknown transaction type {t}"
                )))
            }
        };

        Ok(Self {
            legacy_request_id,
            legacy_set_item_slots,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn decode(buf: BytesMut) -> Result<InventoryTransaction, ProtoError> {
        InventoryTransaction::proto_decode(&mut buf.freeze())
    }

    fn swap_actions() -> Vec<InventoryAction> {
        let a = NetworkItemStack::new(1, 0, 1);
        let b = NetworkItemStack::new(2, 0, 1);
        vec![
            InventoryAction {
                source: InventorySource::Container { window_id: 0 },
                slot: 3,
                old_item: a.clone(),
                new_item: b.clone(),
            },
            InventoryAction {
                source: InventorySource::Container { window_id: 0 },
                slot: 5,
                old_item: b,
                new_item: a,
            },
        ]
    }

    #[test]
    fn decode_normal_actions() {
        let pkt = InventoryTransaction::new(TransactionData::Normal(swap_actions()));
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        let decoded = decode(buf).unwrap();
        let TransactionData::Normal(actions) = decoded.data else {
            panic!("expected normal transaction");
        };
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1].slot, 5);
        assert_eq!(actions[0].source.window_id(), Some(0));
    }

    #[test]
    fn decode_break_block_by_hand() {
        let mut buf = BytesMut::new();
        VarInt(0).proto_encode(&mut buf); // legacy request
        VarUInt32(TYPE_USE_ITEM).proto_encode(&mut buf);
        VarUInt32(0).proto_encode(&mut buf); // no actions
        VarUInt32(2).proto_encode(&mut buf); // BreakBlock
        BlockPos::new(10, 3, -5).proto_encode(&mut buf);
        VarInt(1).proto_encode(&mut buf); // face
        VarInt(0).proto_encode(&mut buf); // hotbar
        NetworkItemStack::empty().proto_encode(&mut buf);
        Vec3::ZERO.proto_encode(&mut buf);
        Vec3::new(0.5, 1.0, 0.5).proto_encode(&mut buf);
        VarUInt32(100).proto_encode(&mut buf);

        let TransactionData::UseItem(data) = decode(buf).unwrap().data else {
            panic!("expected use item");
        };
        assert_eq!(data.action, UseItemAction::BreakBlock);
        assert_eq!(data.block_position, BlockPos::new(10, 3, -5));
        assert_eq!(data.click_position, Vec3::new(0.5, 1.0, 0.5));
        assert_eq!(data.block_runtime_id, 100);
    }

    #[test]
    fn decode_attack() {
        let pkt = InventoryTransaction::new(TransactionData::UseItemOnEntity(UseItemOnEntityData {
            target_runtime_id: 7,
            action: UseItemOnEntityAction::Attack,
            hotbar_slot: 2,
            held_item: NetworkItemStack::new(268, 0, 1),
            player_position: Vec3::new(1.0, 2.0, 3.0),
            click_position: Vec3::ZERO,
        }));
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(decode(buf).unwrap(), pkt);
    }

    #[test]
    fn legacy_slots_are_skipped_over() {
        let pkt = InventoryTransaction {
            legacy_request_id: -2,
            legacy_set_item_slots: vec![LegacySetItemSlot {
                container_id: 124,
                slots: vec![0, 1],
            }],
            data: TransactionData::Mismatch,
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        let decoded = decode(buf).unwrap();
        assert_eq!(decoded.data, TransactionData::Mismatch);
        assert_eq!(decoded.legacy_set_item_slots[0].slots, vec![0, 1]);
    }

    #[test]
    fn non_container_source_has_no_window() {
        let mut buf = BytesMut::new();
        VarUInt32(2).proto_encode(&mut buf);
        VarUInt32(0).proto_encode(&mut buf);
        let source = InventorySource::proto_decode(&mut buf.freeze()).unwrap();
        assert_eq!(source, InventorySource::WorldInteraction { flags: 0 });
        assert_eq!(source.window_id(), None);
    }

    #[test]
    fn unknown_transaction_type() {
        let mut buf = BytesMut::new();
        VarInt(0).proto_encode(&mut buf);
        VarUInt32(9).proto_encode(&mut buf);
        VarUInt32(0).proto_encode(&mut buf);
        assert!(matches!(decode(buf), Err(ProtoError::InvalidData(_))));
    }

    #[test]
    fn unknown_use_item_action() {
        let mut buf = BytesMut::new();
        VarInt(0).proto_encode(&mut buf);
        VarUInt32(TYPE_USE_ITEM).proto_encode(&mut buf);
        VarUInt32(0).proto_encode(&mut buf);
        VarUInt32(7).proto_encode(&mut buf);
        assert!(decode(buf).is_err());
    }
}
