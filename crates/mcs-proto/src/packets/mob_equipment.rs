//! MobEquipment (0x1F): Bidirectional.
//!
//! Client → Server when the player scrolls the hotbar; Server → Client to
//! show what an entity is holding in either hand.

use bytes::{Buf, BufMut};

use crate::codec::{ProtoDecode, ProtoEncode};
use crate::error::{ensure_remaining, ProtoError};
use crate::item_stack::NetworkItemStack;
use crate::types::VarUInt64;

/// Equipment change for a mob or player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobEquipment {
    pub entity_runtime_id: u64,
    pub item: NetworkItemStack,
    pub inventory_slot: u8,
    /// Hotbar slot (0-8).
    pub hotbar_slot: u8,
    /// 0 = main inventory, 119 = offhand.
    pub window_id: u8,
}

impl ProtoEncode for MobEquipment {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.entity_runtime_id).proto_encode(buf);
        self.item.proto_encode(buf);
        buf.put_u8(self.inventory_slot);
        buf.put_u8(self.hotbar_slot);
        buf.put_u8(self.window_id);
    }
}

impl ProtoDecode for MobEquipment {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let entity_runtime_id = VarUInt64::proto_decode(buf)?.0;
        let item = NetworkItemStack::proto_decode(buf)?;
        ensure_remaining(buf, 3)?;
        Ok(Self {
            entity_runtime_id,
            item,
            inventory_slot: buf.get_u8(),
            hotbar_slot: buf.get_u8(),
            window_id: buf.get_u8(),
        })
    }
}
