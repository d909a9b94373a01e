//! InventorySlot (0x32): Server → Client.
//!
//! Updates a single slot in one of the player's windows.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::item_stack::NetworkItemStack;
use crate::types::VarUInt32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySlot {
    pub window_id: u32,
    pub slot: u32,
    pub item: NetworkItemStack,
}

impl ProtoEncode for InventorySlot {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.window_id).proto_encode(buf);
        VarUInt32(self.slot).proto_encode(buf);
        self.item.proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn offhand_window_id() {
        let pkt = InventorySlot {
            window_id: 119,
            slot: 0,
            item: NetworkItemStack::empty(),
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[119, 0, 0]);
    }
}
