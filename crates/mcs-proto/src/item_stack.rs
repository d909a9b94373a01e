//! Item stacks as they travel on the wire.
//!
//! The session converts these to domain stacks through an item codec; this
//! type carries only what the client sent, unvalidated.

use bytes::{Buf, BufMut};

use crate::codec::{read_string, write_string, ProtoDecode, ProtoEncode};
use crate::error::{ensure_remaining, ProtoError};
use crate::types::VarInt;

/// A single item stack in the Bedrock protocol.
///
/// `network_id == 0` means the slot is empty (air).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkItemStack {
    /// Item network ID. 0 = air/empty.
    pub network_id: i32,
    /// Item damage/variant metadata.
    pub metadata: i16,
    /// Number of items in this stack.
    pub count: u8,
    /// Raw user data (NBT) carried verbatim.
    pub user_data: Vec<u8>,
    /// Blocks this item can be placed on (adventure mode).
    pub can_place_on: Vec<String>,
    /// Blocks this item can destroy (adventure mode).
    pub can_destroy: Vec<String>,
}

impl NetworkItemStack {
    /// An empty slot (air).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a plain item stack without user data.
    pub fn new(network_id: i32, metadata: i16, count: u8) -> Self {
        Self {
            network_id,
            metadata,
            count,
            ..Self::default()
        }
    }

    /// Whether this slot is empty.
    pub fn is_empty(&self) -> bool {
        self.network_id == 0 || self.count == 0
    }
}

/// Wire format:
/// ```text
/// VarInt(network_id)           : 0 = empty, nothing follows
/// VarInt(metadata << 8 | count)
/// i16_le(user_data_len) + bytes
/// VarInt(can_place_on_count) + strings
/// VarInt(can_destroy_count) + strings
/// ```
impl ProtoEncode for NetworkItemStack {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.network_id).proto_encode(buf);
        if self.network_id == 0 {
            return;
        }
        VarInt((i32::from(self.metadata) << 8) | i32::from(self.count)).proto_encode(buf);
        buf.put_i16_le(self.user_data.len() as i16);
        buf.put_slice(&self.user_data);

        VarInt(self.can_place_on.len() as i32).proto_encode(buf);
        for s in &self.can_place_on {
            write_string(buf, s);
        }
        VarInt(self.can_destroy.len() as i32).proto_encode(buf);
        for s in &self.can_destroy {
            write_string(buf, s);
        }
    }
}

impl ProtoDecode for NetworkItemStack {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let network_id = VarInt::proto_decode(buf)?.0;
        if network_id == 0 {
            return Ok(Self::empty());
        }
        let aux = VarInt::proto_decode(buf)?.0;

        ensure_remaining(buf, 2)?;
        let user_data_len = buf.get_i16_le();
        if user_data_len < 0 {
            return Err(ProtoError::InvalidData(format!(
                "negative item user data length {user_data_len}"
            )));
        }
        ensure_remaining(buf, user_data_len as usize)?;
        let user_data = buf.copy_to_bytes(user_data_len as usize).to_vec();

        let can_place_on = read_string_list(buf)?;
        let can_destroy = read_string_list(buf)?;

        Ok(Self {
            network_id,
            metadata: (aux >> 8) as i16,
            count: (aux & 0xFF) as u8,
            user_data,
            can_place_on,
            can_destroy,
        })
    }
}

fn read_string_list(buf: &mut impl Buf) -> Result<Vec<String>, ProtoError> {
    let count = VarInt::proto_decode(buf)?.0;
    if count < 0 {
        return Err(ProtoError::InvalidData(format!(
            "negative string list length {count}"
        )));
    }
    // Each string needs at least its length byte.
    ensure_remaining(buf, count as usize)?;
    (0..count).map(|_| read_string(buf)).collect()
}
