//! NetworkChunkPublisherUpdate (0x79): Server → Client.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::types::{BlockPos, VarUInt32};

/// Tells the client around which point, and how far (in blocks), chunks will
/// be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkChunkPublisherUpdate {
    pub position: BlockPos,
    pub radius: u32,
}

impl ProtoEncode for NetworkChunkPublisherUpdate {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        self.position.proto_encode(buf);
        VarUInt32(self.radius).proto_encode(buf);
    }
}
