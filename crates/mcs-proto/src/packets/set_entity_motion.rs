//! SetEntityMotion (0x28): Server → Client.
//!
//! Pushes a velocity onto an entity.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::types::{VarUInt64, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct SetEntityMotion {
    pub entity_runtime_id: u64,
    pub velocity: Vec3,
}

impl ProtoEncode for SetEntityMotion {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.entity_runtime_id).proto_encode(buf);
        self.velocity.proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_knockback() {
        let pkt = SetEntityMotion {
            entity_runtime_id: 1,
            velocity: Vec3::new(0.4, 0.4, 0.0),
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(buf.len(), 13);
        assert_eq!(&buf[1..5], &0.4f32.to_le_bytes());
    }
}
