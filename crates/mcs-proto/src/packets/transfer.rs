//! Transfer (0x55): Server → Client.
//!
//! Sends the client to another server.

use bytes::BufMut;

use crate::codec::{write_string, ProtoEncode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub address: String,
    pub port: u16,
}

impl Transfer {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }
}

impl ProtoEncode for Transfer {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_string(buf, &self.address);
        buf.put_u16_le(self.port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn port_is_little_endian() {
        let mut buf = BytesMut::new();
        Transfer::new("127.0.0.1", 19132).proto_encode(&mut buf);
        assert_eq!(buf[0], 9);
        assert_eq!(&buf[10..], &19132u16.to_le_bytes());
    }
}
