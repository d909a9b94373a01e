//! Disconnect (0x05): Server → Client.

use bytes::BufMut;

use crate::codec::{write_string, ProtoEncode};

/// Closes the connection, optionally showing a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disconnect {
    /// `None` hides the disconnect screen.
    pub message: Option<String>,
}

impl Disconnect {
    /// An empty message hides the disconnect screen.
    pub fn new(message: &str) -> Self {
        Self {
            message: (!message.is_empty()).then(|| message.to_string()),
        }
    }
}

impl ProtoEncode for Disconnect {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        match &self.message {
            Some(msg) => {
                buf.put_u8(0);
                write_string(buf, msg);
            }
            None => buf.put_u8(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn visible_message() {
        let mut buf = BytesMut::new();
        Disconnect::new("Server closed").proto_encode(&mut buf);
        assert_eq!(buf[0], 0);
        assert_eq!(buf[1], 13);
        assert_eq!(buf.len(), 2 + 13);
    }

    #[test]
    fn empty_message_hides_screen() {
        let pkt = Disconnect::new("");
        assert!(pkt.message.is_none());
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[1]);
    }
}
