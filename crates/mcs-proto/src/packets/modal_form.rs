//! ModalFormRequest (0x64): Server → Client.
//! ModalFormResponse (0x65): Client → Server.
//!
//! Forms travel as JSON text; the response carries the raw JSON the client
//! produced, or the literal `null` when the player closed the form.

use bytes::{Buf, BufMut};

use crate::codec::{read_bytes, write_bytes, write_string, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::VarUInt32;

/// A server-initiated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalFormRequest {
    pub form_id: u32,
    /// JSON-encoded form.
    pub form_data: String,
}

impl ProtoEncode for ModalFormRequest {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.form_id).proto_encode(buf);
        write_string(buf, &self.form_data);
    }
}

/// The client's answer to a [`ModalFormRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalFormResponse {
    pub form_id: u32,
    /// Raw response bytes. Kept as bytes so malformed UTF-8 surfaces as a
    /// form decode failure rather than a packet decode failure.
    pub response_data: Vec<u8>,
}

impl ProtoEncode for ModalFormResponse {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.form_id).proto_encode(buf);
        write_bytes(buf, &self.response_data);
    }
}

impl ProtoDecode for ModalFormResponse {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            form_id: VarUInt32::proto_decode(buf)?.0,
            response_data: read_bytes(buf)?,
        })
    }
}
