use bytes::Buf;
use tracing::{debug, warn};

use mcs_proto::packets::InboundPacket;

use super::Session;
use crate::error::SessionError;
use crate::registry::SELF_HANDLE;

impl Session {
    /// Handle a decoded packet, logging any rejection. Protocol violations
    /// close the connection when the config says so.
    pub fn process(&self, packet: InboundPacket) {
        let packet_id = packet.packet_id();
        if let Err(e) = self.handle_packet(packet) {
            self.reject(packet_id, e);
        }
    }

    /// Decode a framed packet and handle it. Packets outside the handled set
    /// are ignored.
    pub fn process_framed(&self, buf: &mut impl Buf) {
        match InboundPacket::decode_framed(buf) {
            Ok(packet) => self.process(packet),
            Err(mcs_proto::error::ProtoError::UnknownPacketId(id)) => {
                debug!("{}: ignoring packet 0x{id:02X}", self.name);
            }
            Err(e) => self.reject(0, SessionError::from(e)),
        }
    }

    fn reject(&self, packet_id: u32, e: SessionError) {
        if e.is_fatal() {
            warn!("{}: packet 0x{packet_id:02X} rejected: {e}", self.name);
            if self.settings.disconnect_on_protocol_violation {
                self.disconnect(&e.to_string());
            }
        } else {
            debug!("{}: packet 0x{packet_id:02X} rejected: {e}", self.name);
        }
    }

    /// Route a packet to its handler.
    pub fn handle_packet(&self, packet: InboundPacket) -> Result<(), SessionError> {
        match packet {
            InboundPacket::MovePlayer(pk) => self.handle_move_player(&pk),
            InboundPacket::MobEquipment(pk) => self.handle_mob_equipment(&pk),
            InboundPacket::PlayerAction(pk) => self.handle_player_action(&pk),
            InboundPacket::ModalFormResponse(pk) => self.handle_modal_form_response(&pk),
            InboundPacket::Respawn(pk) => self.handle_respawn(&pk),
            InboundPacket::InventoryTransaction(pk) => self.handle_inventory_transaction(&pk),
        }
    }
}

/// Fail unless `handle` is the session's own entity.
pub(super) fn expect_self(handle: u64) -> Result<(), SessionError> {
    if handle != SELF_HANDLE {
        return Err(SessionError::ProtocolViolation(format!(
            "incorrect entity runtime handle {handle}: must be {SELF_HANDLE}"
        )));
    }
    Ok(())
}
