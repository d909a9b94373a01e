use std::net::SocketAddr;
use std::sync::Arc;

use tracing::debug;

use mcs_game::form::Form;
use mcs_game::{Controllable, GameMode};
use mcs_proto::packets::{GameRuleValue, ModalFormRequest, ModalFormResponse, OutboundPacket};
use mcs_proto::types::{Uuid, Vec3};

use super::Session;
use crate::broadcast;
use crate::error::SessionError;
use crate::forms;
use crate::registry::{player_list_add, player_list_remove, SELF_HANDLE};

impl Session {
    /// Send `form` to the client and remember it until it is answered.
    /// Returns the form ID.
    pub fn send_form(&self, form: impl Into<Form>) -> u32 {
        let form = form.into();
        let form_data = form.to_json();
        let (form_id, evicted) = self.forms.register(form);
        if let Some(old) = evicted {
            debug!("{}: dropped unanswered form {old}", self.name);
        }
        self.send(OutboundPacket::ModalFormRequest(ModalFormRequest {
            form_id,
            form_data,
        }));
        form_id
    }

    pub(super) fn handle_modal_form_response(
        &self,
        pk: &ModalFormResponse,
    ) -> Result<(), SessionError> {
        let form = self
            .forms
            .take(pk.form_id)
            .ok_or(SessionError::UnknownForm(pk.form_id))?;
        if forms::is_cancelled(&pk.response_data) {
            debug!("{}: form {} closed", self.name, pk.form_id);
            return Ok(());
        }
        form.submit(&pk.response_data, &self.entity)?;
        Ok(())
    }

    /// Make `entity` known to the client. The session's own entity is always
    /// announced under handle 1; others are announced once.
    pub fn add_to_player_list(&self, entity: Arc<dyn Controllable>) {
        let (handle, added) = self.registry.add(entity.clone());
        if !added && handle != SELF_HANDLE {
            return;
        }
        self.send(OutboundPacket::PlayerList(player_list_add(
            entity.as_ref(),
            handle,
        )));
    }

    pub fn remove_from_player_list(&self, uuid: &Uuid) {
        if self.registry.remove(uuid).is_some() {
            self.send(OutboundPacket::PlayerList(player_list_remove(*uuid)));
        }
    }

    pub fn send_health(&self, current: f32, max: f32) {
        self.send(broadcast::health(current, max));
    }

    pub fn send_speed(&self, speed: f32) {
        self.send(broadcast::speed(speed));
    }

    pub fn send_velocity(&self, velocity: Vec3) {
        self.send(broadcast::velocity(velocity));
    }

    pub fn send_game_mode(&self, mode: GameMode) {
        for packet in broadcast::game_mode(mode) {
            self.send(packet);
        }
    }

    pub fn send_game_rules(&self, rules: Vec<(String, GameRuleValue)>) {
        self.send(broadcast::game_rules(rules));
    }

    pub fn enable_coordinates(&self, enabled: bool) {
        self.send(broadcast::show_coordinates(enabled));
    }

    /// Ask the client to connect to another server.
    pub fn transfer(&self, addr: SocketAddr) {
        self.send(broadcast::transfer(addr));
    }
}
