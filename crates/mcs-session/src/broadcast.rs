//! Translation of game state into the packets that tell a client about it.

use std::net::SocketAddr;

use mcs_game::GameMode;
use mcs_proto::packets::adventure_settings::flag;
use mcs_proto::packets::game_rules_changed::SHOW_COORDINATES;
use mcs_proto::packets::set_player_game_type::{
    GAME_TYPE_ADVENTURE, GAME_TYPE_CREATIVE, GAME_TYPE_CREATIVE_SPECTATOR, GAME_TYPE_SURVIVAL,
};
use mcs_proto::packets::{
    AdventureSettings, Disconnect, GameRule, GameRuleValue, GameRulesChanged, OutboundPacket,
    SetEntityMotion, SetPlayerGameType, Transfer, UpdateAttributes,
};
use mcs_proto::types::Vec3;

use crate::registry::SELF_HANDLE;

/// Maximum health when the entity does not say otherwise.
pub const DEFAULT_MAX_HEALTH: f32 = 20.0;

pub fn health(current: f32, max: f32) -> OutboundPacket {
    OutboundPacket::UpdateAttributes(UpdateAttributes::health(SELF_HANDLE, current, max))
}

pub fn speed(value: f32) -> OutboundPacket {
    OutboundPacket::UpdateAttributes(UpdateAttributes::speed(SELF_HANDLE, value))
}

pub fn velocity(velocity: Vec3) -> OutboundPacket {
    OutboundPacket::SetEntityMotion(SetEntityMotion {
        entity_runtime_id: SELF_HANDLE,
        velocity,
    })
}

/// Ability flags and game type ID for `mode`.
pub fn game_mode_flags(mode: GameMode) -> (u32, i32) {
    match mode {
        GameMode::Creative => (flag::ALLOW_FLIGHT, GAME_TYPE_CREATIVE),
        GameMode::Adventure => (flag::WORLD_IMMUTABLE, GAME_TYPE_ADVENTURE),
        GameMode::Spectator => (
            flag::WORLD_IMMUTABLE | flag::ALLOW_FLIGHT | flag::MUTED | flag::NO_CLIP | flag::NO_PVP,
            GAME_TYPE_CREATIVE_SPECTATOR,
        ),
        GameMode::Survival => (0, GAME_TYPE_SURVIVAL),
    }
}

/// Adventure settings followed by the game type.
pub fn game_mode(mode: GameMode) -> [OutboundPacket; 2] {
    let (flags, game_type) = game_mode_flags(mode);
    [
        OutboundPacket::AdventureSettings(AdventureSettings::member(flags, SELF_HANDLE as i64)),
        OutboundPacket::SetPlayerGameType(SetPlayerGameType { game_type }),
    ]
}

pub fn game_rules<I, S>(rules: I) -> OutboundPacket
where
    I: IntoIterator<Item = (S, GameRuleValue)>,
    S: Into<String>,
{
    OutboundPacket::GameRulesChanged(GameRulesChanged {
        rules: rules
            .into_iter()
            .map(|(name, value)| GameRule::new(name, value))
            .collect(),
    })
}

pub fn show_coordinates(enabled: bool) -> OutboundPacket {
    game_rules([(SHOW_COORDINATES, GameRuleValue::Bool(enabled))])
}

pub fn transfer(addr: SocketAddr) -> OutboundPacket {
    OutboundPacket::Transfer(Transfer::new(addr.ip().to_string(), addr.port()))
}

pub fn disconnect(message: &str) -> OutboundPacket {
    OutboundPacket::Disconnect(Disconnect::new(message))
}
