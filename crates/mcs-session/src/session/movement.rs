use tracing::debug;

use mcs_proto::packets::respawn::{STATE_CLIENT_READY_TO_SPAWN, STATE_READY_TO_SPAWN};
use mcs_proto::packets::{
    MovePlayer, NetworkChunkPublisherUpdate, OutboundPacket, PlayerAction, PlayerActionType,
    Respawn,
};
use mcs_proto::types::{BlockPos, Vec3};

use super::dispatch::expect_self;
use super::{lock, Session};
use crate::error::SessionError;
use crate::registry::SELF_HANDLE;

impl Session {
    /// Apply the client's absolute position and rotation as a delta against
    /// the tracked values, then recentre the loaded chunks on it.
    pub(super) fn handle_move_player(&self, pk: &MovePlayer) -> Result<(), SessionError> {
        expect_self(pk.entity_runtime_id)?;
        if !pk.position.is_finite() || !pk.yaw.is_finite() || !pk.pitch.is_finite() {
            return Err(SessionError::Validation(format!(
                "non-finite movement to {}",
                pk.position
            )));
        }

        self.entity.move_by(pk.position - self.entity.position());
        self.entity
            .rotate_by(pk.yaw - self.entity.yaw(), pk.pitch - self.entity.pitch());

        let (from, to) = {
            let mut loader = lock(&self.chunk_loader);
            let from = loader.chunk();
            loader.move_to(pk.position);
            (from, loader.chunk())
        };
        if from != to {
            debug!("{}: entered chunk {to:?}", self.name);
        }
        self.send_chunk_publisher(pk.position);
        Ok(())
    }

    /// Tell the client around which point chunks are published.
    fn send_chunk_publisher(&self, position: Vec3) {
        self.send(OutboundPacket::ChunkPublisherUpdate(
            NetworkChunkPublisherUpdate {
                position: BlockPos::truncated(position),
                radius: lock(&self.chunk_loader).radius() * 16,
            },
        ));
    }

    pub(super) fn handle_player_action(&self, pk: &PlayerAction) -> Result<(), SessionError> {
        expect_self(pk.entity_runtime_id)?;
        match pk.action {
            PlayerActionType::StartSprint => self.entity.start_sprinting(),
            PlayerActionType::StopSprint => self.entity.stop_sprinting(),
            PlayerActionType::StartSneak => self.entity.start_sneaking(),
            PlayerActionType::StopSneak => self.entity.stop_sneaking(),
            PlayerActionType::Other(code) => {
                debug!("{}: ignoring player action {code}", self.name);
            }
        }
        Ok(())
    }

    pub(super) fn handle_respawn(&self, pk: &Respawn) -> Result<(), SessionError> {
        expect_self(pk.entity_runtime_id)?;
        if pk.state != STATE_CLIENT_READY_TO_SPAWN {
            return Err(SessionError::ProtocolViolation(format!(
                "respawn state must be {STATE_CLIENT_READY_TO_SPAWN}, got {}",
                pk.state
            )));
        }
        self.entity.respawn();
        self.send(OutboundPacket::Respawn(Respawn {
            position: self.entity.position(),
            state: STATE_READY_TO_SPAWN,
            entity_runtime_id: SELF_HANDLE,
        }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::test_util::{drain, new_session, new_session_with};
    use mcs_game::Controllable;

    #[test]
    fn move_applies_delta_and_publishes_chunks() {
        let (session, mut rx, player) = new_session();
        player.set_pose(Vec3::new(1.0, 64.0, 1.0), 10.0, 5.0);

        let target = Vec3::new(20.5, 65.0, -3.5);
        session
            .handle_move_player(&MovePlayer::new(1, target, 90.0, -15.0))
            .unwrap();

        assert_eq!(player.position(), target);
        assert_eq!(player.yaw(), 90.0);
        assert_eq!(player.pitch(), -15.0);
        assert_eq!(session.chunk_loader().position(), target);
        assert_eq!(session.chunk_loader().chunk(), (1, -1));
        assert_eq!(
            drain(&mut rx),
            vec![OutboundPacket::ChunkPublisherUpdate(
                NetworkChunkPublisherUpdate {
                    position: BlockPos::new(20, 65, -3),
                    radius: 8 * 16,
                }
            )]
        );
    }

    #[test]
    fn publisher_radius_follows_config() {
        let mut config = SessionConfig::default();
        config.session.chunk_radius = 4;
        let (session, mut rx, _) = new_session_with(&config);
        session
            .handle_move_player(&MovePlayer::new(1, Vec3::new(0.0, 64.0, 0.0), 0.0, 0.0))
            .unwrap();
        assert_eq!(session.chunk_loader().radius(), 4);
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [OutboundPacket::ChunkPublisherUpdate(pk)] if pk.radius == 64
        ));
    }

    #[test]
    fn move_for_other_handle_is_rejected() {
        let (session, mut rx, player) = new_session();
        let err = session
            .handle_move_player(&MovePlayer::new(2, Vec3::new(9.0, 9.0, 9.0), 0.0, 0.0))
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(player.position(), Vec3::ZERO);
        assert_eq!(session.chunk_loader().position(), Vec3::ZERO);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn nan_position_is_rejected() {
        let (session, _rx, player) = new_session();
        let err = session
            .handle_move_player(&MovePlayer::new(1, Vec3::new(f32::NAN, 0.0, 0.0), 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
        assert_eq!(player.position(), Vec3::ZERO);
    }

    #[test]
    fn sprint_and_sneak_toggles() {
        let (session, _rx, player) = new_session();
        for action in [PlayerActionType::StartSprint, PlayerActionType::StartSneak] {
            session
                .handle_player_action(&PlayerAction::new(1, action))
                .unwrap();
        }
        let state = player.state();
        assert!(state.sprinting && state.sneaking);

        session
            .handle_player_action(&PlayerAction::new(1, PlayerActionType::StopSprint))
            .unwrap();
        session
            .handle_player_action(&PlayerAction::new(1, PlayerActionType::Other(7)))
            .unwrap();
        let state = player.state();
        assert!(!state.sprinting && state.sneaking);
    }

    #[test]
    fn respawn_requires_client_ready_state() {
        let (session, mut rx, player) = new_session();
        let early = Respawn {
            position: Vec3::ZERO,
            state: STATE_READY_TO_SPAWN,
            entity_runtime_id: 1,
        };
        assert!(session.handle_respawn(&early).unwrap_err().is_fatal());
        assert_eq!(player.state().respawns, 0);

        player.set_pose(Vec3::new(0.0, 80.0, 0.0), 0.0, 0.0);
        session
            .handle_respawn(&Respawn {
                state: STATE_CLIENT_READY_TO_SPAWN,
                ..early
            })
            .unwrap();
        assert_eq!(player.state().respawns, 1);
        assert_eq!(
            drain(&mut rx),
            vec![OutboundPacket::Respawn(Respawn {
                position: Vec3::new(0.0, 80.0, 0.0),
                state: STATE_READY_TO_SPAWN,
                entity_runtime_id: 1,
            })]
        );
    }
}
