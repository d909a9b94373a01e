//! Cross-session message passing.
//!
//! Sessions never lock each other. Anything one session wants another to do
//! travels as a [`SessionCommand`] through the target's queue and runs on the
//! target's own task.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use mcs_game::{Controllable, ItemStack, Viewer, World};
use mcs_proto::packets::InboundPacket;
use mcs_proto::types::{Uuid, Vec3};

use crate::session::{Session, SessionCommand};

/// The sending side of a session's command queue.
#[derive(Clone)]
pub struct SessionHandle {
    uuid: Uuid,
    entity: Arc<dyn Controllable>,
    commands: UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub(crate) fn new(entity: Arc<dyn Controllable>, commands: UnboundedSender<SessionCommand>) -> Self {
        Self {
            uuid: entity.uuid(),
            entity,
            commands,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn entity(&self) -> &Arc<dyn Controllable> {
        &self.entity
    }

    /// Queue `cmd`. Returns `false` if the session is gone, in which case
    /// the command is dropped.
    pub fn send(&self, cmd: SessionCommand) -> bool {
        self.commands.send(cmd).is_ok()
    }

    /// Queue a packet decoded from the client.
    pub fn send_packet(&self, packet: InboundPacket) -> bool {
        self.send(SessionCommand::Packet(packet))
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

impl Viewer for SessionHandle {
    fn viewer_id(&self) -> Uuid {
        self.uuid
    }

    fn view_entity_items(
        &self,
        entity: &Arc<dyn Controllable>,
        main_hand: &ItemStack,
        off_hand: &ItemStack,
    ) {
        self.send(SessionCommand::ViewEntityItems {
            entity: entity.clone(),
            main_hand: main_hand.clone(),
            off_hand: off_hand.clone(),
        });
    }
}

/// Every joined session, keyed by the UUID of its entity.
#[derive(Default)]
pub struct SessionHub {
    sessions: RwLock<HashMap<Uuid, Arc<SessionHandle>>>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session and exchange player list entries with every peer.
    pub fn join(&self, handle: SessionHandle) {
        let handle = Arc::new(handle);
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        handle.send(SessionCommand::AddToPlayerList(handle.entity.clone()));
        for peer in sessions.values() {
            peer.send(SessionCommand::AddToPlayerList(handle.entity.clone()));
            handle.send(SessionCommand::AddToPlayerList(peer.entity.clone()));
        }
        sessions.insert(handle.uuid, handle.clone());
        info!(
            "{} joined ({} online)",
            handle.entity.name(),
            sessions.len()
        );
    }

    /// Remove a session and take its entity off every peer's player list.
    pub fn leave(&self, uuid: &Uuid) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let Some(handle) = sessions.remove(uuid) else {
            return;
        };
        for peer in sessions.values() {
            peer.send(SessionCommand::RemoveFromPlayerList(*uuid));
        }
        info!("{} left ({} online)", handle.entity.name(), sessions.len());
    }

    pub fn get(&self, uuid: &Uuid) -> Option<Arc<SessionHandle>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(uuid)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Join `session`, run it until it disconnects, then leave.
    pub async fn serve(self: Arc<Self>, session: Arc<Session>) {
        let uuid = session.uuid();
        self.join(session.handle());
        session.run().await;
        self.leave(&uuid);
    }
}

/// Every joined session sees every position.
impl World for SessionHub {
    fn viewers(&self, _position: Vec3) -> Vec<Arc<dyn Viewer>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|h| h.clone() as Arc<dyn Viewer>)
            .collect()
    }
}
