//! Per-connection session state.
//!
//! A [`Session`] is driven by its own command queue: decoded client packets
//! and notifications from other sessions are processed one at a time by
//! [`Session::run`]. Everything the session wants the client to see goes to
//! its outbound queue, which the transport drains.

mod dispatch;
mod inventory;
mod movement;
mod player;

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use mcs_game::{ChunkLoader, Controllable, Inventory, ItemCodec, ItemStack, World};
use mcs_proto::packets::{window, InboundPacket, OutboundPacket};
use mcs_proto::types::Uuid;

use crate::broadcast;
use crate::config::{SessionConfig, SessionSection};
use crate::forms::FormCorrelator;
use crate::hub::SessionHandle;
use crate::registry::EntityViewRegistry;
use crate::transaction::WindowResolver;

/// Work queued for a session.
pub enum SessionCommand {
    /// A packet decoded from the client.
    Packet(InboundPacket),
    /// Make an entity known to the client.
    AddToPlayerList(Arc<dyn Controllable>),
    RemoveFromPlayerList(Uuid),
    /// Show the client what `entity` is holding.
    ViewEntityItems {
        entity: Arc<dyn Controllable>,
        main_hand: ItemStack,
        off_hand: ItemStack,
    },
    Disconnect(String),
}

pub struct Session {
    name: String,
    entity: Arc<dyn Controllable>,
    world: Arc<dyn World>,
    codec: Arc<dyn ItemCodec>,
    settings: SessionSection,

    inventory: Inventory,
    offhand: Inventory,
    ui: Inventory,
    held_slot: AtomicU32,
    in_transaction: AtomicBool,

    registry: EntityViewRegistry,
    forms: FormCorrelator,
    chunk_loader: Mutex<ChunkLoader>,

    outbound: Mutex<Option<UnboundedSender<OutboundPacket>>>,
    commands: UnboundedSender<SessionCommand>,
    command_rx: Mutex<Option<UnboundedReceiver<SessionCommand>>>,
    closed: Notify,
}

// Guarded values are replaced wholesale, so a poisoned lock is still usable.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Session {
    /// Create a session for `entity`. The returned receiver yields every
    /// packet meant for the client, and closes once the session disconnects.
    pub fn new(
        entity: Arc<dyn Controllable>,
        world: Arc<dyn World>,
        codec: Arc<dyn ItemCodec>,
        config: &SessionConfig,
    ) -> (Arc<Self>, UnboundedReceiver<OutboundPacket>) {
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let sizes = &config.inventory;

        let session = Arc::new_cyclic(|weak: &Weak<Session>| {
            let main_weak = weak.clone();
            let offhand_weak = weak.clone();
            Session {
                name: entity.name(),
                registry: EntityViewRegistry::new(entity.clone()),
                chunk_loader: Mutex::new(ChunkLoader::new(
                    entity.position(),
                    config.session.chunk_radius,
                )),
                inventory: Inventory::with_listener(
                    sizes.main_size,
                    Box::new(move |slot: usize, item: &ItemStack| {
                        if let Some(s) = main_weak.upgrade() {
                            s.on_slot_change(window::INVENTORY, slot, item);
                        }
                    }),
                )
                .with_stack_sizes(codec.clone()),
                offhand: Inventory::with_listener(
                    sizes.offhand_size,
                    Box::new(move |slot: usize, item: &ItemStack| {
                        if let Some(s) = offhand_weak.upgrade() {
                            s.on_slot_change(window::OFFHAND, slot, item);
                        }
                    }),
                )
                .with_stack_sizes(codec.clone()),
                ui: Inventory::new(sizes.ui_size).with_stack_sizes(codec.clone()),
                held_slot: AtomicU32::new(0),
                in_transaction: AtomicBool::new(false),
                forms: FormCorrelator::new(config.session.max_pending_forms),
                settings: config.session.clone(),
                entity,
                world,
                codec,
                outbound: Mutex::new(Some(out_tx)),
                commands: cmd_tx,
                command_rx: Mutex::new(Some(cmd_rx)),
                closed: Notify::new(),
            }
        });
        info!("Session created for {}", session.name);
        (session, out_rx)
    }

    /// A handle other sessions use to reach this one.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle::new(self.entity.clone(), self.commands.clone())
    }

    /// Process queued commands until the session disconnects. Only the
    /// first call does anything.
    pub async fn run(self: Arc<Self>) {
        let Some(mut rx) = lock(&self.command_rx).take() else {
            warn!("Session for {} is already running", self.name);
            return;
        };
        while !self.is_closed() {
            tokio::select! {
                cmd = rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = self.closed.notified() => break,
            }
        }
        debug!("Session loop for {} finished", self.name);
    }

    pub fn handle_command(&self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::Packet(packet) => self.process(packet),
            SessionCommand::AddToPlayerList(entity) => self.add_to_player_list(entity),
            SessionCommand::RemoveFromPlayerList(uuid) => self.remove_from_player_list(&uuid),
            SessionCommand::ViewEntityItems {
                entity,
                main_hand,
                off_hand,
            } => self.view_entity_items(&entity, &main_hand, &off_hand),
            SessionCommand::Disconnect(message) => self.disconnect(&message),
        }
    }

    /// Queue a packet for the client. Does nothing once disconnected.
    pub fn send(&self, packet: OutboundPacket) {
        if let Some(tx) = lock(&self.outbound).as_ref() {
            let _ = tx.send(packet);
        }
    }

    /// Send `Disconnect` and close the outbound queue. An empty message hides
    /// the disconnect screen. Later calls are no-ops.
    pub fn disconnect(&self, message: &str) {
        let Some(tx) = lock(&self.outbound).take() else {
            return;
        };
        let _ = tx.send(broadcast::disconnect(message));
        drop(tx);
        info!("Disconnected {}: {message:?}", self.name);
        self.closed.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.outbound).is_none()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uuid(&self) -> Uuid {
        self.entity.uuid()
    }

    pub fn entity(&self) -> &Arc<dyn Controllable> {
        &self.entity
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn offhand(&self) -> &Inventory {
        &self.offhand
    }

    pub fn ui_inventory(&self) -> &Inventory {
        &self.ui
    }

    pub fn registry(&self) -> &EntityViewRegistry {
        &self.registry
    }

    pub fn pending_forms(&self) -> usize {
        self.forms.len()
    }

    pub fn chunk_loader(&self) -> ChunkLoader {
        lock(&self.chunk_loader).clone()
    }

    fn transaction_in_progress(&self) -> bool {
        self.in_transaction.load(Ordering::Acquire)
    }
}

impl WindowResolver for Session {
    fn inventory_by_window(&self, window_id: i32) -> Option<&Inventory> {
        match window_id {
            window::INVENTORY => Some(&self.inventory),
            window::OFFHAND => Some(&self.offhand),
            window::UI => Some(&self.ui),
            _ => None,
        }
    }
}
