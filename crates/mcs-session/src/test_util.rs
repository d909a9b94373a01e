//! Fakes shared by the unit tests.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedReceiver;

use mcs_game::skin::Skin;
use mcs_game::{Controllable, Face, ItemCodec, ItemRegistry, ItemStack, ItemType, Viewer, World};
use mcs_proto::item_stack::NetworkItemStack;
use mcs_proto::packets::OutboundPacket;
use mcs_proto::types::{BlockPos, Uuid, Vec3};

use crate::config::SessionConfig;
use crate::session::Session;

pub const ITEM_A: i32 = 1;
pub const ITEM_B: i32 = 2;

fn item_name(network_id: i32) -> &'static str {
    match network_id {
        ITEM_A => "test:a",
        _ => "test:b",
    }
}

pub fn codec() -> Arc<dyn ItemCodec> {
    let mut registry = ItemRegistry::new();
    registry.register(item_name(ITEM_A), ITEM_A, 64);
    registry.register(item_name(ITEM_B), ITEM_B, 64);
    Arc::new(registry)
}

pub fn item(network_id: i32, count: u32) -> ItemStack {
    ItemStack::new(ItemType::new(item_name(network_id), 0), count)
}

pub fn wire(network_id: i32, count: u8) -> NetworkItemStack {
    NetworkItemStack::new(network_id, 0, count)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub sprinting: bool,
    pub sneaking: bool,
    pub respawns: u32,
}

/// A controllable that records what it is asked to do.
pub struct TestPlayer {
    name: String,
    uuid: Uuid,
    state: Mutex<PlayerState>,
    calls: Mutex<Vec<String>>,
}

impl TestPlayer {
    pub fn new(name: &str, uuid: Uuid) -> Self {
        Self {
            name: name.into(),
            uuid,
            state: Mutex::new(PlayerState::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state.lock().unwrap().clone()
    }

    pub fn set_pose(&self, position: Vec3, yaw: f32, pitch: f32) {
        let mut state = self.state.lock().unwrap();
        state.position = position;
        state.yaw = yaw;
        state.pitch = pitch;
    }

    /// Interactions with entities, blocks and items, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Controllable for TestPlayer {
    fn name(&self) -> String {
        self.name.clone()
    }
    fn uuid(&self) -> Uuid {
        self.uuid
    }
    fn xuid(&self) -> String {
        String::new()
    }
    fn skin(&self) -> Skin {
        Skin::default()
    }
    fn position(&self) -> Vec3 {
        self.state.lock().unwrap().position
    }
    fn yaw(&self) -> f32 {
        self.state.lock().unwrap().yaw
    }
    fn pitch(&self) -> f32 {
        self.state.lock().unwrap().pitch
    }
    fn move_by(&self, delta: Vec3) {
        let mut state = self.state.lock().unwrap();
        state.position = state.position + delta;
    }
    fn rotate_by(&self, yaw: f32, pitch: f32) {
        let mut state = self.state.lock().unwrap();
        state.yaw += yaw;
        state.pitch += pitch;
    }
    fn start_sprinting(&self) {
        self.state.lock().unwrap().sprinting = true;
    }
    fn stop_sprinting(&self) {
        self.state.lock().unwrap().sprinting = false;
    }
    fn start_sneaking(&self) {
        self.state.lock().unwrap().sneaking = true;
    }
    fn stop_sneaking(&self) {
        self.state.lock().unwrap().sneaking = false;
    }
    fn respawn(&self) {
        self.state.lock().unwrap().respawns += 1;
    }
    fn attack_entity(&self, target: &Arc<dyn Controllable>) {
        self.record(format!("attack {}", target.name()));
    }
    fn use_item_on_entity(&self, target: &Arc<dyn Controllable>) {
        self.record(format!("interact {}", target.name()));
    }
    fn break_block(&self, pos: BlockPos) {
        self.record(format!("break {},{},{}", pos.x, pos.y, pos.z));
    }
    fn use_item_on_block(&self, pos: BlockPos, face: Face, _click: Vec3) {
        self.record(format!("use on {},{},{} {face:?}", pos.x, pos.y, pos.z));
    }
    fn use_item(&self) {
        self.record("use".into());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeenItems {
    pub entity: Uuid,
    pub main_hand: ItemStack,
    pub off_hand: ItemStack,
}

/// A viewer that remembers every item view it was shown.
pub struct RecordingViewer {
    id: Uuid,
    seen: Mutex<Vec<SeenItems>>,
}

impl RecordingViewer {
    pub fn new(id: Uuid) -> Arc<Self> {
        Arc::new(Self {
            id,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<SeenItems> {
        self.seen.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.seen.lock().unwrap().clear();
    }
}

impl Viewer for RecordingViewer {
    fn viewer_id(&self) -> Uuid {
        self.id
    }

    fn view_entity_items(
        &self,
        entity: &Arc<dyn Controllable>,
        main_hand: &ItemStack,
        off_hand: &ItemStack,
    ) {
        self.seen.lock().unwrap().push(SeenItems {
            entity: entity.uuid(),
            main_hand: main_hand.clone(),
            off_hand: off_hand.clone(),
        });
    }
}

/// A world with a fixed set of viewers, all of which see everything.
#[derive(Default)]
pub struct TestWorld {
    viewers: Mutex<Vec<Arc<dyn Viewer>>>,
}

impl TestWorld {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_viewer(&self, viewer: Arc<dyn Viewer>) {
        self.viewers.lock().unwrap().push(viewer);
    }
}

impl World for TestWorld {
    fn viewers(&self, _position: Vec3) -> Vec<Arc<dyn Viewer>> {
        self.viewers.lock().unwrap().clone()
    }
}

pub type TestSession = (
    Arc<Session>,
    UnboundedReceiver<OutboundPacket>,
    Arc<TestPlayer>,
);

fn build(name: &str, id: u64, world: Arc<dyn World>, config: &SessionConfig) -> TestSession {
    let player = Arc::new(TestPlayer::new(name, Uuid::new(0, id)));
    let (session, rx) = Session::new(player.clone(), world, codec(), config);
    (session, rx, player)
}

/// A session for "Steve" in an empty world with the default config.
pub fn new_session() -> TestSession {
    new_session_in(TestWorld::new())
}

pub fn new_session_with(config: &SessionConfig) -> TestSession {
    build("Steve", 1, TestWorld::new(), config)
}

pub fn new_session_in(world: Arc<TestWorld>) -> TestSession {
    build("Steve", 1, world, &SessionConfig::default())
}

pub fn new_session_for(name: &str, id: u64, world: Arc<dyn World>) -> TestSession {
    build(name, id, world, &SessionConfig::default())
}

/// Everything queued for the client so far.
pub fn drain(rx: &mut UnboundedReceiver<OutboundPacket>) -> Vec<OutboundPacket> {
    let mut out = Vec::new();
    while let Ok(packet) = rx.try_recv() {
        out.push(packet);
    }
    out
}
