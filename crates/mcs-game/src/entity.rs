//! The in-world avatar a session drives.

use std::sync::Arc;

use mcs_proto::types::{BlockPos, Uuid, Vec3};

use crate::skin::Skin;
use crate::world::Face;

/// An entity that can be controlled by a connected client.
///
/// All methods take `&self`; implementors keep their own state behind
/// whatever synchronisation they need, since sessions call in from their own
/// tasks.
pub trait Controllable: Send + Sync {
    fn name(&self) -> String;
    /// Persistent identity, stable across connections.
    fn uuid(&self) -> Uuid;
    fn xuid(&self) -> String;
    fn skin(&self) -> Skin;

    fn position(&self) -> Vec3;
    fn yaw(&self) -> f32;
    fn pitch(&self) -> f32;

    /// Move by a relative offset.
    fn move_by(&self, delta: Vec3);
    /// Rotate by relative yaw and pitch.
    fn rotate_by(&self, yaw: f32, pitch: f32);

    fn start_sprinting(&self);
    fn stop_sprinting(&self);
    fn start_sneaking(&self);
    fn stop_sneaking(&self);

    fn respawn(&self);

    fn attack_entity(&self, target: &Arc<dyn Controllable>);
    fn use_item_on_entity(&self, target: &Arc<dyn Controllable>);
    fn break_block(&self, pos: BlockPos);
    /// Use the held item on the `face` of the block at `pos`; `click` is the
    /// offset of the click within the block.
    fn use_item_on_block(&self, pos: BlockPos, face: Face, click: Vec3);
    /// Use the held item in the air.
    fn use_item(&self);
}
