//! World-side collaborators of a session: who is watching, which chunks are
//! visible, and block faces.

use std::sync::Arc;

use mcs_proto::types::{Uuid, Vec3};

use crate::entity::Controllable;
use crate::item::ItemStack;

/// Something that observes entities, usually another player's session.
pub trait Viewer: Send + Sync {
    /// Identity of the viewer. A session never shows its own entity's
    /// items to a viewer with its own identity.
    fn viewer_id(&self) -> Uuid;

    /// Show the items `entity` holds in its main hand and offhand.
    fn view_entity_items(
        &self,
        entity: &Arc<dyn Controllable>,
        main_hand: &ItemStack,
        off_hand: &ItemStack,
    );
}

/// The shared world as seen by a session.
pub trait World: Send + Sync {
    /// Every viewer that can currently see `position`.
    fn viewers(&self, position: Vec3) -> Vec<Arc<dyn Viewer>>;
}

/// A side of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Face {
    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::Down),
            1 => Some(Self::Up),
            2 => Some(Self::North),
            3 => Some(Self::South),
            4 => Some(Self::West),
            5 => Some(Self::East),
            _ => None,
        }
    }
}

/// Tracks the point around which a session has chunks loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkLoader {
    position: Vec3,
    radius: u32,
}

impl ChunkLoader {
    /// A loader at `position` with a radius of `radius` chunks.
    pub fn new(position: Vec3, radius: u32) -> Self {
        Self { position, radius }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// The chunk the loader is centred on.
    pub fn chunk(&self) -> (i32, i32) {
        (
            (self.position.x.floor() as i32) >> 4,
            (self.position.z.floor() as i32) >> 4,
        )
    }

    /// Reposition the loader.
    pub fn move_to(&mut self, position: Vec3) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_of_negative_position() {
        let mut loader = ChunkLoader::new(Vec3::ZERO, 8);
        assert_eq!(loader.chunk(), (0, 0));
        loader.move_to(Vec3::new(-0.5, 70.0, 33.0));
        assert_eq!(loader.chunk(), (-1, 2));
        assert_eq!(loader.radius(), 8);
    }

    #[test]
    fn faces() {
        assert_eq!(Face::from_i32(1), Some(Face::Up));
        assert_eq!(Face::from_i32(5), Some(Face::East));
        assert_eq!(Face::from_i32(6), None);
        assert_eq!(Face::from_i32(-1), None);
    }
}
