//! Game-side collaborators of the session core: items, inventories, the
//! controllable entity, world views, skins and forms.

pub mod entity;
pub mod form;
pub mod gamemode;
pub mod inventory;
pub mod item;
pub mod item_registry;
pub mod skin;
pub mod world;

pub use entity::Controllable;
pub use gamemode::GameMode;
pub use inventory::{Inventory, InventoryError};
pub use item::{ItemStack, ItemType};
pub use item_registry::{ItemCodec, ItemRegistry};
pub use world::{ChunkLoader, Face, Viewer, World};
