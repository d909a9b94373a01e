//! Item identity ↔ network ID mapping.
//!
//! The session never looks up network IDs on its own; it is handed an
//! [`ItemCodec`] and converts stacks through it.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use mcs_proto::item_stack::NetworkItemStack;

use crate::item::{ItemStack, ItemType, DEFAULT_MAX_STACK_SIZE};

/// Converts item identities to and from their network representation.
pub trait ItemCodec: Send + Sync {
    /// Network ID for `item`, or `None` if the item is not known.
    fn to_network(&self, item: &ItemType) -> Option<i32>;

    /// Item for a network ID and metadata, or `None` if the ID is not known.
    fn from_network(&self, network_id: i32, meta: i16) -> Option<ItemType>;

    fn max_stack_size(&self, item: &ItemType) -> u32;

    /// Convert a stack for the wire. Unknown items are sent as air.
    fn encode_stack(&self, stack: &ItemStack) -> NetworkItemStack {
        if stack.is_empty() {
            return NetworkItemStack::empty();
        }
        match self.to_network(stack.item()) {
            Some(id) => NetworkItemStack::new(
                id,
                stack.item().meta,
                stack.count().min(u32::from(u8::MAX)) as u8,
            ),
            None => NetworkItemStack::empty(),
        }
    }

    /// Convert a stack received from a client. Unknown network IDs decode
    /// to air.
    fn decode_stack(&self, stack: &NetworkItemStack) -> ItemStack {
        if stack.is_empty() {
            return ItemStack::empty();
        }
        match self.from_network(stack.network_id, stack.metadata) {
            Some(item) => ItemStack::new(item, u32::from(stack.count)),
            None => {
                debug!("unknown item network id {}", stack.network_id);
                ItemStack::empty()
            }
        }
    }
}

/// Registration data for one item.
#[derive(Debug, Clone, Deserialize)]
struct ItemInfo {
    runtime_id: i32,
    #[serde(default = "default_max_stack_size")]
    max_stack_size: u32,
}

fn default_max_stack_size() -> u32 {
    DEFAULT_MAX_STACK_SIZE
}

/// Table of known items.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    by_name: HashMap<String, ItemInfo>,
    by_id: HashMap<i32, String>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a JSON object keyed by item name:
    /// `{"minecraft:stone": {"runtime_id": 1, "max_stack_size": 64}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, ItemInfo> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for (name, info) in raw {
            registry.register(name, info.runtime_id, info.max_stack_size);
        }
        Ok(registry)
    }

    /// Register an item. Re-registering a name replaces its entry.
    pub fn register(&mut self, name: impl Into<String>, runtime_id: i32, max_stack_size: u32) {
        let name = name.into();
        if let Some(old) = self.by_name.get(&name) {
            self.by_id.remove(&old.runtime_id);
        }
        self.by_id.insert(runtime_id, name.clone());
        self.by_name.insert(
            name,
            ItemInfo {
                runtime_id,
                max_stack_size,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl ItemCodec for ItemRegistry {
    fn to_network(&self, item: &ItemType) -> Option<i32> {
        self.by_name.get(&item.name).map(|info| info.runtime_id)
    }

    fn from_network(&self, network_id: i32, meta: i16) -> Option<ItemType> {
        self.by_id
            .get(&network_id)
            .map(|name| ItemType::new(name.clone(), meta))
    }

    fn max_stack_size(&self, item: &ItemType) -> u32 {
        self.by_name
            .get(&item.name)
            .map(|info| info.max_stack_size)
            .unwrap_or(DEFAULT_MAX_STACK_SIZE)
    }
}
