//! Item identity and stacks.

use std::fmt;

/// Name of the item that represents an empty slot.
pub const AIR: &str = "minecraft:air";

/// Maximum count of a stack unless the item says otherwise.
pub const DEFAULT_MAX_STACK_SIZE: u32 = 64;

/// The identity of an item: its namespaced name plus metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemType {
    pub name: String,
    pub meta: i16,
}

impl ItemType {
    pub fn new(name: impl Into<String>, meta: i16) -> Self {
        Self {
            name: name.into(),
            meta,
        }
    }

    pub fn air() -> Self {
        Self::new(AIR, 0)
    }

    pub fn is_air(&self) -> bool {
        self.name == AIR
    }
}

/// A number of items of one type occupying a single slot.
///
/// Stacks are replaced wholesale; nothing mutates a stack in place once it
/// sits in an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemStack {
    item: ItemType,
    count: u32,
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}

impl ItemStack {
    /// A stack of `count` items. A zero count or an air item yields an
    /// empty stack.
    pub fn new(item: ItemType, count: u32) -> Self {
        if count == 0 || item.is_air() {
            return Self::empty();
        }
        Self { item, count }
    }

    pub fn empty() -> Self {
        Self {
            item: ItemType::air(),
            count: 0,
        }
    }

    pub fn item(&self) -> &ItemType {
        &self.item
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether both stacks hold the same kind of item, ignoring count.
    /// Empty stacks are comparable with each other.
    pub fn comparable(&self, other: &ItemStack) -> bool {
        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }
        self.item == other.item
    }

    /// The same stack with a different count.
    pub fn with_count(&self, count: u32) -> Self {
        Self::new(self.item.clone(), count)
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        write!(f, "{}:{} x{}", self.item.name, self.item.meta, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stone(count: u32) -> ItemStack {
        ItemStack::new(ItemType::new("minecraft:stone", 0), count)
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(stone(0).is_empty());
        assert_eq!(stone(0), ItemStack::empty());
        assert!(ItemStack::new(ItemType::air(), 5).is_empty());
    }

    #[test]
    fn comparable_ignores_count() {
        assert!(stone(1).comparable(&stone(64)));
        assert_ne!(stone(1), stone(64));
        let granite = ItemStack::new(ItemType::new("minecraft:stone", 1), 1);
        assert!(!stone(1).comparable(&granite));
    }

    #[test]
    fn empty_only_comparable_with_empty() {
        assert!(ItemStack::empty().comparable(&ItemStack::empty()));
        assert!(!ItemStack::empty().comparable(&stone(1)));
    }

    #[test]
    fn display() {
        assert_eq!(stone(3).to_string(), "minecraft:stone:0 x3");
        assert_eq!(ItemStack::empty().to_string(), "empty");
    }
}
