//! Fixed-capacity slot containers.
//!
//! An [`Inventory`] guards its slots with a mutex and reports every changed
//! slot to an optional listener. The listener runs after the lock is
//! released, so it may read the inventory again.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::item::{ItemStack, DEFAULT_MAX_STACK_SIZE};
use crate::item_registry::ItemCodec;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("slot {slot} out of range for inventory of size {size}")]
    SlotOutOfRange { slot: usize, size: usize },

    #[error("not enough space to add {0}")]
    NotEnoughSpace(String),

    #[error("not enough items to remove {0}")]
    NotEnoughItems(String),
}

/// Called with `(slot, new item)` for every slot that changed.
pub type SlotListener = Box<dyn Fn(usize, &ItemStack) + Send + Sync>;

pub struct Inventory {
    slots: Mutex<Vec<ItemStack>>,
    stack_sizes: Option<Arc<dyn ItemCodec>>,
    listener: Option<SlotListener>,
}

impl std::fmt::Debug for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inventory")
            .field("slots", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl Inventory {
    /// An empty inventory of `size` slots without a listener.
    pub fn new(size: usize) -> Self {
        Self {
            slots: Mutex::new(vec![ItemStack::empty(); size]),
            stack_sizes: None,
            listener: None,
        }
    }

    /// An empty inventory whose slot changes are reported to `listener`.
    pub fn with_listener(size: usize, listener: SlotListener) -> Self {
        Self {
            listener: Some(listener),
            ..Self::new(size)
        }
    }

    /// Take per-item stack limits from `codec` instead of the default of
    /// 64.
    pub fn with_stack_sizes(mut self, codec: Arc<dyn ItemCodec>) -> Self {
        self.stack_sizes = Some(codec);
        self
    }

    fn max_stack_size(&self, item: &ItemStack) -> u32 {
        self.stack_sizes
            .as_ref()
            .map_or(DEFAULT_MAX_STACK_SIZE, |c| c.max_stack_size(item.item()))
    }

    // Slots are replaced wholesale, so a poisoned lock still guards
    // consistent data.
    fn lock(&self) -> MutexGuard<'_, Vec<ItemStack>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, changed: &[(usize, ItemStack)]) {
        if let Some(listener) = &self.listener {
            for (slot, item) in changed {
                listener(*slot, item);
            }
        }
    }

    pub fn size(&self) -> usize {
        self.lock().len()
    }

    /// The item in `slot`.
    pub fn item(&self, slot: usize) -> Result<ItemStack, InventoryError> {
        let slots = self.lock();
        slots
            .get(slot)
            .cloned()
            .ok_or(InventoryError::SlotOutOfRange {
                slot,
                size: slots.len(),
            })
    }

    /// Replace the item in `slot`.
    pub fn set_item(&self, slot: usize, item: ItemStack) -> Result<(), InventoryError> {
        {
            let mut slots = self.lock();
            let size = slots.len();
            let target = slots
                .get_mut(slot)
                .ok_or(InventoryError::SlotOutOfRange { slot, size })?;
            *target = item.clone();
        }
        self.notify(&[(slot, item)]);
        Ok(())
    }

    /// Add `item`, topping up comparable stacks first and then filling empty
    /// slots. Nothing changes if the whole stack does not fit.
    pub fn add_item(&self, item: &ItemStack) -> Result<(), InventoryError> {
        if item.is_empty() {
            return Ok(());
        }
        let max = self.max_stack_size(item);
        let changed = {
            let mut slots = self.lock();
            let mut remaining = item.count();
            let mut changed = Vec::new();

            let candidates = slots
                .iter()
                .enumerate()
                .filter(|(_, s)| !s.is_empty() && s.comparable(item))
                .chain(slots.iter().enumerate().filter(|(_, s)| s.is_empty()))
                .map(|(i, _)| i)
                .collect::<Vec<_>>();

            for i in candidates {
                if remaining == 0 {
                    break;
                }
                let current = slots[i].count();
                let fit = max.saturating_sub(current).min(remaining);
                if fit == 0 {
                    continue;
                }
                remaining -= fit;
                changed.push((i, item.with_count(current + fit)));
            }
            if remaining > 0 {
                return Err(InventoryError::NotEnoughSpace(item.to_string()));
            }
            for (i, stack) in &changed {
                slots[*i] = stack.clone();
            }
            changed
        };
        self.notify(&changed);
        Ok(())
    }

    /// Remove `item.count()` items comparable with `item`, spread over as
    /// many slots as needed. Nothing changes if there are not enough.
    pub fn remove_item(&self, item: &ItemStack) -> Result<(), InventoryError> {
        if item.is_empty() {
            return Ok(());
        }
        let changed = {
            let mut slots = self.lock();
            let mut remaining = item.count();
            let mut changed = Vec::new();

            for (i, stack) in slots.iter().enumerate() {
                if remaining == 0 {
                    break;
                }
                if stack.is_empty() || !stack.comparable(item) {
                    continue;
                }
                let taken = stack.count().min(remaining);
                remaining -= taken;
                changed.push((i, stack.with_count(stack.count() - taken)));
            }
            if remaining > 0 {
                return Err(InventoryError::NotEnoughItems(item.to_string()));
            }
            for (i, stack) in &changed {
                slots[*i] = stack.clone();
            }
            changed
        };
        self.notify(&changed);
        Ok(())
    }

    /// Whether every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().iter().all(ItemStack::is_empty)
    }

    /// A snapshot of all slots.
    pub fn items(&self) -> Vec<ItemStack> {
        self.lock().clone()
    }
}
