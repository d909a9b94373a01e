//! Inventory transaction validation and execution.
//!
//! A client proposes a list of slot changes, each claiming what the slot
//! currently holds and what it should hold afterwards. [`verify`] proves the
//! whole list is consistent with the server's inventories and moves items
//! around without creating or destroying any. Only a proven transaction can
//! be executed, and executing it cannot fail.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::error;

use mcs_game::{Inventory, InventoryError, ItemCodec, ItemStack};
use mcs_proto::packets::InventoryAction;

use crate::error::SessionError;

/// Maps protocol window IDs to the inventories a session owns.
pub trait WindowResolver {
    fn inventory_by_window(&self, window_id: i32) -> Option<&Inventory>;
}

struct SlotChange<'a> {
    inventory: &'a Inventory,
    window_id: i32,
    slot: usize,
    item: ItemStack,
}

/// A transaction that passed [`verify`] and may be executed.
pub struct VerifiedTransaction<'a> {
    changes: Vec<SlotChange<'a>>,
}

impl VerifiedTransaction<'_> {
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Whether executing writes to `slot` of `window_id`.
    pub fn touches(&self, window_id: i32, slot: usize) -> bool {
        self.changes
            .iter()
            .any(|c| c.window_id == window_id && c.slot == slot)
    }

    /// Write every claimed new item into its slot.
    pub fn execute(self) {
        for change in self.changes {
            if let Err(e) = change.inventory.set_item(change.slot, change.item) {
                // Slots were bounds-checked during verification.
                error!(
                    "verified transaction failed on window {} slot {}: {e}",
                    change.window_id, change.slot
                );
            }
        }
    }
}

/// Check `actions` against the live inventories.
///
/// Every claimed old item must match the slot exactly, and the claimed new
/// items must be the same multiset as the claimed old ones. Nothing is
/// modified; the first failure rejects the whole list. A slot may be named
/// only once, since every claim is checked against the state before any
/// change is applied.
pub fn verify<'a, W>(
    windows: &'a W,
    codec: &dyn ItemCodec,
    actions: &[InventoryAction],
    scratch_capacity: usize,
) -> Result<VerifiedTransaction<'a>, SessionError>
where
    W: WindowResolver + ?Sized,
{
    let scratch = Inventory::new(scratch_capacity);
    let mut changes = Vec::with_capacity(actions.len());
    let mut seen = HashSet::with_capacity(actions.len());

    for action in actions {
        let window_id = action
            .source
            .window_id()
            .ok_or(SessionError::UnsupportedSource(action.source))?;
        let inventory = windows
            .inventory_by_window(window_id)
            .ok_or(SessionError::UnknownInventory(window_id))?;

        let slot = action.slot as usize;
        if !seen.insert((window_id, slot)) {
            return Err(SessionError::Validation(format!(
                "window {window_id} slot {} named twice in one transaction",
                action.slot
            )));
        }
        let actual = inventory
            .item(slot)
            .map_err(|_| SessionError::SlotOutOfRange {
                window_id,
                slot: action.slot,
            })?;
        let claimed = codec.decode_stack(&action.old_item);
        if actual != claimed {
            return Err(SessionError::StaleClientState {
                window_id,
                slot: action.slot,
                actual: actual.to_string(),
                claimed: claimed.to_string(),
            });
        }
        scratch.add_item(&claimed).map_err(|e| match e {
            InventoryError::NotEnoughSpace(item) => SessionError::InternalCapacity(item),
            other => SessionError::InternalCapacity(other.to_string()),
        })?;

        changes.push(SlotChange {
            inventory,
            window_id,
            slot,
            item: codec.decode_stack(&action.new_item),
        });
    }

    for change in &changes {
        scratch
            .remove_item(&change.item)
            .map_err(|_| SessionError::UnbalancedTransaction(format!("{} appeared", change.item)))?;
    }
    if !scratch.is_empty() {
        let left: Vec<String> = scratch
            .items()
            .iter()
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        return Err(SessionError::UnbalancedTransaction(format!(
            "{} disappeared",
            left.join(", ")
        )));
    }

    Ok(VerifiedTransaction { changes })
}

/// Marks a transaction in progress for as long as it lives.
pub struct TransactionGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> TransactionGuard<'a> {
    /// `None` if another transaction already holds the flag.
    pub fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
