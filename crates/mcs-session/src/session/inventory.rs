use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::debug;

use mcs_game::{Controllable, Face, ItemStack};
use mcs_proto::packets::{
    window, InventorySlot, InventoryTransaction, MobEquipment, OutboundPacket, TransactionData,
    UseItemAction, UseItemData, UseItemOnEntityAction, UseItemOnEntityData,
};

use super::dispatch::expect_self;
use super::Session;
use crate::error::SessionError;
use crate::transaction::{self, TransactionGuard};

/// Number of hotbar slots; the held slot is always below this.
pub const HOTBAR_SIZE: u32 = 9;

impl Session {
    /// Index of the held hotbar slot.
    pub fn held_slot(&self) -> u32 {
        self.held_slot.load(Ordering::Acquire)
    }

    /// Items in the main hand and offhand.
    pub fn held_items(&self) -> (ItemStack, ItemStack) {
        let main = self
            .inventory
            .item(self.held_slot() as usize)
            .unwrap_or_default();
        let off = self.offhand.item(0).unwrap_or_default();
        (main, off)
    }

    pub(super) fn handle_mob_equipment(&self, pk: &MobEquipment) -> Result<(), SessionError> {
        expect_self(pk.entity_runtime_id)?;
        if u32::from(pk.inventory_slot) >= HOTBAR_SIZE {
            return Err(SessionError::Validation(format!(
                "slot exceeds hotbar range 0-8: slot is {}",
                pk.inventory_slot
            )));
        }
        if i32::from(pk.window_id) != window::INVENTORY {
            return Err(SessionError::Validation(format!(
                "only main inventory can hold items: window is {}",
                pk.window_id
            )));
        }
        self.held_slot
            .store(u32::from(pk.inventory_slot), Ordering::Release);
        self.broadcast_held_items();
        Ok(())
    }

    /// Show every viewer of this entity what it is holding.
    fn broadcast_held_items(&self) {
        let (main, off) = self.held_items();
        let own = self.uuid();
        for viewer in self.world.viewers(self.entity.position()) {
            if viewer.viewer_id() != own {
                viewer.view_entity_items(&self.entity, &main, &off);
            }
        }
    }

    /// Show the client what `entity` is holding, if it knows the entity.
    pub fn view_entity_items(
        &self,
        entity: &Arc<dyn Controllable>,
        main_hand: &ItemStack,
        off_hand: &ItemStack,
    ) {
        let Some(handle) = self.registry.handle_of(&entity.uuid()) else {
            debug!("{}: not viewing items of unknown {}", self.name, entity.name());
            return;
        };
        if handle == crate::registry::SELF_HANDLE {
            return;
        }
        for (item, window_id) in [(main_hand, window::INVENTORY), (off_hand, window::OFFHAND)] {
            self.send(OutboundPacket::MobEquipment(MobEquipment {
                entity_runtime_id: handle,
                item: self.codec.encode_stack(item),
                inventory_slot: 0,
                hotbar_slot: 0,
                window_id: window_id as u8,
            }));
        }
    }

    /// Listener for the main inventory and offhand.
    pub(super) fn on_slot_change(&self, window_id: i32, slot: usize, item: &ItemStack) {
        // The client already knows about slots it changed itself, and
        // viewers are shown the held items once the transaction is applied.
        if self.transaction_in_progress() {
            return;
        }
        self.send(OutboundPacket::InventorySlot(InventorySlot {
            window_id: window_id as u32,
            slot: slot as u32,
            item: self.codec.encode_stack(item),
        }));
        if self.is_held(window_id, slot) {
            self.broadcast_held_items();
        }
    }

    fn is_held(&self, window_id: i32, slot: usize) -> bool {
        window_id == window::OFFHAND
            || (window_id == window::INVENTORY && slot as u32 == self.held_slot())
    }

    pub(super) fn handle_inventory_transaction(
        &self,
        pk: &InventoryTransaction,
    ) -> Result<(), SessionError> {
        match &pk.data {
            TransactionData::Normal(actions) => {
                if actions.is_empty() {
                    return Ok(());
                }
                let guard = TransactionGuard::acquire(&self.in_transaction).ok_or_else(|| {
                    SessionError::Validation("another transaction is in progress".into())
                })?;
                let verified = transaction::verify(
                    self,
                    self.codec.as_ref(),
                    actions,
                    self.settings.transaction_scratch_capacity,
                )?;
                let held_changed = verified.touches(window::INVENTORY, self.held_slot() as usize)
                    || verified.touches(window::OFFHAND, 0);
                verified.execute();
                drop(guard);
                if held_changed {
                    self.broadcast_held_items();
                }
                Ok(())
            }
            TransactionData::UseItemOnEntity(data) => self.handle_use_item_on_entity(data),
            TransactionData::UseItem(data) => {
                self.handle_use_item(data);
                Ok(())
            }
            TransactionData::Mismatch | TransactionData::ReleaseItem(_) => {
                debug!(
                    "{}: ignoring transaction of type {}",
                    self.name,
                    pk.data.type_id()
                );
                Ok(())
            }
        }
    }

    fn handle_use_item_on_entity(&self, data: &UseItemOnEntityData) -> Result<(), SessionError> {
        let target = self
            .registry
            .entity(data.target_runtime_id)
            .ok_or(SessionError::EntityNotFound(data.target_runtime_id))?;
        match data.action {
            UseItemOnEntityAction::Interact => self.entity.use_item_on_entity(&target),
            UseItemOnEntityAction::Attack => self.entity.attack_entity(&target),
        }
        Ok(())
    }

    fn handle_use_item(&self, data: &UseItemData) {
        match data.action {
            UseItemAction::BreakBlock => self.entity.break_block(data.block_position),
            UseItemAction::ClickBlock => match Face::from_i32(data.face) {
                Some(face) => {
                    self.entity
                        .use_item_on_block(data.block_position, face, data.click_position)
                }
                None => debug!("{}: click on invalid face {}", self.name, data.face),
            },
            UseItemAction::ClickAir => self.entity.use_item(),
        }
    }
}
