//! Per-session runtime handles for the entities a client can see.
//!
//! The client refers to entities by small integers that only mean something
//! on its own connection. Handle 1 is always the session's own entity; every
//! other entity gets the next value of a counter that never goes back.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mcs_game::skin::{AnimationKind, Image, Skin};
use mcs_game::Controllable;
use mcs_proto::packets::player_list::{
    ANIMATION_BODY_128X128, ANIMATION_BODY_32X32, ANIMATION_HEAD,
};
use mcs_proto::packets::{PlayerList, PlayerListEntry, SkinAnimation, SkinData, SkinImage};
use mcs_proto::types::Uuid;

/// Runtime handle of the session's own entity.
pub const SELF_HANDLE: u64 = 1;

#[derive(Default)]
struct Maps {
    by_handle: HashMap<u64, Arc<dyn Controllable>>,
    by_uuid: HashMap<Uuid, u64>,
}

pub struct EntityViewRegistry {
    owner: Uuid,
    maps: Mutex<Maps>,
    last_handle: AtomicU64,
}

impl EntityViewRegistry {
    /// A registry where handle 1 resolves to `owner`.
    pub fn new(owner: Arc<dyn Controllable>) -> Self {
        let mut maps = Maps::default();
        let uuid = owner.uuid();
        maps.by_uuid.insert(uuid, SELF_HANDLE);
        maps.by_handle.insert(SELF_HANDLE, owner);
        Self {
            owner: uuid,
            maps: Mutex::new(maps),
            last_handle: AtomicU64::new(SELF_HANDLE),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Maps> {
        self.maps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `entity` and return its handle, plus whether it was new.
    /// An entity that is already known keeps its handle.
    pub fn add(&self, entity: Arc<dyn Controllable>) -> (u64, bool) {
        let uuid = entity.uuid();
        let mut maps = self.lock();
        if let Some(&handle) = maps.by_uuid.get(&uuid) {
            return (handle, false);
        }
        let handle = self.last_handle.fetch_add(1, Ordering::Relaxed) + 1;
        maps.by_uuid.insert(uuid, handle);
        maps.by_handle.insert(handle, entity);
        (handle, true)
    }

    /// Forget the entity with `uuid`, returning the handle it had. The
    /// owner is never removed.
    pub fn remove(&self, uuid: &Uuid) -> Option<u64> {
        if *uuid == self.owner {
            return None;
        }
        let mut maps = self.lock();
        let handle = maps.by_uuid.remove(uuid)?;
        maps.by_handle.remove(&handle);
        Some(handle)
    }

    pub fn entity(&self, handle: u64) -> Option<Arc<dyn Controllable>> {
        self.lock().by_handle.get(&handle).cloned()
    }

    pub fn handle_of(&self, uuid: &Uuid) -> Option<u64> {
        self.lock().by_uuid.get(uuid).copied()
    }

    /// Number of entities known, the owner included.
    pub fn len(&self) -> usize {
        self.lock().by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A player list "add" for `entity`, known to the receiving client as
/// `handle`.
pub fn player_list_add(entity: &dyn Controllable, handle: u64) -> PlayerList {
    PlayerList::Add(vec![PlayerListEntry {
        uuid: entity.uuid(),
        entity_unique_id: handle as i64,
        username: entity.name(),
        xuid: entity.xuid(),
        platform_chat_id: String::new(),
        build_platform: 0,
        skin: skin_data(&entity.skin()),
        host: false,
    }])
}

pub fn player_list_remove(uuid: Uuid) -> PlayerList {
    PlayerList::Remove(vec![uuid])
}

fn random_id() -> String {
    Uuid::from_random_bits(rand::random(), rand::random()).to_string()
}

fn image(img: &Image) -> SkinImage {
    SkinImage {
        width: img.width,
        height: img.height,
        data: img.pix.clone(),
    }
}

/// Snapshot of `skin` in its wire form. Skin, cape and full IDs are fresh
/// on every call.
pub fn skin_data(skin: &Skin) -> SkinData {
    let animations = skin
        .animations
        .iter()
        .map(|anim| SkinAnimation {
            image: image(&anim.image),
            animation_type: match anim.kind {
                AnimationKind::Head => ANIMATION_HEAD,
                AnimationKind::Body32x32 => ANIMATION_BODY_32X32,
                AnimationKind::Body128x128 => ANIMATION_BODY_128X128,
            },
            frame_count: anim.frame_count as f32,
            expression_type: 0,
        })
        .collect();

    SkinData {
        skin_id: random_id(),
        resource_patch: skin.model_config.encode(),
        image: image(&skin.image),
        animations,
        cape: image(&skin.cape),
        geometry: skin.model.clone(),
        persona: skin.persona,
        cape_id: random_id(),
        full_id: random_id(),
        ..SkinData::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::TestPlayer;
    use mcs_game::skin::{Animation, ModelConfig};

    fn player(n: u64) -> Arc<dyn Controllable> {
        Arc::new(TestPlayer::new(&format!("p{n}"), Uuid::new(0, n)))
    }

    #[test]
    fn handle_one_is_owner() {
        let owner = player(1);
        let registry = EntityViewRegistry::new(owner.clone());
        let resolved = registry.entity(SELF_HANDLE).unwrap();
        assert_eq!(resolved.uuid(), owner.uuid());
        assert_eq!(registry.handle_of(&owner.uuid()), Some(SELF_HANDLE));
        assert_eq!(registry.add(owner), (SELF_HANDLE, false));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn handles_increase_and_never_repeat() {
        let registry = EntityViewRegistry::new(player(1));
        let (h2, new) = registry.add(player(2));
        assert!(new);
        assert_eq!(h2, 2);
        let (h3, _) = registry.add(player(3));
        assert_eq!(h3, 3);

        assert_eq!(registry.remove(&Uuid::new(0, 2)), Some(2));
        assert!(registry.entity(2).is_none());
        let (again, new) = registry.add(player(2));
        assert!(new);
        assert_eq!(again, 4);
    }

    #[test]
    fn readd_keeps_handle() {
        let registry = EntityViewRegistry::new(player(1));
        let (h, _) = registry.add(player(7));
        assert_eq!(registry.add(player(7)), (h, false));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn owner_cannot_be_removed() {
        let registry = EntityViewRegistry::new(player(1));
        assert_eq!(registry.remove(&Uuid::new(0, 1)), None);
        assert!(registry.entity(SELF_HANDLE).is_some());
        assert_eq!(registry.remove(&Uuid::new(0, 99)), None);
    }

    #[test]
    fn skin_snapshot() {
        let skin = Skin {
            image: Image::new(64, 64, vec![0; 64 * 64 * 4]),
            model_config: ModelConfig {
                default: "geometry.humanoid".into(),
                animated_face: String::new(),
            },
            model: "{}".into(),
            animations: vec![Animation {
                kind: AnimationKind::Body128x128,
                image: Image::new(128, 128, Vec::new()),
                frame_count: 3,
            }],
            persona: true,
            ..Skin::default()
        };
        let data = skin_data(&skin);
        assert_eq!(data.image.width, 64);
        assert_eq!(data.image.data.len(), 64 * 64 * 4);
        assert_eq!(data.animations[0].animation_type, ANIMATION_BODY_128X128);
        assert_eq!(data.animations[0].frame_count, 3.0);
        assert!(data.resource_patch.contains("geometry.humanoid"));
        assert!(data.persona);
        assert_ne!(data.cape_id, data.full_id);
        assert_ne!(skin_data(&skin).skin_id, data.skin_id);
    }

    #[test]
    fn list_entries() {
        let p = player(5);
        match player_list_add(p.as_ref(), 9) {
            PlayerList::Add(entries) => {
                assert_eq!(entries[0].entity_unique_id, 9);
                assert_eq!(entries[0].username, "p5");
                assert_eq!(entries[0].uuid, Uuid::new(0, 5));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            player_list_remove(Uuid::new(0, 5)),
            PlayerList::Remove(vec![Uuid::new(0, 5)])
        );
    }
}
