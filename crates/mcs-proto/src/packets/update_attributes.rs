//! UpdateAttributes (0x1D): Server → Client.
//!
//! Syncs entity attributes such as health and movement speed.

use bytes::BufMut;

use crate::codec::{write_string, ProtoEncode};
use crate::types::{VarUInt32, VarUInt64};

pub const HEALTH: &str = "minecraft:health";
pub const MOVEMENT: &str = "minecraft:movement";

/// Default walking speed of a player.
pub const DEFAULT_MOVEMENT_SPEED: f32 = 0.1;

/// A single attribute entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEntry {
    pub min: f32,
    pub max: f32,
    pub current: f32,
    pub default: f32,
    pub name: String,
}

/// UpdateAttributes packet.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAttributes {
    pub entity_runtime_id: u64,
    pub attributes: Vec<AttributeEntry>,
    pub tick: u64,
}

impl UpdateAttributes {
    /// Health attribute update. The default is always 20.
    pub fn health(entity_runtime_id: u64, current: f32, max: f32) -> Self {
        Self {
            entity_runtime_id,
            attributes: vec![AttributeEntry {
                min: 0.0,
                max,
                current,
                default: 20.0,
                name: HEALTH.to_string(),
            }],
            tick: 0,
        }
    }

    /// Movement speed update. Speed is unbounded above.
    pub fn speed(entity_runtime_id: u64, current: f32) -> Self {
        Self {
            entity_runtime_id,
            attributes: vec![AttributeEntry {
                min: 0.0,
                max: f32::MAX,
                current,
                default: DEFAULT_MOVEMENT_SPEED,
                name: MOVEMENT.to_string(),
            }],
            tick: 0,
        }
    }
}

impl ProtoEncode for UpdateAttributes {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.entity_runtime_id).proto_encode(buf);
        VarUInt32(self.attributes.len() as u32).proto_encode(buf);
        for attr in &self.attributes {
            buf.put_f32_le(attr.min);
            buf.put_f32_le(attr.max);
            buf.put_f32_le(attr.current);
            buf.put_f32_le(attr.default);
            write_string(buf, &attr.name);
        }
        VarUInt64(self.tick).proto_encode(buf);
    }
}
