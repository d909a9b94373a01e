//! GameRulesChanged (0x48): Server → Client.

use bytes::BufMut;

use crate::codec::{write_string, ProtoEncode};
use crate::types::{VarInt, VarUInt32};

pub const SHOW_COORDINATES: &str = "showCoordinates";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameRuleValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl GameRuleValue {
    fn type_id(self) -> u32 {
        match self {
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameRule {
    pub name: String,
    pub editable: bool,
    pub value: GameRuleValue,
}

impl GameRule {
    pub fn new(name: impl Into<String>, value: GameRuleValue) -> Self {
        Self {
            name: name.into(),
            editable: false,
            value,
        }
    }
}

impl ProtoEncode for GameRule {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_string(buf, &self.name);
        buf.put_u8(u8::from(self.editable));
        VarUInt32(self.value.type_id()).proto_encode(buf);
        match self.value {
            GameRuleValue::Bool(v) => buf.put_u8(u8::from(v)),
            GameRuleValue::Int(v) => VarInt(v).proto_encode(buf),
            GameRuleValue::Float(v) => buf.put_f32_le(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameRulesChanged {
    pub rules: Vec<GameRule>,
}

impl ProtoEncode for GameRulesChanged {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.rules.len() as u32).proto_encode(buf);
        for rule in &self.rules {
            rule.proto_encode(buf);
        }
    }
}
