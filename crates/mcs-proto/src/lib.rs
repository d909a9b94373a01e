//! Bedrock wire types and the packets handled by the session core.

pub mod codec;
pub mod error;
pub mod item_stack;
pub mod packets;
pub mod types;
