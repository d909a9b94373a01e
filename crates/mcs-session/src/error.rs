use mcs_game::form::FormError;
use mcs_proto::error::ProtoError;
use mcs_proto::packets::InventorySource;
use thiserror::Error;

/// Why a packet was rejected.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Wrong runtime handle or packet state. The only kind that may close
    /// the connection.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(
        "stale client state: window {window_id} slot {slot} holds {actual}, client claimed {claimed}"
    )]
    StaleClientState {
        window_id: i32,
        slot: u32,
        actual: String,
        claimed: String,
    },

    #[error("unbalanced transaction: {0}")]
    UnbalancedTransaction(String),

    #[error("unknown inventory window {0}")]
    UnknownInventory(i32),

    #[error("inventory source {0:?} does not name a window")]
    UnsupportedSource(InventorySource),

    #[error("slot {slot} out of range for window {window_id}")]
    SlotOutOfRange { window_id: i32, slot: u32 },

    #[error("transaction scratch inventory full: {0}")]
    InternalCapacity(String),

    #[error("no entity with runtime handle {0}")]
    EntityNotFound(u64),

    #[error("no outstanding form with id {0}")]
    UnknownForm(u32),

    #[error("form response: {0}")]
    FormDecode(#[from] FormError),

    #[error("packet decode: {0}")]
    Decode(#[from] ProtoError),
}

/// Coarse classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ProtocolViolation,
    Validation,
    StaleState,
    NotFound,
    FormDecode,
    InternalCapacity,
    Decode,
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProtocolViolation(_) => ErrorKind::ProtocolViolation,
            Self::Validation(_)
            | Self::UnknownInventory(_)
            | Self::UnsupportedSource(_)
            | Self::SlotOutOfRange { .. } => ErrorKind::Validation,
            Self::StaleClientState { .. } | Self::UnbalancedTransaction(_) => {
                ErrorKind::StaleState
            }
            Self::EntityNotFound(_) | Self::UnknownForm(_) => ErrorKind::NotFound,
            Self::FormDecode(_) => ErrorKind::FormDecode,
            Self::InternalCapacity(_) => ErrorKind::InternalCapacity,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Whether the dispatcher may close the connection over this error.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::ProtocolViolation
    }
}
