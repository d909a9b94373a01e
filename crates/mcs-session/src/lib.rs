//! Server-side session core: turns decoded client packets into checked
//! changes to the player's entity, inventories and UI, and tells clients
//! about the results.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod forms;
pub mod hub;
pub mod registry;
pub mod session;
pub mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{init_logging, ConfigError, SessionConfig};
pub use error::{ErrorKind, SessionError};
pub use hub::{SessionHandle, SessionHub};
pub use registry::{EntityViewRegistry, SELF_HANDLE};
pub use session::{Session, SessionCommand};
