use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub inventory: InventorySection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSection {
    /// View distance in chunks.
    #[serde(default = "default_chunk_radius")]
    pub chunk_radius: u32,
    /// Forms that may be outstanding at once before the oldest is dropped.
    #[serde(default = "default_max_pending_forms")]
    pub max_pending_forms: usize,
    /// Slots of the scratch inventory used to balance a transaction.
    #[serde(default = "default_transaction_scratch_capacity")]
    pub transaction_scratch_capacity: usize,
    #[serde(default = "default_true")]
    pub disconnect_on_protocol_violation: bool,
}

fn default_chunk_radius() -> u32 {
    8
}

fn default_max_pending_forms() -> usize {
    10
}

fn default_transaction_scratch_capacity() -> usize {
    128
}

fn default_true() -> bool {
    true
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            chunk_radius: default_chunk_radius(),
            max_pending_forms: default_max_pending_forms(),
            transaction_scratch_capacity: default_transaction_scratch_capacity(),
            disconnect_on_protocol_violation: default_true(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventorySection {
    #[serde(default = "default_main_size")]
    pub main_size: usize,
    #[serde(default = "default_offhand_size")]
    pub offhand_size: usize,
    #[serde(default = "default_ui_size")]
    pub ui_size: usize,
}

fn default_main_size() -> usize {
    36
}

fn default_offhand_size() -> usize {
    1
}

fn default_ui_size() -> usize {
    51
}

impl Default for InventorySection {
    fn default() -> Self {
        Self {
            main_size: default_main_size(),
            offhand_size: default_offhand_size(),
            ui_size: default_ui_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SessionConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.max_pending_forms == 0 {
            return Err(ConfigError::Invalid(
                "session.max_pending_forms must be at least 1".into(),
            ));
        }
        if self.session.transaction_scratch_capacity == 0 {
            return Err(ConfigError::Invalid(
                "session.transaction_scratch_capacity must be at least 1".into(),
            ));
        }
        if self.inventory.main_size < 9 {
            return Err(ConfigError::Invalid(format!(
                "inventory.main_size must hold the hotbar (9 slots), got {}",
                self.inventory.main_size
            )));
        }
        Ok(())
    }
}

/// Install a global `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// the configured level. Returns `false` if a subscriber was already set.
pub fn init_logging(logging: &LoggingSection) -> bool {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config.session.chunk_radius, 8);
        assert_eq!(config.session.max_pending_forms, 10);
        assert_eq!(config.session.transaction_scratch_capacity, 128);
        assert!(config.session.disconnect_on_protocol_violation);
        assert_eq!(config.inventory.main_size, 36);
        assert_eq!(config.inventory.offhand_size, 1);
        assert_eq!(config.inventory.ui_size, 51);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_sections() {
        let toml_str = r#"
            [session]
            chunk_radius = 12
            disconnect_on_protocol_violation = false

            [inventory]
            ui_size = 60

            [logging]
            level = "debug"
        "#;
        let config = SessionConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.session.chunk_radius, 12);
        assert!(!config.session.disconnect_on_protocol_violation);
        // untouched keys keep their defaults
        assert_eq!(config.session.max_pending_forms, 10);
        assert_eq!(config.inventory.ui_size, 60);
        assert_eq!(config.inventory.main_size, 36);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn zero_forms_rejected() {
        let err = SessionConfig::from_toml_str("[session]\nmax_pending_forms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn tiny_main_inventory_rejected() {
        let err = SessionConfig::from_toml_str("[inventory]\nmain_size = 4").unwrap_err();
        assert!(err.to_string().contains("hotbar"));
    }

    #[test]
    fn bad_toml() {
        assert!(matches!(
            SessionConfig::from_toml_str("[session\nchunk_radius = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            SessionConfig::load("/nonexistent/session.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn logging_init_is_idempotent() {
        let logging = LoggingSection::default();
        init_logging(&logging);
        assert!(!init_logging(&logging));
    }
}
