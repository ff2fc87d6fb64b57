//! Session configuration
//!
//! Loaded from JSON by the host (UI, CLI, FFI). Every field has a default,
//! so `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "cash_out_limit": "total_pot",
//!   "default_buy_in": 2000,
//!   "room_code_length": 6,
//!   "room_code_seed": 12345
//! }
//! ```

use crate::models::ledger::CashOutLimit;
use crate::session::room::{DEFAULT_ROOM_CODE_LENGTH, MAX_ROOM_CODE_LENGTH, MIN_ROOM_CODE_LENGTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Per-session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Bound applied to every cash-out
    pub cash_out_limit: CashOutLimit,

    /// Amount pre-filled for a buy-in (cents); $20.00 by default
    pub default_buy_in: i64,

    /// Characters per room code
    pub room_code_length: usize,

    /// Fixed seed for room code generation (random when absent)
    pub room_code_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cash_out_limit: CashOutLimit::TotalPot,
            default_buy_in: 2000,
            room_code_length: DEFAULT_ROOM_CODE_LENGTH,
            room_code_seed: None,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON configuration
    ///
    /// # Example
    /// ```
    /// use poker_ledger_core::{CashOutLimit, SessionConfig};
    ///
    /// let config = SessionConfig::from_json(r#"{"cash_out_limit": "player_stack"}"#).unwrap();
    /// assert_eq!(config.cash_out_limit, CashOutLimit::PlayerStack);
    /// assert_eq!(config.default_buy_in, 2000);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_buy_in <= 0 {
            return Err(ConfigError::Invalid(format!(
                "default_buy_in must be positive, got {}",
                self.default_buy_in
            )));
        }

        if !(MIN_ROOM_CODE_LENGTH..=MAX_ROOM_CODE_LENGTH).contains(&self.room_code_length) {
            return Err(ConfigError::Invalid(format!(
                "room_code_length must be between {} and {}, got {}",
                MIN_ROOM_CODE_LENGTH, MAX_ROOM_CODE_LENGTH, self.room_code_length
            )));
        }

        Ok(())
    }
}
