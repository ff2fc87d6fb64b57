//! Player model
//!
//! Represents one participant at the table.
//! Each player has:
//! - Buy-in history (positive i64 cents, chronological)
//! - Cash-out history (non-negative i64 cents, chronological)
//! - An explicitly tracked `active` flag
//!
//! Histories are append-only. A player is never removed from a session.
//!
//! CRITICAL: All money values are i64 (cents)

use crate::core::money::MoneyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when a mutation carries an invalid amount or name
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Player name must not be empty")]
    EmptyName,

    #[error("Buy-in amount must be positive, got {amount}")]
    NonPositiveBuyIn { amount: i64 },

    #[error("Cash-out amount must be non-negative, got {amount}")]
    NegativeCashOut { amount: i64 },

    #[error("Cash-out amount {amount} exceeds available {limit}")]
    CashOutExceedsLimit { amount: i64, limit: i64 },

    #[error("Amount {amount} would overflow the running total {total}")]
    AmountOverflow { amount: i64, total: i64 },

    #[error("Invalid amount: {0}")]
    Amount(#[from] MoneyError),
}

/// Opaque, unique player identifier
///
/// Generated once when the player is added and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Generate a fresh random id (`player-<32 hex digits>`)
    pub fn generate() -> Self {
        Self(format!("player-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A participant and their money history
///
/// # Example
/// ```
/// use poker_ledger_core::{Player, PlayerId};
///
/// let mut player = Player::new(PlayerId::from("p1"), "Alice".to_string());
/// player.record_buy_in(2000).unwrap(); // $20.00
/// player.record_cash_out(2500, i64::MAX).unwrap(); // $25.00
///
/// assert_eq!(player.net_amount(), 500);
/// assert!(!player.is_active());
/// assert!(player.is_settled());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player identifier
    id: PlayerId,

    /// Display name (not unique)
    name: String,

    /// Buy-ins in chronological order (each > 0)
    buy_ins: Vec<i64>,

    /// Cash-outs in chronological order (each >= 0)
    cash_outs: Vec<i64>,

    /// True after a buy-in, false after a cash-out
    ///
    /// Starts false: a freshly added player has no chips in play.
    active: bool,
}

impl Player {
    /// Create a player with empty histories
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            buy_ins: Vec::new(),
            cash_outs: Vec::new(),
            active: false,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Buy-in history (cents, chronological)
    pub fn buy_ins(&self) -> &[i64] {
        &self.buy_ins
    }

    /// Cash-out history (cents, chronological)
    pub fn cash_outs(&self) -> &[i64] {
        &self.cash_outs
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Sum of all buy-ins (i64 cents)
    pub fn total_buy_in(&self) -> i64 {
        self.buy_ins.iter().sum()
    }

    /// Sum of all cash-outs (i64 cents)
    pub fn total_cash_out(&self) -> i64 {
        self.cash_outs.iter().sum()
    }

    /// Chips this player still has on the table
    ///
    /// Can go negative when the cash-out limit is the whole pot and the
    /// player walked away with more than they bought in for.
    pub fn current_stack(&self) -> i64 {
        self.total_buy_in() - self.total_cash_out()
    }

    /// Cash-outs minus buy-ins: positive = won, negative = lost
    pub fn net_amount(&self) -> i64 {
        self.total_cash_out() - self.total_buy_in()
    }

    pub fn has_bought_in(&self) -> bool {
        !self.buy_ins.is_empty()
    }

    pub fn has_cashed_out(&self) -> bool {
        !self.cash_outs.is_empty()
    }

    /// Settled = cashed out at least once, or never bought in
    pub fn is_settled(&self) -> bool {
        self.has_cashed_out() || !self.has_bought_in()
    }

    /// Append a buy-in and mark the player active
    ///
    /// # Errors
    /// `NonPositiveBuyIn` if `amount <= 0`, `AmountOverflow` if the total
    /// buy-in would no longer fit in an i64; the player is left unchanged.
    pub fn record_buy_in(&mut self, amount: i64) -> Result<(), ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::NonPositiveBuyIn { amount });
        }
        let total = self.total_buy_in();
        if total.checked_add(amount).is_none() {
            return Err(ValidationError::AmountOverflow { amount, total });
        }

        self.buy_ins.push(amount);
        self.active = true;
        Ok(())
    }

    /// Append a cash-out bounded by `limit` and mark the player inactive
    ///
    /// The caller decides what `limit` means (own stack or whole pot).
    ///
    /// # Errors
    /// `NegativeCashOut`, `CashOutExceedsLimit` or `AmountOverflow`; the player is
    /// left unchanged.
    pub fn record_cash_out(&mut self, amount: i64, limit: i64) -> Result<(), ValidationError> {
        if amount < 0 {
            return Err(ValidationError::NegativeCashOut { amount });
        }
        if amount > limit {
            return Err(ValidationError::CashOutExceedsLimit { amount, limit });
        }
        let total = self.total_cash_out();
        if total.checked_add(amount).is_none() {
            return Err(ValidationError::AmountOverflow { amount, total });
        }

        self.cash_outs.push(amount);
        self.active = false;
        Ok(())
    }
}
