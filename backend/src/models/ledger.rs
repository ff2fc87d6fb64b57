//! Player Ledger
//!
//! Owns every player of a session together with their buy-in and cash-out
//! histories. This is the single source of truth; pot, completion and
//! settlement are derived from it on demand and never stored.
//!
//! # Critical Invariants
//!
//! 1. **Append-only**: players and history entries are never removed
//! 2. **Id Uniqueness**: each `PlayerId` appears exactly once
//! 3. **Insertion Order**: players are kept in the order they were added
//! 4. **Atomicity**: a rejected mutation leaves the ledger unchanged
//! 5. **Non-negative Pot**: every accepted cash-out keeps the pot >= 0
//! 6. **Bounded Totals**: the session's total buy-in always fits in an i64

use crate::models::player::{Player, PlayerId, ValidationError};
use crate::models::transaction::NetBalance;
use crate::settlement::pot::compute_pot;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;

/// Errors returned by ledger mutators and readers
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Player id already in use: {0}")]
    DuplicatePlayer(PlayerId),
}

impl LedgerError {
    /// True for user input mistakes (amount or name), false for bad ids
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}

/// Upper bound applied to a single cash-out
///
/// Both bounds appear in practice: the room screen lets a player take any
/// amount up to the whole pot, the older modal capped it at their own stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashOutLimit {
    /// amount <= total pot at that instant
    #[default]
    TotalPot,

    /// amount <= the player's own stack (buy-ins minus cash-outs)
    PlayerStack,
}

/// In-memory ledger of one poker session
///
/// # Example
///
/// ```rust
/// use poker_ledger_core::Ledger;
///
/// let mut ledger = Ledger::new();
/// let alice = ledger.add_player("Alice").unwrap();
/// let bob = ledger.add_player("Bob").unwrap();
///
/// ledger.record_buy_in(&alice, 2000).unwrap();
/// ledger.record_buy_in(&bob, 2000).unwrap();
/// ledger.record_cash_out(&alice, 3000).unwrap();
///
/// assert_eq!(ledger.net_amount(&alice).unwrap(), 1000);
/// assert_eq!(ledger.current_stack(&bob).unwrap(), 2000);
/// assert_eq!(ledger.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ledger {
    /// Players in insertion order
    players: Vec<Player>,

    /// Player id -> position in `players`
    #[serde(skip)]
    index: HashMap<PlayerId, usize>,

    /// Bound enforced by `record_cash_out`
    #[serde(skip)]
    cash_out_limit: CashOutLimit,
}

impl Ledger {
    /// Create an empty ledger with the default (total pot) cash-out limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty ledger with an explicit cash-out limit
    pub fn with_cash_out_limit(cash_out_limit: CashOutLimit) -> Self {
        Self {
            cash_out_limit,
            ..Self::default()
        }
    }

    pub fn cash_out_limit(&self) -> CashOutLimit {
        self.cash_out_limit
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Add a player with a freshly generated id
    ///
    /// Names are trimmed and need not be unique.
    ///
    /// # Errors
    /// `ValidationError::EmptyName` if the name is blank.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, LedgerError> {
        self.add_player_with_id(PlayerId::generate(), name)
    }

    /// Add a player under a caller-chosen id
    ///
    /// # Errors
    /// - `ValidationError::EmptyName` if the name is blank
    /// - `DuplicatePlayer` if the id is already taken
    pub fn add_player_with_id(
        &mut self,
        id: PlayerId,
        name: &str,
    ) -> Result<PlayerId, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.index.contains_key(&id) {
            return Err(LedgerError::DuplicatePlayer(id));
        }

        self.index.insert(id.clone(), self.players.len());
        self.players.push(Player::new(id.clone(), name.to_string()));
        Ok(id)
    }

    /// Append a buy-in (cents) and mark the player active
    ///
    /// # Errors
    /// - `UnknownPlayer` if the id is absent
    /// - `ValidationError::NonPositiveBuyIn` if `amount <= 0`
    /// - `ValidationError::AmountOverflow` if the buy-ins of the whole
    ///   session would no longer fit in an i64
    pub fn record_buy_in(&mut self, id: &PlayerId, amount: i64) -> Result<(), LedgerError> {
        let position = self.position(id)?;

        // Every derived sum (pot, stacks, nets) is bounded by this total
        let total = self.session_buy_in_total();
        if amount > 0 && total.checked_add(amount).is_none() {
            return Err(ValidationError::AmountOverflow { amount, total }.into());
        }

        self.players[position].record_buy_in(amount)?;
        Ok(())
    }

    /// Append a cash-out (cents) and mark the player inactive
    ///
    /// The amount is bounded by [`Ledger::cash_out_available`].
    ///
    /// # Errors
    /// - `UnknownPlayer` if the id is absent
    /// - `ValidationError::NegativeCashOut` if `amount < 0`
    /// - `ValidationError::CashOutExceedsLimit` if over the limit
    pub fn record_cash_out(&mut self, id: &PlayerId, amount: i64) -> Result<(), LedgerError> {
        let position = self.position(id)?;
        let limit = self.cash_out_available(id)?;
        self.players[position].record_cash_out(amount, limit)?;
        Ok(())
    }

    // ========================================================================
    // Readers
    // ========================================================================

    /// Largest cash-out the player may record right now (cents)
    pub fn cash_out_available(&self, id: &PlayerId) -> Result<i64, LedgerError> {
        let player = self.player(id)?;
        let pot = compute_pot(self);

        let limit = match self.cash_out_limit {
            CashOutLimit::TotalPot => pot,
            CashOutLimit::PlayerStack => player.current_stack().min(pot),
        };

        Ok(limit.max(0))
    }

    pub fn player(&self, id: &PlayerId) -> Result<&Player, LedgerError> {
        let position = self.position(id)?;
        Ok(&self.players[position])
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.index.contains_key(id)
    }

    /// All players in insertion order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn total_buy_in(&self, id: &PlayerId) -> Result<i64, LedgerError> {
        Ok(self.player(id)?.total_buy_in())
    }

    pub fn total_cash_out(&self, id: &PlayerId) -> Result<i64, LedgerError> {
        Ok(self.player(id)?.total_cash_out())
    }

    pub fn current_stack(&self, id: &PlayerId) -> Result<i64, LedgerError> {
        Ok(self.player(id)?.current_stack())
    }

    pub fn net_amount(&self, id: &PlayerId) -> Result<i64, LedgerError> {
        Ok(self.player(id)?.net_amount())
    }

    /// True once anybody has put money on the table
    pub fn has_any_buy_in(&self) -> bool {
        self.players.iter().any(Player::has_bought_in)
    }

    /// Players currently holding chips, in insertion order
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_active()).collect()
    }

    /// Players who have left the table with a cash-out, in insertion order
    pub fn cashed_out_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| !p.is_active() && p.has_cashed_out())
            .collect()
    }

    /// Net amount of every player, in insertion order
    pub fn net_balances(&self) -> Vec<NetBalance> {
        self.players
            .iter()
            .map(|p| NetBalance::new(p.id().clone(), p.net_amount()))
            .collect()
    }

    /// SHA-256 over ids, names and histories, in insertion order
    ///
    /// Two ledgers with the same fingerprint yield the same pot, completion
    /// status and settlement plan.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        for player in &self.players {
            hash_str(&mut hasher, player.id().as_str());
            hash_str(&mut hasher, player.name());
            hash_amounts(&mut hasher, player.buy_ins());
            hash_amounts(&mut hasher, player.cash_outs());
        }

        format!("{:x}", hasher.finalize())
    }

    fn session_buy_in_total(&self) -> i64 {
        self.players.iter().map(Player::total_buy_in).sum()
    }

    fn position(&self, id: &PlayerId) -> Result<usize, LedgerError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| LedgerError::UnknownPlayer(id.clone()))
    }
}

// Length prefixes keep ("ab", "c") and ("a", "bc") apart.
fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn hash_amounts(hasher: &mut Sha256, amounts: &[i64]) {
    hasher.update((amounts.len() as u64).to_le_bytes());
    for amount in amounts {
        hasher.update(amount.to_le_bytes());
    }
}
