//! Session Controller
//!
//! Owns one [`Ledger`] and drives it in response to user actions. After
//! every accepted mutation the controller recomputes, from scratch:
//!
//! 1. Pot
//! 2. Completion status and phase
//! 3. Settlement plan (only when the session is complete)
//!
//! # Action Flow
//!
//! ```text
//! user action ─▶ validate + mutate ledger ─▶ log event ─▶ refresh status
//!                      │
//!                      └─ rejected ─▶ log MutationRejected, ledger untouched
//! ```
//!
//! # Critical Invariants
//!
//! - **Atomicity**: a rejected action changes nothing but the event log
//! - **No stale status**: `status()` always reflects the current ledger
//! - **Single owner**: the controller is the only writer of its ledger

use crate::core::money::{cents_from_decimal, cents_to_decimal};
use crate::models::event::{Event, EventLog};
use crate::models::ledger::{Ledger, LedgerError};
use crate::models::player::{Player, PlayerId, ValidationError};
use crate::session::config::{ConfigError, SessionConfig};
use crate::session::room::{RoomCode, RoomCodeError, RoomCodeGenerator};
use crate::settlement::completion::{completion_status, CompletionStatus, SessionPhase};
use crate::settlement::netting::{compute_settlement, SettlementError, SettlementPlan};
use crate::settlement::pot::compute_pot;
use crate::settlement::summary::{player_summaries, PlayerSummary};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors surfaced by controller operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Settlement(#[from] SettlementError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    RoomCode(#[from] RoomCodeError),
}

impl SessionError {
    /// True if the user can fix the input and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SessionError::Ledger(_) | SessionError::RoomCode(_))
    }
}

/// Everything the UI re-renders after an action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub completion: CompletionStatus,

    /// Present only while the session is complete
    pub settlement: Option<SettlementPlan>,
}

impl SessionStatus {
    pub fn pot(&self) -> i64 {
        self.completion.pot
    }

    pub fn phase(&self) -> SessionPhase {
        self.completion.phase
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_complete()
    }
}

/// Owner of one poker session
///
/// # Example
///
/// ```rust
/// use poker_ledger_core::{SessionConfig, SessionController, SessionPhase};
///
/// let mut session = SessionController::new(SessionConfig::default()).unwrap();
/// let alice = session.add_player("Alice").unwrap();
/// let bob = session.add_player("Bob").unwrap();
///
/// session.record_buy_in_decimal(&alice, 20.0).unwrap();
/// session.record_buy_in_decimal(&bob, 20.0).unwrap();
/// assert_eq!(session.total_pot(), 4000);
/// assert_eq!(session.phase(), SessionPhase::InPlay);
///
/// session.record_cash_out_decimal(&alice, 32.5).unwrap();
/// session.record_cash_out_decimal(&bob, 7.5).unwrap();
/// assert!(session.is_session_complete());
///
/// let plan = session.compute_settlement().unwrap();
/// assert_eq!(plan.transactions()[0].amount_decimal(), 12.5);
/// ```
#[derive(Debug, Clone)]
pub struct SessionController {
    config: SessionConfig,
    room_code: RoomCode,
    ledger: Ledger,
    events: EventLog,

    /// Sequence number handed to the next user action
    next_seq: usize,

    /// Derived state as of the last action
    status: SessionStatus,
}

impl SessionController {
    /// Create a session with a freshly generated room code
    ///
    /// # Errors
    /// `Config` if the configuration fails validation.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let mut generator = match config.room_code_seed {
            Some(seed) => RoomCodeGenerator::new(seed),
            None => RoomCodeGenerator::from_entropy(),
        };
        let room_code = RoomCode::generate(&mut generator, config.room_code_length);

        info!(room_code = %room_code, "Creating session");
        Ok(Self::build(config, room_code))
    }

    /// Open a local session for a room code typed by the user
    ///
    /// # Errors
    /// `Config` for an invalid configuration, `RoomCode` for a malformed code.
    pub fn join(config: SessionConfig, room_code: &str) -> Result<Self, SessionError> {
        config.validate()?;
        let room_code = RoomCode::parse(room_code, config.room_code_length)?;

        info!(room_code = %room_code, "Joining session");
        Ok(Self::build(config, room_code))
    }

    fn build(config: SessionConfig, room_code: RoomCode) -> Self {
        let ledger = Ledger::with_cash_out_limit(config.cash_out_limit);
        let status = SessionStatus {
            completion: completion_status(&ledger),
            settlement: None,
        };

        Self {
            config,
            room_code,
            ledger,
            events: EventLog::new(),
            next_seq: 0,
            status,
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a player; names are trimmed and need not be unique
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, SessionError> {
        let seq = self.begin_action();

        match self.ledger.add_player(name) {
            Ok(id) => {
                info!(seq, player_id = %id, name = name.trim(), "Player added");
                self.events.log(Event::PlayerAdded {
                    seq,
                    player_id: id.clone(),
                    name: name.trim().to_string(),
                });
                self.refresh(seq);
                Ok(id)
            }
            Err(err) => Err(self.reject(seq, None, "add_player", err)),
        }
    }

    /// Record a buy-in in cents
    pub fn record_buy_in(&mut self, id: &PlayerId, amount: i64) -> Result<(), SessionError> {
        let seq = self.begin_action();

        match self.ledger.record_buy_in(id, amount) {
            Ok(()) => {
                info!(seq, player_id = %id, amount, "Buy-in recorded");
                self.events.log(Event::BuyIn {
                    seq,
                    player_id: id.clone(),
                    amount,
                });
                self.refresh(seq);
                Ok(())
            }
            Err(err) => Err(self.reject(seq, Some(id), "buy_in", err)),
        }
    }

    /// Record a buy-in given as a decimal amount (e.g. `20.0`)
    pub fn record_buy_in_decimal(&mut self, id: &PlayerId, amount: f64) -> Result<(), SessionError> {
        match cents_from_decimal(amount) {
            Ok(cents) => self.record_buy_in(id, cents),
            Err(err) => {
                let seq = self.begin_action();
                Err(self.reject(seq, Some(id), "buy_in", ValidationError::from(err).into()))
            }
        }
    }

    /// Record a buy-in for the configured default amount
    pub fn record_default_buy_in(&mut self, id: &PlayerId) -> Result<(), SessionError> {
        self.record_buy_in(id, self.config.default_buy_in)
    }

    /// Record a cash-out in cents
    pub fn record_cash_out(&mut self, id: &PlayerId, amount: i64) -> Result<(), SessionError> {
        let seq = self.begin_action();

        match self.ledger.record_cash_out(id, amount) {
            Ok(()) => {
                info!(seq, player_id = %id, amount, "Cash-out recorded");
                self.events.log(Event::CashOut {
                    seq,
                    player_id: id.clone(),
                    amount,
                });
                self.refresh(seq);
                Ok(())
            }
            Err(err) => Err(self.reject(seq, Some(id), "cash_out", err)),
        }
    }

    /// Record a cash-out given as a decimal amount
    pub fn record_cash_out_decimal(&mut self, id: &PlayerId, amount: f64) -> Result<(), SessionError> {
        match cents_from_decimal(amount) {
            Ok(cents) => self.record_cash_out(id, cents),
            Err(err) => {
                let seq = self.begin_action();
                Err(self.reject(seq, Some(id), "cash_out", ValidationError::from(err).into()))
            }
        }
    }

    /// Discard the whole session and start over with the same room code
    pub fn reset(&mut self) {
        info!(room_code = %self.room_code, "Resetting session");
        *self = Self::build(self.config.clone(), self.room_code.clone());
    }

    // ========================================================================
    // Derived reads
    // ========================================================================

    /// Chips in play, recomputed from the ledger (cents)
    pub fn total_pot(&self) -> i64 {
        compute_pot(&self.ledger)
    }

    pub fn total_pot_decimal(&self) -> f64 {
        cents_to_decimal(self.total_pot())
    }

    pub fn is_session_complete(&self) -> bool {
        self.status.is_complete()
    }

    pub fn phase(&self) -> SessionPhase {
        self.status.phase()
    }

    /// Compute the transfer plan for the current ledger
    ///
    /// Not gated on completion; before the pot is empty the chips still on
    /// the table surface as an `InvariantViolation`.
    pub fn compute_settlement(&self) -> Result<SettlementPlan, SessionError> {
        compute_settlement(&self.ledger).map_err(|err| {
            error!(room_code = %self.room_code, error = %err, "Settlement aborted");
            SessionError::from(err)
        })
    }

    pub fn player_summaries(&self) -> Vec<PlayerSummary> {
        player_summaries(&self.ledger)
    }

    pub fn player(&self, id: &PlayerId) -> Result<&Player, SessionError> {
        Ok(self.ledger.player(id)?)
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn room_code(&self) -> &RoomCode {
        &self.room_code
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn begin_action(&mut self) -> usize {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn reject(
        &mut self,
        seq: usize,
        player_id: Option<&PlayerId>,
        action: &str,
        err: LedgerError,
    ) -> SessionError {
        warn!(seq, action, error = %err, "Mutation rejected");
        self.events.log(Event::MutationRejected {
            seq,
            player_id: player_id.cloned(),
            action: action.to_string(),
            reason: err.to_string(),
        });
        SessionError::from(err)
    }

    /// Recompute pot, completion and (if complete) settlement
    fn refresh(&mut self, seq: usize) {
        let previous = self.status.phase();
        let completion = completion_status(&self.ledger);
        debug!(seq, pot = completion.pot, phase = %completion.phase, "Status recomputed");

        if completion.phase != previous {
            info!(seq, from = %previous, to = %completion.phase, "Phase changed");
            self.events.log(Event::PhaseChanged {
                seq,
                from: previous,
                to: completion.phase,
            });
        }

        let settlement = if completion.is_complete() {
            match compute_settlement(&self.ledger) {
                Ok(plan) => {
                    self.events.log(Event::SettlementComputed {
                        seq,
                        num_transactions: plan.len(),
                        total_transferred: plan.total_transferred(),
                        fingerprint: plan.fingerprint().to_string(),
                    });
                    Some(plan)
                }
                Err(err) => {
                    error!(seq, error = %err, "Settlement aborted");
                    self.events.log(Event::SettlementFailed {
                        seq,
                        reason: err.to_string(),
                    });
                    None
                }
            }
        } else {
            None
        };

        self.status = SessionStatus {
            completion,
            settlement,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionController {
        let config = SessionConfig {
            room_code_seed: Some(42),
            ..SessionConfig::default()
        };
        SessionController::new(config).unwrap()
    }

    #[test]
    fn test_seeded_room_code_is_reproducible() {
        assert_eq!(session().room_code(), session().room_code());
        assert_eq!(session().room_code().as_str().len(), 6);
    }

    #[test]
    fn test_rejected_action_is_logged_and_harmless() {
        let mut s = session();
        let a = s.add_player("A").unwrap();
        let before = s.ledger().fingerprint();

        let err = s.record_buy_in(&a, -100).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(s.ledger().fingerprint(), before);
        assert_eq!(s.events().events_of_type("MutationRejected").len(), 1);
    }

    #[test]
    fn test_non_finite_decimal_rejected() {
        let mut s = session();
        let a = s.add_player("A").unwrap();

        let err = s.record_buy_in_decimal(&a, f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Ledger(LedgerError::Validation(ValidationError::Amount(_)))
        ));
        assert_eq!(s.total_pot(), 0);
    }

    #[test]
    fn test_default_buy_in() {
        let mut s = session();
        let a = s.add_player("A").unwrap();
        s.record_default_buy_in(&a).unwrap();
        assert_eq!(s.total_pot(), 2000);
    }

    #[test]
    fn test_reset_keeps_room_code() {
        let mut s = session();
        let code = s.room_code().clone();
        let a = s.add_player("A").unwrap();
        s.record_buy_in(&a, 1000).unwrap();

        s.reset();
        assert_eq!(s.room_code(), &code);
        assert!(s.ledger().is_empty());
        assert!(s.events().is_empty());
        assert_eq!(s.phase(), SessionPhase::Forming);
    }

    #[test]
    fn test_join_normalizes_code() {
        let s = SessionController::join(SessionConfig::default(), "ab12cd").unwrap();
        assert_eq!(s.room_code().as_str(), "AB12CD");

        let err = SessionController::join(SessionConfig::default(), "nope").unwrap_err();
        assert!(matches!(err, SessionError::RoomCode(_)));
    }
}
