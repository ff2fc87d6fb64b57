//! Poker Ledger Core - Rust Engine
//!
//! Bookkeeping and settlement for a casual poker session: players buy in,
//! cash out, and at the end the engine works out who pays whom.
//!
//! # Architecture
//!
//! - **core**: Money representation (integer cents) and tolerances
//! - **models**: Domain types (Player, Ledger, Transaction, Event)
//! - **settlement**: Pot, completion detection, debt netting, summaries
//! - **session**: Room codes, configuration, and the session controller
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. `pot = Σ buy-ins − Σ cash-outs`, always recomputed from the ledger
//! 3. Net balances of a complete session sum to zero
//! 4. Same ledger, same settlement plan
//! 5. FFI boundary is minimal and safe

pub mod core;
pub mod models;
pub mod session;
pub mod settlement;

// Re-exports for convenience
pub use crate::core::money::{cents_from_decimal, cents_to_decimal, MoneyError};
pub use models::{
    event::{Event, EventLog},
    ledger::{CashOutLimit, Ledger, LedgerError},
    player::{Player, PlayerId, ValidationError},
    transaction::{NetBalance, Transaction},
};
pub use session::{
    ConfigError, RoomCode, RoomCodeError, SessionConfig, SessionController, SessionError,
    SessionStatus,
};
pub use settlement::{
    compute_settlement, CompletionStatus, PlayerOutcome, PlayerSummary, SessionPhase,
    SettlementError, SettlementPlan,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn poker_ledger_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::session::PySession>()?;
    Ok(())
}
