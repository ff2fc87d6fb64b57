//! Settlement Module
//!
//! Everything derived from a ledger snapshot:
//! - **pot**: chips still in play
//! - **completion**: per-player settledness, session phase, completion check
//! - **netting**: greedy debtor/creditor matching into a transfer plan
//! - **summary**: winner / loser / even overview per player
//!
//! # Critical Invariants
//!
//! 1. **Read-only**: nothing in this module mutates a `Ledger`
//! 2. **No caching**: every call recomputes from the full ledger
//! 3. **Determinism**: same ledger snapshot, same output, in the same order
//!
//! # Example
//!
//! ```rust
//! use poker_ledger_core::Ledger;
//! use poker_ledger_core::settlement;
//!
//! let mut ledger = Ledger::new();
//! let alice = ledger.add_player("Alice").unwrap();
//! let bob = ledger.add_player("Bob").unwrap();
//! ledger.record_buy_in(&alice, 2000).unwrap();
//! ledger.record_buy_in(&bob, 2000).unwrap();
//! assert_eq!(settlement::compute_pot(&ledger), 4000);
//!
//! ledger.record_cash_out(&alice, 3000).unwrap();
//! ledger.record_cash_out(&bob, 1000).unwrap();
//! assert!(settlement::is_session_complete(&ledger));
//!
//! let plan = settlement::compute_settlement(&ledger).unwrap();
//! assert_eq!(plan.len(), 1);
//! assert_eq!(plan.transactions()[0].from(), &bob);
//! assert_eq!(plan.transactions()[0].amount(), 1000);
//! ```

pub mod completion;
pub mod netting;
pub mod pot;
pub mod summary;

// Re-export public API
pub use completion::{
    completion_status, is_player_settled, is_session_complete, session_phase, CompletionStatus,
    SessionPhase,
};
pub use netting::{
    compute_settlement, compute_transactions, residual_balances, SettlementError, SettlementPlan,
};
pub use pot::compute_pot;
pub use summary::{player_summaries, PlayerOutcome, PlayerSummary};
