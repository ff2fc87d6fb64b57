//! Domain models for the poker ledger

pub mod event;
pub mod ledger;
pub mod player;
pub mod transaction;

// Re-exports
pub use event::{Event, EventLog};
pub use ledger::{CashOutLimit, Ledger, LedgerError};
pub use player::{Player, PlayerId, ValidationError};
pub use transaction::{NetBalance, Transaction};
