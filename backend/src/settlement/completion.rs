//! Completion detection
//!
//! Decides whether a session has reached a settleable state, and which
//! phase of its lifecycle it is in.
//!
//! # Session Phases
//!
//! ```text
//! Forming ──buy-in──▶ InPlay ──last cash-out──▶ Settling ──pot hits 0──▶ Complete
//!                        ▲                         │                        │
//!                        └─────────new buy-in──────┴────────────────────────┘
//! ```
//!
//! - **Forming**: nobody has bought in yet
//! - **InPlay**: at least one player still has chips on the table
//! - **Settling**: every player is settled but chips remain in the pot
//! - **Complete**: every player settled and the pot is empty
//!
//! A player is **settled** when they have cashed out at least once, or have
//! never bought in. Everything here is recomputed from the ledger on every
//! call; nothing is cached.

use crate::core::money::is_negligible;
use crate::models::ledger::Ledger;
use crate::models::player::{Player, PlayerId};
use crate::settlement::pot::compute_pot;
use serde::Serialize;
use std::fmt;

/// Lifecycle phase of a session, derived from the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SessionPhase {
    Forming,
    InPlay,
    Settling,
    Complete,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionPhase::Forming => "forming",
            SessionPhase::InPlay => "in_play",
            SessionPhase::Settling => "settling",
            SessionPhase::Complete => "complete",
        };
        f.write_str(label)
    }
}

/// Snapshot of the completion check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionStatus {
    /// Derived phase
    pub phase: SessionPhase,

    /// Pot at the time of the check (cents)
    pub pot: i64,

    /// Players still holding chips, in insertion order
    pub unsettled: Vec<PlayerId>,
}

impl CompletionStatus {
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }
}

/// Settled = cashed out at least once, or never bought in
pub fn is_player_settled(player: &Player) -> bool {
    player.is_settled()
}

/// Full completion check over the ledger
///
/// Before anyone buys in, every player is settled and the pot is zero, so
/// the settled-and-empty predicate alone would hold. Such a ledger is
/// reported as `Forming`, not `Complete`: completion additionally requires
/// at least one recorded buy-in, and a room full of idle players is still
/// waiting for its first buy-in.
///
/// # Example
/// ```
/// use poker_ledger_core::Ledger;
/// use poker_ledger_core::settlement::{completion_status, SessionPhase};
///
/// let mut ledger = Ledger::new();
/// let a = ledger.add_player("A").unwrap();
/// assert_eq!(completion_status(&ledger).phase, SessionPhase::Forming);
///
/// ledger.record_buy_in(&a, 1000).unwrap();
/// let status = completion_status(&ledger);
/// assert_eq!(status.phase, SessionPhase::InPlay);
/// assert_eq!(status.unsettled, vec![a.clone()]);
///
/// ledger.record_cash_out(&a, 1000).unwrap();
/// assert!(completion_status(&ledger).is_complete());
/// ```
pub fn completion_status(ledger: &Ledger) -> CompletionStatus {
    let pot = compute_pot(ledger);
    let unsettled: Vec<PlayerId> = ledger
        .players()
        .iter()
        .filter(|p| !is_player_settled(p))
        .map(|p| p.id().clone())
        .collect();

    // A re-buy after a cash-out leaves the player settled but active again;
    // that still counts as play in progress unless the pot is already empty.
    let anyone_active = ledger.players().iter().any(Player::is_active);

    let phase = if !ledger.has_any_buy_in() {
        SessionPhase::Forming
    } else if unsettled.is_empty() && is_negligible(pot) {
        SessionPhase::Complete
    } else if !unsettled.is_empty() || anyone_active {
        SessionPhase::InPlay
    } else {
        SessionPhase::Settling
    };

    CompletionStatus {
        phase,
        pot,
        unsettled,
    }
}

/// Derived phase only
pub fn session_phase(ledger: &Ledger) -> SessionPhase {
    completion_status(ledger).phase
}

/// True when every player is settled, the pot is empty, and money moved
pub fn is_session_complete(ledger: &Ledger) -> bool {
    session_phase(ledger) == SessionPhase::Complete
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ledger_is_forming() {
        let ledger = Ledger::new();
        let status = completion_status(&ledger);
        assert_eq!(status.phase, SessionPhase::Forming);
        assert_eq!(status.pot, 0);
        assert!(!is_session_complete(&ledger));
    }

    #[test]
    fn test_players_without_buy_ins_stay_forming() {
        let mut ledger = Ledger::new();
        ledger.add_player("A").unwrap();
        ledger.add_player("B").unwrap();

        let status = completion_status(&ledger);
        assert_eq!(status.phase, SessionPhase::Forming);
        assert_eq!(status.pot, 0);
        assert!(status.unsettled.is_empty());
        assert!(ledger.players().iter().all(is_player_settled));
        assert!(!is_session_complete(&ledger));
    }

    #[test]
    fn test_settling_when_chips_left_behind() {
        let mut ledger = Ledger::new();
        let a = ledger.add_player("A").unwrap();
        ledger.record_buy_in(&a, 2000).unwrap();
        ledger.record_cash_out(&a, 500).unwrap();

        let status = completion_status(&ledger);
        assert_eq!(status.phase, SessionPhase::Settling);
        assert_eq!(status.pot, 1500);
        assert!(status.unsettled.is_empty());
    }

    #[test]
    fn test_idle_player_does_not_block_completion() {
        let mut ledger = Ledger::new();
        let a = ledger.add_player("A").unwrap();
        let _late = ledger.add_player("Late arrival").unwrap();
        ledger.record_buy_in(&a, 1000).unwrap();
        ledger.record_cash_out(&a, 1000).unwrap();

        assert!(is_session_complete(&ledger));
    }

    #[test]
    fn test_new_buy_in_reopens_complete_session() {
        let mut ledger = Ledger::new();
        let a = ledger.add_player("A").unwrap();
        let b = ledger.add_player("B").unwrap();
        ledger.record_buy_in(&a, 1000).unwrap();
        ledger.record_cash_out(&a, 1000).unwrap();
        assert!(is_session_complete(&ledger));

        ledger.record_buy_in(&b, 500).unwrap();
        assert_eq!(session_phase(&ledger), SessionPhase::InPlay);
    }

    #[test]
    fn test_rebuy_after_cash_out_is_in_play() {
        let mut ledger = Ledger::new();
        let a = ledger.add_player("A").unwrap();
        ledger.record_buy_in(&a, 1000).unwrap();
        ledger.record_cash_out(&a, 1000).unwrap();
        ledger.record_buy_in(&a, 500).unwrap();

        let status = completion_status(&ledger);
        assert_eq!(status.phase, SessionPhase::InPlay);
        // Has a cash-out on record, so not listed as unsettled
        assert!(status.unsettled.is_empty());
        assert_eq!(status.pot, 500);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(SessionPhase::InPlay.to_string(), "in_play");
        assert_eq!(SessionPhase::Complete.to_string(), "complete");
    }
}
