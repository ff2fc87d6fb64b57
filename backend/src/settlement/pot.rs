//! Pot accumulation
//!
//! The pot is never tracked incrementally. It is summed from the full
//! ledger every time so it cannot drift from the recorded histories.

use crate::models::ledger::Ledger;
use crate::models::player::Player;

/// Total chips in play: Σ over players of (buy-ins − cash-outs), in cents
///
/// Always >= 0 for a ledger built through its mutators, since every
/// cash-out is bounded by the pot at the time it is recorded.
///
/// # Example
/// ```
/// use poker_ledger_core::Ledger;
/// use poker_ledger_core::settlement::compute_pot;
///
/// let mut ledger = Ledger::new();
/// assert_eq!(compute_pot(&ledger), 0);
///
/// let id = ledger.add_player("Alice").unwrap();
/// ledger.record_buy_in(&id, 2000).unwrap();
/// ledger.record_buy_in(&id, 1000).unwrap();
/// assert_eq!(compute_pot(&ledger), 3000);
/// ```
pub fn compute_pot(ledger: &Ledger) -> i64 {
    ledger.players().iter().map(Player::current_stack).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pot_includes_negative_stacks() {
        let mut ledger = Ledger::new();
        let a = ledger.add_player("A").unwrap();
        let b = ledger.add_player("B").unwrap();
        ledger.record_buy_in(&a, 2000).unwrap();
        ledger.record_buy_in(&b, 2000).unwrap();

        // A wins B's chips: A's own stack goes negative, the pot does not
        ledger.record_cash_out(&a, 3500).unwrap();
        assert_eq!(ledger.current_stack(&a).unwrap(), -1500);
        assert_eq!(compute_pot(&ledger), 500);

        ledger.record_cash_out(&b, 500).unwrap();
        assert_eq!(compute_pot(&ledger), 0);
    }

    #[test]
    fn test_idle_players_add_nothing() {
        let mut ledger = Ledger::new();
        ledger.add_player("A").unwrap();
        ledger.add_player("B").unwrap();
        assert_eq!(compute_pot(&ledger), 0);
    }
}
