//! Debt netting
//!
//! Turns final net balances into a short list of peer-to-peer transfers.
//!
//! # Algorithm (greedy min-cash-flow)
//!
//! 1. Drop players whose net is negligible (already even)
//! 2. Split the rest into debtors (net < 0) and creditors (net > 0)
//! 3. Stable-sort debtors most-negative first, creditors most-positive
//!    first; ties keep ledger insertion order
//! 4. Two-pointer sweep: match the current debtor with the current
//!    creditor for `min(owed, due)`, move both toward zero, advance
//!    whichever side reached zero
//!
//! Every transfer zeroes at least one side, so a plan never has more than
//! `debtors + creditors - 1` transfers. It is not guaranteed to be the
//! global minimum-count plan for every distribution of balances.
//!
//! # Example
//!
//! ```text
//! P1 = -30, P2 = -10, P3 = +40
//!   debtors   = [P1(-30), P2(-10)]
//!   creditors = [P3(+40)]
//!   P1 → P3 30, P2 → P3 10
//! ```

use crate::core::money::{is_negligible, BALANCE_TOLERANCE_CENTS};
use crate::models::ledger::Ledger;
use crate::models::player::PlayerId;
use crate::models::transaction::{NetBalance, Transaction};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that abort a settlement computation
#[derive(Debug, Error, PartialEq)]
pub enum SettlementError {
    /// Net balances do not sum to zero: the books upstream are inconsistent
    #[error("Net balances sum to {imbalance} cents instead of zero")]
    InvariantViolation { imbalance: i64 },

    /// Balances too large to total in an i64
    #[error("Net balance of {player_id} overflows the settlement arithmetic")]
    BalanceOverflow { player_id: PlayerId },
}

/// Transfer plan together with the ledger snapshot it was derived from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementPlan {
    transactions: Vec<Transaction>,

    /// `Ledger::fingerprint()` of the snapshot the plan settles
    fingerprint: String,
}

impl SettlementPlan {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of all transfer amounts (cents)
    pub fn total_transferred(&self) -> i64 {
        self.transactions.iter().map(Transaction::amount).sum()
    }

    /// True if the plan still describes `ledger` (nothing recorded since)
    pub fn is_current_for(&self, ledger: &Ledger) -> bool {
        self.fingerprint == ledger.fingerprint()
    }
}

/// Compute the transfer plan for a ledger
///
/// Callers normally check `is_session_complete` first. Called earlier, the
/// chips still in the pot show up as an imbalance and the computation fails
/// with `InvariantViolation`, unless nobody has bought in yet.
///
/// # Errors
/// `InvariantViolation` if the net balances are off by more than one cent.
pub fn compute_settlement(ledger: &Ledger) -> Result<SettlementPlan, SettlementError> {
    let transactions = compute_transactions(&ledger.net_balances())?;

    Ok(SettlementPlan {
        transactions,
        fingerprint: ledger.fingerprint(),
    })
}

/// Greedy netting over explicit balances
///
/// `balances` must be in ledger insertion order; that order breaks ties.
///
/// # Example
/// ```
/// use poker_ledger_core::{NetBalance, PlayerId};
/// use poker_ledger_core::settlement::compute_transactions;
///
/// let balances = vec![
///     NetBalance::new(PlayerId::from("P1"), -3000),
///     NetBalance::new(PlayerId::from("P2"), -1000),
///     NetBalance::new(PlayerId::from("P3"), 4000),
/// ];
///
/// let plan = compute_transactions(&balances).unwrap();
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan[0].from().as_str(), "P1");
/// assert_eq!(plan[0].amount(), 3000);
/// assert_eq!(plan[1].from().as_str(), "P2");
/// assert_eq!(plan[1].amount(), 1000);
/// ```
///
/// # Errors
/// - `InvariantViolation` if the balances are off by more than one cent
/// - `BalanceOverflow` if a balance cannot be negated, or the running
///   total or the amount owed to creditors leaves the i64 range
pub fn compute_transactions(balances: &[NetBalance]) -> Result<Vec<Transaction>, SettlementError> {
    let imbalance = checked_imbalance(balances)?;
    if imbalance.unsigned_abs() > BALANCE_TOLERANCE_CENTS.unsigned_abs() {
        return Err(SettlementError::InvariantViolation { imbalance });
    }

    // Working copies: (player, remaining balance)
    let mut debtors: Vec<(&PlayerId, i64)> = balances
        .iter()
        .filter(|b| b.net < 0 && !is_negligible(b.net))
        .map(|b| (&b.player_id, b.net))
        .collect();
    let mut creditors: Vec<(&PlayerId, i64)> = balances
        .iter()
        .filter(|b| b.net > 0 && !is_negligible(b.net))
        .map(|b| (&b.player_id, b.net))
        .collect();

    // sort_by_key is stable: equal balances keep insertion order
    debtors.sort_by_key(|&(_, net)| net);
    creditors.sort_by_key(|&(_, net)| Reverse(net));

    let mut transactions = Vec::with_capacity(debtors.len() + creditors.len());
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let (debtor, owed) = debtors[i];
        let (creditor, due) = creditors[j];
        let transfer = (-owed).min(due);

        if transfer > 0 {
            transactions.push(Transaction::new(debtor.clone(), creditor.clone(), transfer));
        }

        debtors[i].1 += transfer;
        creditors[j].1 -= transfer;

        if is_negligible(debtors[i].1) {
            i += 1;
        }
        if is_negligible(creditors[j].1) {
            j += 1;
        }
    }

    Ok(transactions)
}

/// Sum of all balances
///
/// Each balance must be negatable, and both the running sum and the total
/// owed to creditors (the volume a plan moves) must stay in range.
fn checked_imbalance(balances: &[NetBalance]) -> Result<i64, SettlementError> {
    let (imbalance, _credited) = balances.iter().try_fold(
        (0i64, 0i64),
        |(sum, credited), b| -> Result<(i64, i64), SettlementError> {
            let overflow = || SettlementError::BalanceOverflow {
                player_id: b.player_id.clone(),
            };
            b.net.checked_neg().ok_or_else(overflow)?;
            let sum = sum.checked_add(b.net).ok_or_else(overflow)?;
            let credited = credited.checked_add(b.net.max(0)).ok_or_else(overflow)?;
            Ok((sum, credited))
        },
    )?;
    Ok(imbalance)
}

/// Balances left after every transfer of `transactions` has been paid
///
/// A correct plan for balanced input leaves every player at zero.
pub fn residual_balances(balances: &[NetBalance], transactions: &[Transaction]) -> Vec<NetBalance> {
    let mut remaining: HashMap<&PlayerId, i64> =
        balances.iter().map(|b| (&b.player_id, b.net)).collect();

    for tx in transactions {
        // Paying moves the debtor up toward zero and the creditor down
        if let Some(net) = remaining.get_mut(tx.from()) {
            *net += tx.amount();
        }
        if let Some(net) = remaining.get_mut(tx.to()) {
            *net -= tx.amount();
        }
    }

    balances
        .iter()
        .map(|b| NetBalance::new(b.player_id.clone(), remaining[&b.player_id]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(entries: &[(&str, i64)]) -> Vec<NetBalance> {
        entries
            .iter()
            .map(|(id, net)| NetBalance::new(PlayerId::from(*id), *net))
            .collect()
    }

    fn as_tuples(transactions: &[Transaction]) -> Vec<(&str, &str, i64)> {
        transactions
            .iter()
            .map(|t| (t.from().as_str(), t.to().as_str(), t.amount()))
            .collect()
    }

    #[test]
    fn test_single_creditor_receives_everything() {
        let input = balances(&[("P1", -3000), ("P2", -1000), ("P3", 4000)]);
        let plan = compute_transactions(&input).unwrap();
        assert_eq!(
            as_tuples(&plan),
            vec![("P1", "P3", 3000), ("P2", "P3", 1000)]
        );
    }

    #[test]
    fn test_sorting_picks_extremes_first() {
        let input = balances(&[("A", -500), ("B", 1500), ("C", -2500), ("D", 1500)]);
        let plan = compute_transactions(&input).unwrap();
        // Debtors [C, A], creditors [B, D] (tie keeps insertion order)
        assert_eq!(
            as_tuples(&plan),
            vec![("C", "B", 1500), ("C", "D", 1000), ("A", "D", 500)]
        );
    }

    #[test]
    fn test_even_players_are_skipped() {
        let input = balances(&[("A", 0), ("B", -700), ("C", 0), ("D", 700)]);
        let plan = compute_transactions(&input).unwrap();
        assert_eq!(as_tuples(&plan), vec![("B", "D", 700)]);
    }

    #[test]
    fn test_all_even_yields_empty_plan() {
        let input = balances(&[("A", 0), ("B", 0)]);
        assert!(compute_transactions(&input).unwrap().is_empty());
        assert!(compute_transactions(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_imbalance_is_invariant_violation() {
        let input = balances(&[("A", -1000), ("B", 900)]);
        assert_eq!(
            compute_transactions(&input),
            Err(SettlementError::InvariantViolation { imbalance: -100 })
        );
    }

    #[test]
    fn test_overflowing_balances_rejected() {
        let input = balances(&[("A", i64::MAX), ("B", 1), ("C", -1)]);
        assert_eq!(
            compute_transactions(&input),
            Err(SettlementError::BalanceOverflow {
                player_id: PlayerId::from("B")
            })
        );

        // Running sum never leaves range, but creditors are owed 2 * MAX
        let input = balances(&[("A", i64::MAX), ("B", -i64::MAX), ("C", i64::MAX), ("D", -i64::MAX)]);
        assert_eq!(
            compute_transactions(&input),
            Err(SettlementError::BalanceOverflow {
                player_id: PlayerId::from("C")
            })
        );

        let input = balances(&[("A", i64::MIN), ("B", i64::MAX)]);
        assert_eq!(
            compute_transactions(&input),
            Err(SettlementError::BalanceOverflow {
                player_id: PlayerId::from("A")
            })
        );
    }

    #[test]
    fn test_extreme_but_valid_balances() {
        let input = balances(&[("A", -i64::MAX), ("B", i64::MAX)]);
        let plan = compute_transactions(&input).unwrap();
        assert_eq!(as_tuples(&plan), vec![("A", "B", i64::MAX)]);
    }

    #[test]
    fn test_one_cent_residue_tolerated() {
        let input = balances(&[("A", -1001), ("B", 1000)]);
        let plan = compute_transactions(&input).unwrap();
        assert_eq!(as_tuples(&plan), vec![("A", "B", 1000)]);
    }

    #[test]
    fn test_residual_balances_zeroed_by_plan() {
        let input = balances(&[("A", -500), ("B", 1500), ("C", -2500), ("D", 1500)]);
        let plan = compute_transactions(&input).unwrap();
        let residual = residual_balances(&input, &plan);
        assert!(residual.iter().all(|b| b.net == 0));
    }
}
