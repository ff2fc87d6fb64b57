//! Transaction model
//!
//! A settlement transaction is a single peer-to-peer transfer: one debtor
//! pays one creditor. Transactions are derived output of the settlement
//! engine and are never stored in the ledger.
//!
//! CRITICAL: All money values are i64 (cents)

use crate::core::money::cents_to_decimal;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Transfer from a debtor to a creditor
///
/// # Example
/// ```
/// use poker_ledger_core::{PlayerId, Transaction};
///
/// let tx = Transaction::new(PlayerId::from("p1"), PlayerId::from("p3"), 3000);
/// assert_eq!(tx.amount(), 3000);
/// assert_eq!(tx.amount_decimal(), 30.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Paying player (net loser)
    from: PlayerId,

    /// Receiving player (net winner)
    to: PlayerId,

    /// Amount in cents (always > 0)
    amount: i64,
}

impl Transaction {
    /// Create a transfer
    ///
    /// # Panics
    /// Panics if `amount <= 0`
    pub fn new(from: PlayerId, to: PlayerId, amount: i64) -> Self {
        assert!(amount > 0, "transaction amount must be positive");
        Self { from, to, amount }
    }

    pub fn from(&self) -> &PlayerId {
        &self.from
    }

    pub fn to(&self) -> &PlayerId {
        &self.to
    }

    /// Amount in cents
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Amount as a 2-decimal value for display
    pub fn amount_decimal(&self) -> f64 {
        cents_to_decimal(self.amount)
    }
}

/// A player's final position: cash-outs minus buy-ins (cents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetBalance {
    pub player_id: PlayerId,
    pub net: i64,
}

impl NetBalance {
    pub fn new(player_id: PlayerId, net: i64) -> Self {
        Self { player_id, net }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "transaction amount must be positive")]
    fn test_zero_amount_panics() {
        Transaction::new(PlayerId::from("a"), PlayerId::from("b"), 0);
    }

    #[test]
    fn test_accessors() {
        let tx = Transaction::new(PlayerId::from("a"), PlayerId::from("b"), 1234);
        assert_eq!(tx.from().as_str(), "a");
        assert_eq!(tx.to().as_str(), "b");
        assert_eq!(tx.amount_decimal(), 12.34);
    }
}
