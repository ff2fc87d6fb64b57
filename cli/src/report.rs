//! Human and JSON rendering of a session outcome

use crate::script::Rejection;
use poker_ledger_core::core::money::cents_to_decimal;
use poker_ledger_core::{PlayerSummary, SessionController, SessionPhase, Transaction};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct RejectedAction {
    pub index: usize,
    pub reason: String,
}

/// Everything printed after a replay
#[derive(Debug, Serialize)]
pub struct Report {
    pub room_code: String,
    pub phase: SessionPhase,
    pub pot: i64,
    pub players: Vec<PlayerSummary>,

    /// Present only when the session is complete
    pub settlement: Option<Vec<Transaction>>,

    /// Set when settlement was attempted and failed
    pub settlement_error: Option<String>,

    pub rejected: Vec<RejectedAction>,
}

impl Report {
    pub fn build(session: &SessionController, rejections: &[Rejection]) -> Self {
        let (settlement, settlement_error) = if session.is_session_complete() {
            match session.compute_settlement() {
                Ok(plan) => (Some(plan.into_transactions()), None),
                Err(err) => (None, Some(err.to_string())),
            }
        } else {
            (None, None)
        };

        Self {
            room_code: session.room_code().to_string(),
            phase: session.phase(),
            pot: session.total_pot(),
            players: session.player_summaries(),
            settlement,
            settlement_error,
            rejected: rejections
                .iter()
                .map(|r| RejectedAction {
                    index: r.index,
                    reason: r.error.to_string(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Room {} ({})", self.room_code, self.phase)?;
        writeln!(f, "Pot: {:.2}", cents_to_decimal(self.pot))?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<16} {:>10} {:>10} {:>10}  outcome",
            "player", "buy-in", "cash-out", "net"
        )?;
        for p in &self.players {
            writeln!(
                f,
                "{:<16} {:>10.2} {:>10.2} {:>+10.2}  {:?}",
                p.name,
                cents_to_decimal(p.total_buy_in),
                cents_to_decimal(p.total_cash_out),
                cents_to_decimal(p.net),
                p.outcome
            )?;
        }

        let names: HashMap<_, _> = self
            .players
            .iter()
            .map(|p| (&p.player_id, p.name.as_str()))
            .collect();

        writeln!(f)?;
        match (&self.settlement, &self.settlement_error) {
            (Some(transactions), _) if transactions.is_empty() => {
                writeln!(f, "Everyone is even, nothing to settle")?
            }
            (Some(transactions), _) => {
                writeln!(f, "Settlement:")?;
                for tx in transactions {
                    writeln!(
                        f,
                        "  {} pays {} {:.2}",
                        names.get(tx.from()).copied().unwrap_or(tx.from().as_str()),
                        names.get(tx.to()).copied().unwrap_or(tx.to().as_str()),
                        tx.amount_decimal()
                    )?;
                }
            }
            (None, Some(err)) => writeln!(f, "Settlement failed: {}", err)?,
            (None, None) => writeln!(f, "Session not complete, no settlement yet")?,
        }

        if !self.rejected.is_empty() {
            writeln!(f)?;
            writeln!(f, "Rejected actions:")?;
            for r in &self.rejected {
                writeln!(f, "  #{}: {}", r.index, r.reason)?;
            }
        }

        Ok(())
    }
}
