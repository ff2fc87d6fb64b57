//! Per-player session summary (the "game summary" grid at settlement time)

use crate::models::ledger::Ledger;
use crate::models::player::PlayerId;
use serde::Serialize;

/// How a player finished the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerOutcome {
    Winner,
    Loser,
    Even,
}

impl PlayerOutcome {
    pub fn from_net(net: i64) -> Self {
        match net {
            n if n > 0 => PlayerOutcome::Winner,
            n if n < 0 => PlayerOutcome::Loser,
            _ => PlayerOutcome::Even,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub player_id: PlayerId,
    pub name: String,
    pub total_buy_in: i64,
    pub total_cash_out: i64,
    pub net: i64,
    pub outcome: PlayerOutcome,
}

/// One summary per player, in insertion order
pub fn player_summaries(ledger: &Ledger) -> Vec<PlayerSummary> {
    ledger
        .players()
        .iter()
        .map(|p| PlayerSummary {
            player_id: p.id().clone(),
            name: p.name().to_string(),
            total_buy_in: p.total_buy_in(),
            total_cash_out: p.total_cash_out(),
            net: p.net_amount(),
            outcome: PlayerOutcome::from_net(p.net_amount()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes() {
        let mut ledger = Ledger::new();
        let a = ledger.add_player("A").unwrap();
        let b = ledger.add_player("B").unwrap();
        let c = ledger.add_player("C").unwrap();
        for id in [&a, &b, &c] {
            ledger.record_buy_in(id, 1000).unwrap();
        }
        ledger.record_cash_out(&a, 1500).unwrap();
        ledger.record_cash_out(&b, 500).unwrap();
        ledger.record_cash_out(&c, 1000).unwrap();

        let summaries = player_summaries(&ledger);
        let outcomes: Vec<_> = summaries.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            vec![PlayerOutcome::Winner, PlayerOutcome::Loser, PlayerOutcome::Even]
        );
        assert_eq!(summaries[0].net, 500);
        assert_eq!(summaries[1].total_cash_out, 500);
        assert_eq!(summaries[2].name, "C");
    }
}
