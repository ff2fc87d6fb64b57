//! Integration tests for settlement
//!
//! End-to-end over a real `Ledger`: pot, completion, netting, summaries.

use poker_ledger_core::settlement::{
    compute_pot, compute_transactions, is_session_complete, player_summaries, residual_balances,
    session_phase,
};
use poker_ledger_core::{
    compute_settlement, Ledger, NetBalance, PlayerId, PlayerOutcome, SessionPhase,
    SettlementError,
};

fn net(id: &str, amount: i64) -> NetBalance {
    NetBalance::new(PlayerId::from(id), amount)
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_scenario_single_creditor() {
    // P1 = -30, P2 = -10, P3 = +40
    let balances = vec![net("P1", -3000), net("P2", -1000), net("P3", 4000)];
    let plan = compute_transactions(&balances).unwrap();

    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].from().as_str(), "P1");
    assert_eq!(plan[0].to().as_str(), "P3");
    assert_eq!(plan[0].amount_decimal(), 30.0);
    assert_eq!(plan[1].from().as_str(), "P2");
    assert_eq!(plan[1].to().as_str(), "P3");
    assert_eq!(plan[1].amount_decimal(), 10.0);
}

/// One player still holds chips while the others already net to zero.
fn scenario_with_holdout() -> (Ledger, [PlayerId; 3]) {
    let mut ledger = Ledger::new();
    let p1 = ledger.add_player("P1").unwrap();
    let p2 = ledger.add_player("P2").unwrap();
    let p3 = ledger.add_player("P3").unwrap();

    for id in [&p1, &p2, &p3] {
        ledger.record_buy_in(id, 2000).unwrap();
    }
    ledger.record_cash_out(&p2, 2500).unwrap();
    ledger.record_cash_out(&p3, 1500).unwrap();

    (ledger, [p1, p2, p3])
}

#[test]
fn test_holdout_blocks_completion() {
    let (ledger, [p1, p2, p3]) = scenario_with_holdout();

    assert_eq!(ledger.net_amount(&p2).unwrap(), 500);
    assert_eq!(ledger.net_amount(&p3).unwrap(), -500);
    assert!(ledger.player(&p1).unwrap().is_active());
    assert!(!is_session_complete(&ledger));
    assert_eq!(session_phase(&ledger), SessionPhase::InPlay);
}

#[test]
fn test_holdout_cashes_out_remaining_pot() {
    let (mut ledger, [p1, p2, p3]) = scenario_with_holdout();
    assert_eq!(compute_pot(&ledger), 2000);

    ledger.record_cash_out(&p1, 2000).unwrap();
    assert_eq!(compute_pot(&ledger), 0);
    assert!(is_session_complete(&ledger));

    let plan = compute_settlement(&ledger).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.transactions()[0].from(), &p3);
    assert_eq!(plan.transactions()[0].to(), &p2);
    assert_eq!(plan.transactions()[0].amount(), 500);
}

#[test]
fn test_holdout_short_cash_out_leaves_session_settling() {
    let (mut ledger, [p1, _, _]) = scenario_with_holdout();

    // 15 of the 20 left in the pot: everybody settled, chips remain
    ledger.record_cash_out(&p1, 1500).unwrap();
    assert_eq!(compute_pot(&ledger), 500);
    assert_eq!(session_phase(&ledger), SessionPhase::Settling);
    assert!(!is_session_complete(&ledger));
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_all_even_session_has_empty_plan() {
    let mut ledger = Ledger::new();
    let a = ledger.add_player("A").unwrap();
    let b = ledger.add_player("B").unwrap();
    ledger.record_buy_in(&a, 1000).unwrap();
    ledger.record_buy_in(&b, 1000).unwrap();
    ledger.record_cash_out(&a, 1000).unwrap();
    ledger.record_cash_out(&b, 1000).unwrap();

    assert!(is_session_complete(&ledger));
    assert!(compute_settlement(&ledger).unwrap().is_empty());
}

#[test]
fn test_empty_ledger_settles_to_nothing() {
    let ledger = Ledger::new();
    assert!(compute_settlement(&ledger).unwrap().is_empty());
}

#[test]
fn test_settlement_mid_game_is_invariant_violation() {
    let mut ledger = Ledger::new();
    let a = ledger.add_player("A").unwrap();
    ledger.record_buy_in(&a, 1000).unwrap();

    assert_eq!(
        compute_settlement(&ledger),
        Err(SettlementError::InvariantViolation { imbalance: -1000 })
    );
}

#[test]
fn test_settlement_is_idempotent() {
    let mut ledger = Ledger::new();
    let ids: Vec<_> = ["A", "B", "C", "D"]
        .iter()
        .map(|n| ledger.add_player(n).unwrap())
        .collect();
    for id in &ids {
        ledger.record_buy_in(id, 2000).unwrap();
    }
    ledger.record_cash_out(&ids[0], 4500).unwrap();
    ledger.record_cash_out(&ids[1], 0).unwrap();
    ledger.record_cash_out(&ids[2], 2500).unwrap();
    ledger.record_cash_out(&ids[3], 1000).unwrap();

    let first = compute_settlement(&ledger).unwrap();
    let second = compute_settlement(&ledger).unwrap();
    assert_eq!(first, second);
    assert!(first.is_current_for(&ledger));
}

#[test]
fn test_plan_goes_stale_after_mutation() {
    let mut ledger = Ledger::new();
    let a = ledger.add_player("A").unwrap();
    ledger.record_buy_in(&a, 1000).unwrap();
    ledger.record_cash_out(&a, 1000).unwrap();

    let plan = compute_settlement(&ledger).unwrap();
    ledger.add_player("B").unwrap();
    assert!(!plan.is_current_for(&ledger));
}

#[test]
fn test_plan_zeroes_every_balance() {
    let balances = vec![
        net("A", 1250),
        net("B", -300),
        net("C", -2000),
        net("D", 1050),
        net("E", 0),
    ];
    let plan = compute_transactions(&balances).unwrap();

    // 2 debtors + 2 creditors
    assert!(plan.len() <= 3);
    assert!(plan.iter().all(|tx| tx.amount() > 0));
    assert!(residual_balances(&balances, &plan).iter().all(|b| b.net == 0));
}

#[test]
fn test_summaries_mark_outcomes() {
    let (mut ledger, [p1, _, _]) = scenario_with_holdout();
    ledger.record_cash_out(&p1, 2000).unwrap();

    let outcomes: Vec<_> = player_summaries(&ledger)
        .into_iter()
        .map(|s| (s.name, s.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("P1".to_string(), PlayerOutcome::Even),
            ("P2".to_string(), PlayerOutcome::Winner),
            ("P3".to_string(), PlayerOutcome::Loser),
        ]
    );
}
