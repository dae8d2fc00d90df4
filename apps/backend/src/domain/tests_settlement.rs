//! Unit tests for the settlement engine, including the canonical scenarios.

use std::collections::HashMap;

use crate::domain::session::Amount;
use crate::domain::settlement::{settle, PlayerBalance, Settlement};

fn player(user_id: &str, name: &str, buy_in: Amount, stack: Amount) -> PlayerBalance {
    PlayerBalance {
        user_id: user_id.to_string(),
        name: name.to_string(),
        total_buy_in: buy_in,
        current_stack: stack,
    }
}

/// Apply every transaction to the players' nets and return the result.
fn nets_after_applying(players: &[PlayerBalance], result: &Settlement) -> HashMap<String, Amount> {
    let mut nets: HashMap<String, Amount> = players
        .iter()
        .map(|p| (p.user_id.clone(), p.current_stack - p.total_buy_in))
        .collect();
    for tx in &result.transactions {
        *nets.get_mut(&tx.from_id).expect("payer is a player") += tx.amount;
        *nets.get_mut(&tx.to_id).expect("payee is a player") -= tx.amount;
    }
    nets
}

#[test]
fn scenario_a_two_players_one_payment() {
    let players = vec![
        player("alice", "Alice", 8000, 13000),
        player("bob", "Bob", 5000, 0),
    ];
    let result = settle(&players);

    assert_eq!(result.transactions.len(), 1);
    let tx = &result.transactions[0];
    assert_eq!(tx.from_id, "bob");
    assert_eq!(tx.to_id, "alice");
    assert_eq!(tx.amount, 5000);
    assert!(result.is_fully_settled());
}

#[test]
fn scenario_b_three_players_two_payments() {
    // A net +3000, B net +2000, C net -5000
    let players = vec![
        player("a", "A", 1000, 4000),
        player("b", "B", 1000, 3000),
        player("c", "C", 5000, 0),
    ];
    let result = settle(&players);

    assert_eq!(result.transactions.len(), 2);
    assert_eq!(result.transactions[0].from_id, "c");
    assert_eq!(result.transactions[0].to_id, "a");
    assert_eq!(result.transactions[0].amount, 3000);
    assert_eq!(result.transactions[1].from_id, "c");
    assert_eq!(result.transactions[1].to_id, "b");
    assert_eq!(result.transactions[1].amount, 2000);
    assert!(result.is_fully_settled());
}

#[test]
fn scenario_c_unbalanced_residual_is_reported_not_fabricated() {
    // Buy-ins total 13000 against 10000 on the table: one creditor owed
    // 10000, one debtor owing 10000, and a second debtor whose 3000 claim
    // has no counterparty.
    let players = vec![
        player("winner", "Winner", 0, 10000),
        player("loser1", "Loser One", 10000, 0),
        player("loser2", "Loser Two", 3000, 0),
    ];
    let result = settle(&players);

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.transactions[0].from_id, "loser1");
    assert_eq!(result.transactions[0].to_id, "winner");
    assert_eq!(result.transactions[0].amount, 10000);

    assert!(result.unsettled_winners.is_empty());
    assert_eq!(result.unsettled_losers.len(), 1);
    assert_eq!(result.unsettled_losers[0].user_id, "loser2");
    assert_eq!(result.unsettled_losers[0].amount, 3000);
}

#[test]
fn unbalanced_toward_winners_reports_unsettled_winners() {
    // More on the table than was bought in
    let players = vec![
        player("w1", "W1", 1000, 4000),
        player("l1", "L1", 2000, 0),
    ];
    let result = settle(&players);

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.transactions[0].amount, 2000);
    assert_eq!(result.unsettled_winners.len(), 1);
    assert_eq!(result.unsettled_winners[0].user_id, "w1");
    assert_eq!(result.unsettled_winners[0].amount, 1000);
    assert!(result.unsettled_losers.is_empty());
}

#[test]
fn zero_net_players_are_excluded() {
    let players = vec![
        player("even", "Even", 5000, 5000),
        player("up", "Up", 1000, 2000),
        player("down", "Down", 2000, 1000),
    ];
    let result = settle(&players);

    assert_eq!(result.transactions.len(), 1);
    assert!(result
        .transactions
        .iter()
        .all(|tx| tx.from_id != "even" && tx.to_id != "even"));
    assert!(result.is_fully_settled());
}

#[test]
fn empty_and_all_even_inputs_produce_no_payments() {
    assert!(settle(&[]).transactions.is_empty());

    let players = vec![player("a", "A", 100, 100), player("b", "B", 0, 0)];
    let result = settle(&players);
    assert!(result.transactions.is_empty());
    assert!(result.is_fully_settled());
}

#[test]
fn equal_amounts_break_ties_by_join_order() {
    // Two creditors and two debtors, all with the same magnitude
    let players = vec![
        player("c2", "C2", 0, 1000),
        player("c1", "C1", 0, 1000),
        player("d2", "D2", 1000, 0),
        player("d1", "D1", 1000, 0),
    ];
    let result = settle(&players);

    assert_eq!(result.transactions.len(), 2);
    // Earlier-joined parties are matched first
    assert_eq!(result.transactions[0].to_id, "c2");
    assert_eq!(result.transactions[0].from_id, "d2");
    assert_eq!(result.transactions[1].to_id, "c1");
    assert_eq!(result.transactions[1].from_id, "d1");
}

#[test]
fn settlement_is_deterministic_across_runs() {
    let players = vec![
        player("a", "A", 4000, 9000),
        player("b", "B", 6000, 6000),
        player("c", "C", 5000, 2000),
        player("d", "D", 3000, 1000),
    ];
    let first = settle(&players);
    for _ in 0..10 {
        assert_eq!(settle(&players), first);
    }
}

#[test]
fn balanced_sessions_settle_to_zero_with_at_most_n_minus_1_payments() {
    let players = vec![
        player("a", "A", 2000, 7000),
        player("b", "B", 3000, 1000),
        player("c", "C", 4000, 2000),
        player("d", "D", 1000, 0),
    ];
    let result = settle(&players);

    assert!(result.transactions.len() <= players.len() - 1);
    assert!(result.transactions.iter().all(|tx| tx.amount > 0));
    assert!(result.is_fully_settled());
    assert!(nets_after_applying(&players, &result)
        .values()
        .all(|net| *net == 0));
}
