//! Property tests for the settlement engine (pure domain, no HTTP).
//!
//! Properties tested:
//! - Balanced input: applying every transaction zeroes every player's net
//! - Balanced input: at most n - 1 transactions, each strictly positive
//! - Any input: identical input produces an identical transaction list
//! - Any input: matched + residual amounts account for every unit on each side

use std::collections::HashMap;

use proptest::prelude::*;

use crate::domain::session::Amount;
use crate::domain::settlement::{settle, PlayerBalance};

/// Players whose nets sum to zero: generate n - 1 free nets plus a padding
/// amount per player, then give the last player the balancing net.
fn balanced_players() -> impl Strategy<Value = Vec<PlayerBalance>> {
    (2usize..8)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(-10_000i64..10_000, n - 1),
                prop::collection::vec(0i64..5_000, n),
            )
        })
        .prop_map(|(free_nets, padding)| {
            let mut nets = free_nets;
            let balance: Amount = -nets.iter().sum::<Amount>();
            nets.push(balance);
            nets.iter()
                .copied()
                .zip(padding)
                .enumerate()
                .map(|(i, (net, pad))| {
                    let total_buy_in = pad + if net < 0 { -net } else { 0 };
                    PlayerBalance {
                        user_id: format!("u{i}"),
                        name: format!("P{i}"),
                        total_buy_in,
                        current_stack: total_buy_in + net,
                    }
                })
                .collect()
        })
}

fn arbitrary_players() -> impl Strategy<Value = Vec<PlayerBalance>> {
    prop::collection::vec((0i64..20_000, 0i64..20_000), 0..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (total_buy_in, current_stack))| PlayerBalance {
                user_id: format!("u{i}"),
                name: format!("P{i}"),
                total_buy_in,
                current_stack,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_balanced_input_settles_every_net_to_zero(players in balanced_players()) {
        let result = settle(&players);

        prop_assert!(result.is_fully_settled());

        let mut nets: HashMap<String, Amount> = players
            .iter()
            .map(|p| (p.user_id.clone(), p.current_stack - p.total_buy_in))
            .collect();
        for tx in &result.transactions {
            *nets.get_mut(&tx.from_id).unwrap() += tx.amount;
            *nets.get_mut(&tx.to_id).unwrap() -= tx.amount;
        }
        for (user_id, net) in nets {
            prop_assert_eq!(net, 0, "player {} left with net {}", user_id, net);
        }
    }

    #[test]
    fn prop_balanced_input_uses_at_most_n_minus_1_positive_payments(players in balanced_players()) {
        let result = settle(&players);

        prop_assert!(result.transactions.len() <= players.len().saturating_sub(1));
        for tx in &result.transactions {
            prop_assert!(tx.amount > 0, "zero or negative payment emitted");
        }
    }

    #[test]
    fn prop_identical_input_yields_identical_output(players in arbitrary_players()) {
        let first = settle(&players);
        let second = settle(&players);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_matched_plus_residuals_account_for_both_sides(players in arbitrary_players()) {
        let result = settle(&players);

        let credit: Amount = players
            .iter()
            .map(|p| (p.current_stack - p.total_buy_in).max(0))
            .sum();
        let debit: Amount = players
            .iter()
            .map(|p| (p.total_buy_in - p.current_stack).max(0))
            .sum();

        let matched: Amount = result.transactions.iter().map(|tx| tx.amount).sum();
        let residual_winners: Amount = result.unsettled_winners.iter().map(|u| u.amount).sum();
        let residual_losers: Amount = result.unsettled_losers.iter().map(|u| u.amount).sum();

        prop_assert_eq!(matched + residual_winners, credit);
        prop_assert_eq!(matched + residual_losers, debit);
        // Only one side can be left unmatched
        prop_assert!(residual_winners == 0 || residual_losers == 0);
    }
}
