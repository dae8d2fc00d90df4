//! Settlement engine: minimum-transaction debt netting.
//!
//! Pure function over a snapshot of player balances; no side effects, no
//! aggregate access. Committing a settlement (if that ever becomes a
//! feature) would be a separate transactional write.

use serde::{Deserialize, Serialize};

use crate::domain::session::{Amount, Session};

/// One player's finalized position, in session join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBalance {
    pub user_id: String,
    pub name: String,
    pub total_buy_in: Amount,
    pub current_stack: Amount,
}

impl PlayerBalance {
    fn net(&self) -> Amount {
        self.current_stack - self.total_buy_in
    }
}

/// A single settling payment. Amounts are strictly positive whole units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub from: String,
    pub from_id: String,
    pub to: String,
    pub to_id: String,
    pub amount: Amount,
}

/// A residual claim that had no counterparty. Reporting only; never a
/// fabricated transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsettledBalance {
    pub user_id: String,
    pub name: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub transactions: Vec<Transaction>,
    pub unsettled_winners: Vec<UnsettledBalance>,
    pub unsettled_losers: Vec<UnsettledBalance>,
}

impl Settlement {
    pub fn is_fully_settled(&self) -> bool {
        self.unsettled_winners.is_empty() && self.unsettled_losers.is_empty()
    }
}

struct Party {
    /// Position in the input slice; the stable tie-breaker.
    idx: usize,
    user_id: String,
    name: String,
    remaining: Amount,
}

/// Convert final balances into a minimal set of pairwise payments.
///
/// Players with zero net are excluded. Creditors and debtors are each sorted
/// descending by magnitude (ties broken by original input order, so the
/// output is deterministic), then matched greedily largest against largest;
/// each payment extinguishes at least one side, which bounds the output at
/// `n - 1` transactions for a balanced session. If the session is not
/// balanced, whichever side is left after the other runs dry is reported
/// verbatim as unsettled.
pub fn settle(players: &[PlayerBalance]) -> Settlement {
    let mut creditors: Vec<Party> = Vec::new();
    let mut debtors: Vec<Party> = Vec::new();

    for (idx, p) in players.iter().enumerate() {
        let net = p.net();
        if net == 0 {
            continue;
        }
        let party = Party {
            idx,
            user_id: p.user_id.clone(),
            name: p.name.clone(),
            remaining: net.abs(),
        };
        if net > 0 {
            creditors.push(party);
        } else {
            debtors.push(party);
        }
    }

    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining).then(a.idx.cmp(&b.idx)));
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining).then(a.idx.cmp(&b.idx)));

    let mut transactions = Vec::new();
    let mut ci = 0;
    let mut di = 0;
    while ci < creditors.len() && di < debtors.len() {
        let amount = creditors[ci].remaining.min(debtors[di].remaining);
        transactions.push(Transaction {
            from: debtors[di].name.clone(),
            from_id: debtors[di].user_id.clone(),
            to: creditors[ci].name.clone(),
            to_id: creditors[ci].user_id.clone(),
            amount,
        });
        creditors[ci].remaining -= amount;
        debtors[di].remaining -= amount;
        if creditors[ci].remaining == 0 {
            ci += 1;
        }
        if debtors[di].remaining == 0 {
            di += 1;
        }
    }

    let unsettled = |parties: &[Party]| {
        parties
            .iter()
            .filter(|p| p.remaining > 0)
            .map(|p| UnsettledBalance {
                user_id: p.user_id.clone(),
                name: p.name.clone(),
                amount: p.remaining,
            })
            .collect::<Vec<_>>()
    };

    Settlement {
        unsettled_winners: unsettled(&creditors[ci..]),
        unsettled_losers: unsettled(&debtors[di..]),
        transactions,
    }
}

/// Snapshot a session's players into settlement input, preserving join order.
pub fn balances_of(session: &Session) -> Vec<PlayerBalance> {
    session
        .players
        .iter()
        .map(|p| PlayerBalance {
            user_id: p.user_id.clone(),
            name: p.name.clone(),
            total_buy_in: p.total_buy_in,
            current_stack: p.current_stack,
        })
        .collect()
}
