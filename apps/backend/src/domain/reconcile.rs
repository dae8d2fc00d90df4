//! Ledger reconciliation: cached totals, the balance invariant, and the
//! end-of-session transition.
//!
//! [`recompute_totals`] is the only place session totals are derived, so the
//! sums are never computed two different ways in two call sites.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::session::{Amount, Session, SessionStatus};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Balance check result. Read-only and callable at any time, not just at end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub total_buy_ins: Amount,
    pub total_stacks: Amount,
    /// `total_buy_ins - total_stacks`; positive means chips are missing
    /// from the table.
    pub difference: Amount,
    pub message: String,
}

/// Recompute the session's cached totals from its player list.
pub fn recompute_totals(session: &mut Session) {
    session.total_buy_in = session.players.iter().map(|p| p.total_buy_in).sum();
    session.total_stack = session.players.iter().map(|p| p.current_stack).sum();
}

/// Set a player's current stack and rederive everything that depends on it.
///
/// Replaying an identical call yields an identical session.
pub fn update_stack(
    session: &mut Session,
    user_id: &str,
    stack: Amount,
) -> Result<(), DomainError> {
    if !session.is_active() {
        return Err(DomainError::invalid_state(format!(
            "session {} has ended; stacks are frozen",
            session.id
        )));
    }
    if stack < 0 {
        return Err(DomainError::validation(
            ValidationKind::Stack,
            "stack must be a non-negative whole number",
        ));
    }

    let player = session.player_mut(user_id).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Player,
            format!("player {user_id} is not in the session"),
        )
    })?;
    player.current_stack = stack;
    player.profit_loss = stack - player.total_buy_in;

    recompute_totals(session);
    Ok(())
}

/// Check the balance invariant from the player list.
pub fn validate(session: &Session) -> ValidationReport {
    let total_buy_ins: Amount = session.players.iter().map(|p| p.total_buy_in).sum();
    let total_stacks: Amount = session.players.iter().map(|p| p.current_stack).sum();
    let difference = total_buy_ins - total_stacks;
    let is_valid = difference == 0;

    let message = if is_valid {
        "Session is balanced! All buy-ins match total stacks.".to_string()
    } else if difference > 0 {
        format!("Difference: {} - Missing from table", difference.abs())
    } else {
        format!("Difference: {} - Extra on table", difference.abs())
    };

    ValidationReport {
        is_valid,
        total_buy_ins,
        total_stacks,
        difference,
        message,
    }
}

/// Transition the session to Ended, freezing the ledger and stamping the
/// balance verdict.
///
/// Idempotent: ending an already-ended session changes nothing (including
/// `ended_at`), so client retries see the same terminal state. Returns
/// whether a transition happened.
pub fn end(session: &mut Session) -> bool {
    if !session.is_active() {
        return false;
    }
    recompute_totals(session);
    session.status = SessionStatus::Ended;
    session.ended_at = Some(OffsetDateTime::now_utc());
    session.is_valid = validate(session).is_valid;
    true
}
