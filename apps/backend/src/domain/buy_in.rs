//! Buy-in request lifecycle.
//!
//! A request moves Pending -> Approved or Pending -> Rejected exactly once;
//! both outcomes remove it from the session's pending queue. Approval is the
//! only path that creates a `BuyIn` ledger record and credits totals, and it
//! is all-or-nothing: every check happens before the first mutation.

use time::OffsetDateTime;
use ulid::Ulid;

use crate::domain::reconcile;
use crate::domain::session::{Amount, BuyIn, BuyInRequest, Identity, RequestStatus, Session};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Queue a pending buy-in request for the acting user.
///
/// Returns the id of the new request.
pub fn request_buy_in(
    session: &mut Session,
    identity: &Identity,
    amount: Amount,
) -> Result<String, DomainError> {
    if !session.is_active() {
        return Err(DomainError::invalid_state(format!(
            "session {} has ended; buy-ins are closed",
            session.id
        )));
    }
    if amount <= 0 {
        return Err(DomainError::validation(
            ValidationKind::Amount,
            "buy-in amount must be a positive whole number",
        ));
    }

    let request = BuyInRequest {
        id: Ulid::new().to_string(),
        user_id: identity.user_id.clone(),
        user_name: identity.user_name.clone(),
        user_picture: identity.user_picture.clone(),
        amount,
        status: RequestStatus::Pending,
        requested_at: OffsetDateTime::now_utc(),
    };
    let id = request.id.clone();
    session.buy_in_requests.push(request);
    Ok(id)
}

/// Approve a pending request: record the BuyIn on the player, credit player
/// and session totals, and drop the request from the queue.
///
/// An absent request id means the request was already resolved (or never
/// existed), so retried approvals cannot double-credit. If the requesting
/// player has left the session the request is left untouched for manual
/// resolution; totals are never credited without a member to attach the
/// ledger record to.
pub fn approve_buy_in(
    session: &mut Session,
    request_id: &str,
    approved_by: &str,
) -> Result<(), DomainError> {
    if !session.is_active() {
        return Err(DomainError::invalid_state(format!(
            "session {} has ended; buy-ins are closed",
            session.id
        )));
    }

    let pos = session
        .buy_in_requests
        .iter()
        .position(|r| r.id == request_id)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Request,
                format!("buy-in request {request_id} not found or already resolved"),
            )
        })?;

    let request = session.buy_in_requests[pos].clone();
    let player = match session.player_mut(&request.user_id) {
        Some(p) if p.is_member() => p,
        _ => {
            return Err(DomainError::player_not_in_session(format!(
                "player {} is no longer a member; request {request_id} left pending",
                request.user_id
            )))
        }
    };

    player.buy_ins.push(BuyIn {
        id: request.id,
        amount: request.amount,
        status: RequestStatus::Approved,
        requested_at: request.requested_at,
        approved_at: OffsetDateTime::now_utc(),
        approved_by: approved_by.to_string(),
    });
    player.total_buy_in += request.amount;
    player.profit_loss = player.current_stack - player.total_buy_in;
    session.buy_in_requests.remove(pos);

    reconcile::recompute_totals(session);
    Ok(())
}

/// Reject a pending request: drop it from the queue with no ledger effect.
pub fn reject_buy_in(session: &mut Session, request_id: &str) -> Result<(), DomainError> {
    if !session.is_active() {
        return Err(DomainError::invalid_state(format!(
            "session {} has ended; buy-ins are closed",
            session.id
        )));
    }

    let pos = session
        .buy_in_requests
        .iter()
        .position(|r| r.id == request_id)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Request,
                format!("buy-in request {request_id} not found or already resolved"),
            )
        })?;
    session.buy_in_requests.remove(pos);
    Ok(())
}

/// Player-initiated cleanup of a resolved request record.
///
/// Cosmetic only: pending requests stay put (they belong to the admin to
/// resolve), unknown ids are a no-op, and the ledger is never touched.
/// Idempotent by construction.
pub fn dismiss_buy_in_request(session: &mut Session, request_id: &str) {
    session
        .buy_in_requests
        .retain(|r| r.id != request_id || r.status == RequestStatus::Pending);
}
