//! Session orchestration service.
//!
//! Glues the store and the domain layer together: every mutation runs as a
//! single unit of work through [`SessionStore::update`], so handlers never
//! see a partially applied change.

use tracing::info;

use crate::domain::buy_in;
use crate::domain::reconcile;
use crate::domain::session::{Amount, Identity, Session};
use crate::domain::settlement::{self, Settlement};
use crate::domain::ValidationReport;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::store::SessionStore;
use crate::utils::session_code::generate_session_code;

/// Attempts at drawing an unused session code before giving up. The code
/// space holds 36^6 values, so exhausting this means the store is
/// effectively full.
const CODE_ATTEMPTS: usize = 10;

/// Session domain service.
pub struct SessionService;

impl SessionService {
    pub fn new() -> Self {
        Self
    }

    /// Create a new active session, allocating a unique join code.
    pub fn create(
        &self,
        store: &SessionStore,
        name: String,
        admin_id: String,
        admin_name: String,
    ) -> Result<Session, DomainError> {
        for _ in 0..CODE_ATTEMPTS {
            let code = generate_session_code();
            match store.insert(Session::new(
                name.clone(),
                admin_id.clone(),
                admin_name.clone(),
                code,
            )) {
                Err(DomainError::Conflict(ConflictKind::CodeTaken, _)) => continue,
                Ok(session) => {
                    info!(session_id = %session.id, code = %session.code, "session created");
                    return Ok(session);
                }
                Err(e) => return Err(e),
            }
        }
        Err(DomainError::conflict(
            ConflictKind::CodeTaken,
            "could not allocate a unique session code",
        ))
    }

    /// Sessions where the user is admin or member, newest first.
    pub fn list_for(&self, store: &SessionStore, user_id: &str) -> Vec<Session> {
        store.list_for_user(user_id)
    }

    /// Snapshot of a session by id.
    pub fn get(&self, store: &SessionStore, session_id: &str) -> Result<Session, DomainError> {
        store.get(session_id).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Session,
                format!("session {session_id} not found"),
            )
        })
    }

    /// Join an active session by code. Re-joining is idempotent.
    pub fn join(
        &self,
        store: &SessionStore,
        code: &str,
        identity: Identity,
    ) -> Result<Session, DomainError> {
        let not_found =
            || DomainError::not_found(NotFoundKind::Session, "session not found or ended");

        let session = store.find_by_code(code).ok_or_else(not_found)?;
        let (session, joined) = store.update(&session.id, |s| {
            // The session may have ended between lookup and lock
            if !s.is_active() {
                return Err(not_found());
            }
            Ok(s.join(identity))
        })?;
        if joined {
            info!(session_id = %session.id, "player joined session");
        }
        Ok(session)
    }

    /// Queue a pending buy-in request.
    pub fn request_buy_in(
        &self,
        store: &SessionStore,
        session_id: &str,
        identity: Identity,
        amount: Amount,
    ) -> Result<Session, DomainError> {
        let (session, request_id) =
            store.update(session_id, |s| buy_in::request_buy_in(s, &identity, amount))?;
        info!(session_id = %session.id, request_id = %request_id, amount, "buy-in requested");
        Ok(session)
    }

    /// Approve a pending buy-in, crediting the player and session ledgers.
    pub fn approve_buy_in(
        &self,
        store: &SessionStore,
        session_id: &str,
        request_id: &str,
        approved_by: &str,
    ) -> Result<Session, DomainError> {
        let (session, _) =
            store.update(session_id, |s| buy_in::approve_buy_in(s, request_id, approved_by))?;
        info!(session_id = %session.id, request_id = %request_id, "buy-in approved");
        Ok(session)
    }

    /// Reject a pending buy-in with no ledger effect.
    pub fn reject_buy_in(
        &self,
        store: &SessionStore,
        session_id: &str,
        request_id: &str,
    ) -> Result<Session, DomainError> {
        let (session, _) = store.update(session_id, |s| buy_in::reject_buy_in(s, request_id))?;
        info!(session_id = %session.id, request_id = %request_id, "buy-in rejected");
        Ok(session)
    }

    /// Cosmetic removal of a resolved request record; idempotent.
    pub fn dismiss_buy_in_request(
        &self,
        store: &SessionStore,
        session_id: &str,
        request_id: &str,
    ) -> Result<Session, DomainError> {
        let (session, _) = store.update(session_id, |s| {
            buy_in::dismiss_buy_in_request(s, request_id);
            Ok(())
        })?;
        Ok(session)
    }

    /// Set a player's current stack and rederive totals.
    pub fn update_stack(
        &self,
        store: &SessionStore,
        session_id: &str,
        user_id: &str,
        stack: Amount,
    ) -> Result<Session, DomainError> {
        let (session, _) =
            store.update(session_id, |s| reconcile::update_stack(s, user_id, stack))?;
        Ok(session)
    }

    /// End the session. Idempotent: ending twice returns the same terminal
    /// state with the original `ended_at`.
    pub fn end(&self, store: &SessionStore, session_id: &str) -> Result<Session, DomainError> {
        let (session, ended_now) = store.update(session_id, |s| Ok(reconcile::end(s)))?;
        if ended_now {
            info!(
                session_id = %session.id,
                is_valid = session.is_valid,
                total_buy_in = session.total_buy_in,
                total_stack = session.total_stack,
                "session ended"
            );
        }
        Ok(session)
    }

    /// Balance check against the current player list. Read-only.
    pub fn validate(
        &self,
        store: &SessionStore,
        session_id: &str,
    ) -> Result<ValidationReport, DomainError> {
        let session = self.get(store, session_id)?;
        Ok(reconcile::validate(&session))
    }

    /// Compute who pays whom from a snapshot of the session's players.
    ///
    /// Pure read: callable at any time, though it is normally rendered once
    /// the session has ended. An unbalanced ledger shows up as unsettled
    /// residuals on the result, never as an error.
    pub fn settlement(
        &self,
        store: &SessionStore,
        session_id: &str,
    ) -> Result<Settlement, DomainError> {
        let session = self.get(store, session_id)?;
        Ok(settlement::settle(&settlement::balances_of(&session)))
    }
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}
