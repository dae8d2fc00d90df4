//! In-memory session store.
//!
//! Stand-in for the durable store the deployment environment provides. It
//! keeps the contract the rest of the crate relies on:
//!
//! - every mutation of one session runs under that entry's lock, so two
//!   concurrent approvals cannot both read stale totals and lose one
//!   increment; operations on different sessions proceed in parallel
//! - a failed mutation restores the pre-image, so partial writes are never
//!   observable
//! - reads return cloned snapshots, never a half-applied mutation
//! - `lock_version` increases on every committed change and feeds the ETag
//! - session codes are unique; duplicates are rejected for the caller to
//!   retry with a fresh code

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::session::Session;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    /// code -> session id, the uniqueness index for join codes.
    codes: DashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly created session, reserving its code.
    pub fn insert(&self, session: Session) -> Result<Session, DomainError> {
        match self.codes.entry(session.code.clone()) {
            Entry::Occupied(_) => {
                return Err(DomainError::conflict(
                    ConflictKind::CodeTaken,
                    format!("session code {} already exists", session.code),
                ));
            }
            Entry::Vacant(slot) => {
                slot.insert(session.id.clone());
            }
        }
        self.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    /// Snapshot of one session by id.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    /// Snapshot of one session by join code (codes are stored uppercase).
    pub fn find_by_code(&self, code: &str) -> Option<Session> {
        let id = self.codes.get(&code.to_uppercase())?.value().clone();
        self.get(&id)
    }

    /// Sessions where `user_id` is the admin or a member, newest first.
    pub fn list_for_user(&self, user_id: &str) -> Vec<Session> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .filter(|s| s.involves(user_id))
            .map(|s| s.value().clone())
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        sessions
    }

    /// Run a mutation against one session as a single unit of work.
    ///
    /// The closure executes under the entry's lock and must not touch the
    /// store itself. On `Err` the pre-image is restored and the error
    /// propagated; on `Ok` the lock version is bumped, but only if the
    /// closure actually changed something, so idempotent replays commit
    /// nothing and the ETag stays put.
    pub fn update<R>(
        &self,
        id: &str,
        mutation: impl FnOnce(&mut Session) -> Result<R, DomainError>,
    ) -> Result<(Session, R), DomainError> {
        let mut entry = self.sessions.get_mut(id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, format!("session {id} not found"))
        })?;

        let before = entry.value().clone();
        match mutation(&mut entry) {
            Ok(result) => {
                if *entry != before {
                    entry.lock_version += 1;
                }
                Ok((entry.value().clone(), result))
            }
            Err(e) => {
                *entry = before;
                Err(e)
            }
        }
    }
}
