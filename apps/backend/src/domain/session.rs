//! Session aggregate and its owned entities.
//!
//! A `Session` is the sole owner of its `Player` and `BuyInRequest` records;
//! nothing outside the domain layer mutates them directly. Cached totals are
//! maintained exclusively by [`crate::domain::reconcile::recompute_totals`].

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;

/// Whole currency units. No fractional subunits are modeled anywhere.
pub type Amount = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Active,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// Acting user as supplied by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_picture: String,
}

/// Approved buy-in ledger entry. Immutable once created; rejected requests
/// never become `BuyIn` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyIn {
    pub id: String,
    pub amount: Amount,
    pub status: RequestStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub requested_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub approved_at: OffsetDateTime,
    pub approved_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub picture: String,
    pub buy_ins: Vec<BuyIn>,
    pub current_stack: Amount,
    pub total_buy_in: Amount,
    /// Derived: `current_stack - total_buy_in`. Recomputed on every change
    /// to either side, never settable on its own.
    pub profit_loss: Amount,
    pub status: PlayerStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

impl Player {
    fn joining(identity: Identity, now: OffsetDateTime) -> Self {
        Self {
            user_id: identity.user_id,
            name: identity.user_name,
            email: identity.user_email,
            picture: identity.user_picture,
            buy_ins: Vec::new(),
            current_stack: 0,
            total_buy_in: 0,
            profit_loss: 0,
            status: PlayerStatus::Active,
            joined_at: now,
        }
    }

    pub fn is_member(&self) -> bool {
        self.status == PlayerStatus::Active
    }
}

/// Pending buy-in, queued until the admin resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyInRequest {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_picture: String,
    pub amount: Amount,
    pub status: RequestStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub requested_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    /// 6-character uppercase alphanumeric join code.
    pub code: String,
    pub name: String,
    pub admin_id: String,
    pub admin_name: String,
    pub status: SessionStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    /// Ordered by join time, unique by `user_id`.
    pub players: Vec<Player>,
    /// Pending queue, ordered by request time.
    pub buy_in_requests: Vec<BuyInRequest>,
    /// Cached `Σ player.total_buy_in`; see `reconcile::recompute_totals`.
    pub total_buy_in: Amount,
    /// Cached `Σ player.current_stack`; see `reconcile::recompute_totals`.
    pub total_stack: Amount,
    /// Only meaningful once `status == Ended`.
    pub is_valid: bool,
    /// Bumped by the store on every committed mutation; feeds the ETag.
    #[serde(default)]
    pub lock_version: i32,
}

impl Session {
    pub fn new(name: String, admin_id: String, admin_name: String, code: String) -> Self {
        Self {
            id: Ulid::new().to_string(),
            code,
            name,
            admin_id,
            admin_name,
            status: SessionStatus::Active,
            created_at: OffsetDateTime::now_utc(),
            ended_at: None,
            players: Vec::new(),
            buy_in_requests: Vec::new(),
            total_buy_in: 0,
            total_stack: 0,
            is_valid: false,
            lock_version: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn player(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn player_mut(&mut self, user_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.user_id == user_id)
    }

    pub fn request(&self, request_id: &str) -> Option<&BuyInRequest> {
        self.buy_in_requests.iter().find(|r| r.id == request_id)
    }

    /// True if `user_id` is the admin or appears in the player list.
    pub fn involves(&self, user_id: &str) -> bool {
        self.admin_id == user_id || self.player(user_id).is_some()
    }

    /// Append a new zeroed player unless `user_id` already joined.
    ///
    /// Returns whether a player was added; re-joining is a no-op so client
    /// retries see the unchanged session.
    pub fn join(&mut self, identity: Identity) -> bool {
        if self.player(&identity.user_id).is_some() {
            return false;
        }
        self.players
            .push(Player::joining(identity, OffsetDateTime::now_utc()));
        true
    }
}
