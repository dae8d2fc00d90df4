//! Domain layer: the session ledger and settlement engine.
//!
//! Everything here is pure business logic over the [`session::Session`]
//! aggregate; no HTTP or storage imports.

pub mod buy_in;
pub mod reconcile;
pub mod session;
pub mod settlement;

#[cfg(test)]
mod tests_props_settlement;
#[cfg(test)]
mod tests_settlement;

// Re-exports for ergonomics
pub use reconcile::ValidationReport;
pub use session::{Amount, BuyIn, BuyInRequest, Identity, Player, Session, SessionStatus};
pub use settlement::{settle, PlayerBalance, Settlement, Transaction};
