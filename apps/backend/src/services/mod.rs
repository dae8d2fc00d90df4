//! Service layer: orchestration between the store and the domain.

pub mod sessions;

pub use sessions::SessionService;
