#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod domain;
pub mod error;
pub mod errors;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod trace_ctx;
pub mod utils;

// Re-exports for public API
pub use domain::session::{Identity, Session};
pub use domain::settlement::{settle, Settlement};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use services::SessionService;
pub use state::app_state::AppState;
pub use store::SessionStore;
