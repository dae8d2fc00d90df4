//! Error codes for the session ledger API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the session ledger API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Buy-in amount must be a positive whole number
    InvalidAmount,
    /// Stack must be a non-negative whole number
    InvalidStack,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Session not found (or not active, for join-by-code)
    SessionNotFound,
    /// Buy-in request not found or already resolved
    RequestNotFound,
    /// Player not found in the session
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Session already ended; mutation refused
    SessionEnded,
    /// Approval target has left the session
    PlayerNotInSession,
    /// Session code already exists
    CodeConflict,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidStack => "INVALID_STACK",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::RequestNotFound => "REQUEST_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::SessionEnded => "SESSION_ENDED",
            Self::PlayerNotInSession => "PLAYER_NOT_IN_SESSION",
            Self::CodeConflict => "CODE_CONFLICT",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
