// Unit tests for error mapping - pure domain logic without HTTP dependencies
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_kinds_to_400() {
    let amount = DomainError::validation(ValidationKind::Amount, "amount must be positive");
    let app: AppError = amount.into();
    assert_eq!(app.code(), ErrorCode::InvalidAmount);
    assert_eq!(app.status().as_u16(), 400);

    let stack = DomainError::validation(ValidationKind::Stack, "stack must be non-negative");
    let app: AppError = stack.into();
    assert_eq!(app.code(), ErrorCode::InvalidStack);
    assert_eq!(app.status().as_u16(), 400);

    let other = DomainError::validation(ValidationKind::Other("field".into()), "bad field");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_not_found_kinds() {
    let session = DomainError::not_found(NotFoundKind::Session, "no session");
    let app: AppError = session.into();
    assert_eq!(app.code().as_str(), "SESSION_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let request = DomainError::not_found(NotFoundKind::Request, "no request");
    let app: AppError = request.into();
    assert_eq!(app.code().as_str(), "REQUEST_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let player = DomainError::not_found(NotFoundKind::Player, "no player");
    let app: AppError = player.into();
    assert_eq!(app.code().as_str(), "PLAYER_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_invalid_state_to_409_session_ended() {
    let ended = DomainError::invalid_state("session has ended");
    let app: AppError = ended.into();
    assert_eq!(app.code(), ErrorCode::SessionEnded);
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_player_not_in_session_to_409() {
    let gone = DomainError::player_not_in_session("player left");
    let app: AppError = gone.into();
    assert_eq!(app.code(), ErrorCode::PlayerNotInSession);
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_conflicts() {
    let code = DomainError::conflict(ConflictKind::CodeTaken, "code exists");
    let app: AppError = code.into();
    assert_eq!(app.code().as_str(), "CODE_CONFLICT");
    assert_eq!(app.status().as_u16(), 409);

    let lock = DomainError::conflict(ConflictKind::OptimisticLock, "version mismatch");
    let app: AppError = lock.into();
    assert_eq!(app.code().as_str(), "OPTIMISTIC_LOCK");
    assert_eq!(app.status().as_u16(), 409);

    // Generic conflict fallback
    let other = DomainError::conflict(ConflictKind::Other("other".into()), "generic");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn domain_purity_check() {
    // Domain errors are constructible without HTTP imports and convert cleanly
    let validation = DomainError::validation(ValidationKind::Other("X".into()), "test");
    let invalid_state = DomainError::invalid_state("test");
    let not_found = DomainError::not_found(NotFoundKind::Session, "test");
    let gone = DomainError::player_not_in_session("test");
    let conflict = DomainError::conflict(ConflictKind::CodeTaken, "test");

    let _: AppError = validation.into();
    let _: AppError = invalid_state.into();
    let _: AppError = not_found.into();
    let _: AppError = gone.into();
    let _: AppError = conflict.into();
}
