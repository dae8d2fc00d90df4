//! Session HTTP routes.
//!
//! The acting user's identity travels in the request payloads (the identity
//! provider lives in front of this service); handlers stay thin and delegate
//! every rule to the service and domain layers.

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::session::{Amount, Identity, Session};
use crate::domain::settlement::Settlement;
use crate::error::AppError;
use crate::http::etag::{if_none_match_matches, session_etag};
use crate::services::SessionService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionRequest {
    name: String,
    admin_id: String,
    admin_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListSessionsQuery {
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct JoinSessionRequest {
    code: String,
    #[serde(flatten)]
    identity: Identity,
}

#[derive(Debug, Deserialize)]
struct BuyInRequestBody {
    #[serde(flatten)]
    identity: Identity,
    amount: Amount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApproveBuyInBody {
    approved_by: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateStackBody {
    user_id: String,
    stack: Amount,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SettlementResponse {
    session_id: String,
    #[serde(flatten)]
    settlement: Settlement,
}

/// POST /api/sessions
async fn create_session(
    body: web::Json<CreateSessionRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Session>, AppError> {
    let body = body.into_inner();
    let session = SessionService::new().create(
        &app_state.store,
        body.name,
        body.admin_id,
        body.admin_name,
    )?;
    Ok(web::Json(session))
}

/// GET /api/sessions?userId={user_id}
///
/// Sessions where the user is the admin or a member, newest first.
async fn list_sessions(
    query: web::Query<ListSessionsQuery>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<Session>>, AppError> {
    let sessions = SessionService::new().list_for(&app_state.store, &query.user_id);
    Ok(web::Json(sessions))
}

/// GET /api/sessions/{id}
///
/// Snapshot read for the polling clients, with an ETag derived from the
/// session's lock version. `If-None-Match` on an unchanged session answers
/// `304 Not Modified` with no body.
async fn get_session(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = SessionService::new().get(&app_state.store, &path)?;
    let etag_value = session_etag(&session.id, session.lock_version);

    if let Some(if_none_match) = http_req.headers().get(IF_NONE_MATCH) {
        if let Ok(client_etag) = if_none_match.to_str() {
            if if_none_match_matches(client_etag, &etag_value) {
                return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
                    .insert_header((ETAG, etag_value))
                    .finish());
            }
        }
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag_value))
        .json(session))
}

/// POST /api/sessions/join
async fn join_session(
    body: web::Json<JoinSessionRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Session>, AppError> {
    let body = body.into_inner();
    let session = SessionService::new().join(&app_state.store, &body.code, body.identity)?;
    Ok(web::Json(session))
}

/// POST /api/sessions/{id}/buyin
async fn request_buy_in(
    path: web::Path<String>,
    body: web::Json<BuyInRequestBody>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Session>, AppError> {
    let body = body.into_inner();
    let session = SessionService::new().request_buy_in(
        &app_state.store,
        &path,
        body.identity,
        body.amount,
    )?;
    Ok(web::Json(session))
}

/// PUT /api/sessions/{id}/buyin/{req_id}/approve
async fn approve_buy_in(
    path: web::Path<(String, String)>,
    body: web::Json<ApproveBuyInBody>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Session>, AppError> {
    let (session_id, request_id) = path.into_inner();
    let session = SessionService::new().approve_buy_in(
        &app_state.store,
        &session_id,
        &request_id,
        &body.approved_by,
    )?;
    Ok(web::Json(session))
}

/// PUT /api/sessions/{id}/buyin/{req_id}/reject
async fn reject_buy_in(
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Session>, AppError> {
    let (session_id, request_id) = path.into_inner();
    let session =
        SessionService::new().reject_buy_in(&app_state.store, &session_id, &request_id)?;
    Ok(web::Json(session))
}

/// DELETE /api/sessions/{id}/buyin/{req_id}
///
/// Player-side cleanup of a resolved request record. Idempotent.
async fn dismiss_buy_in_request(
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Session>, AppError> {
    let (session_id, request_id) = path.into_inner();
    let session =
        SessionService::new().dismiss_buy_in_request(&app_state.store, &session_id, &request_id)?;
    Ok(web::Json(session))
}

/// PUT /api/sessions/{id}/stack
async fn update_stack(
    path: web::Path<String>,
    body: web::Json<UpdateStackBody>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Session>, AppError> {
    let session =
        SessionService::new().update_stack(&app_state.store, &path, &body.user_id, body.stack)?;
    Ok(web::Json(session))
}

/// PUT /api/sessions/{id}/end
///
/// Idempotent: repeated calls return the same ended session.
async fn end_session(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Session>, AppError> {
    let session = SessionService::new().end(&app_state.store, &path)?;
    Ok(web::Json(session))
}

/// GET /api/sessions/{id}/validate
async fn validate_session(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let report = SessionService::new().validate(&app_state.store, &path)?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/sessions/{id}/settlement
async fn settlement(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SettlementResponse>, AppError> {
    let session_id = path.into_inner();
    let settlement = SessionService::new().settlement(&app_state.store, &session_id)?;
    Ok(web::Json(SettlementResponse {
        session_id,
        settlement,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_session))
            .route(web::get().to(list_sessions)),
    );
    // Fixed segments before the `{id}` catch-all
    cfg.service(web::resource("/join").route(web::post().to(join_session)));
    cfg.service(web::resource("/{id}").route(web::get().to(get_session)));
    cfg.service(web::resource("/{id}/buyin").route(web::post().to(request_buy_in)));
    cfg.service(
        web::resource("/{id}/buyin/{req_id}/approve").route(web::put().to(approve_buy_in)),
    );
    cfg.service(web::resource("/{id}/buyin/{req_id}/reject").route(web::put().to(reject_buy_in)));
    cfg.service(
        web::resource("/{id}/buyin/{req_id}").route(web::delete().to(dismiss_buy_in_request)),
    );
    cfg.service(web::resource("/{id}/stack").route(web::put().to(update_stack)));
    cfg.service(web::resource("/{id}/end").route(web::put().to(end_session)));
    cfg.service(web::resource("/{id}/validate").route(web::get().to(validate_session)));
    cfg.service(web::resource("/{id}/settlement").route(web::get().to(settlement)));
}
