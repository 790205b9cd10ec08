//! Session layer: in-memory session store, signed cookies, and the
//! per-request lookups handlers use to gate access.

pub mod cookie;
pub mod store;

use actix_web::{web, HttpRequest};

pub use cookie::{CookieSigner, SESSION_COOKIE};
pub use store::{Session, SessionStore, SessionUser};

use crate::error::ApiError;
use crate::AppState;

/// Signed session value from the cookie, or from `Authorization: Bearer`
/// for non-browser clients
fn signed_value_from_request(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
}

/// Verified session token carried by the request, if any
pub fn session_token(state: &web::Data<AppState>, req: &HttpRequest) -> Option<String> {
    let signed = signed_value_from_request(req)?;
    let token = state.signer.verify(&signed);
    if token.is_none() {
        log::debug!("[SESSION] Ignoring session value with a bad signature");
    }
    token
}

/// The live session for this request, if authenticated
pub fn current_session(state: &web::Data<AppState>, req: &HttpRequest) -> Option<Session> {
    let token = session_token(state, req)?;
    state.sessions.get(&token)
}

/// Gate for protected handlers
pub fn require_session(state: &web::Data<AppState>, req: &HttpRequest) -> Result<SessionUser, ApiError> {
    current_session(state, req)
        .map(|session| session.user)
        .ok_or_else(ApiError::unauthorized)
}
