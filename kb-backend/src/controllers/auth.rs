use actix_web::{web, HttpRequest, HttpResponse};
use kb_types::{AuthCheckResponse, LoginRequest, LoginResponse, MessageResponse};

use crate::error::ApiError;
use crate::sessions::{self, cookie, SessionUser};
use crate::validation::validate_login;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(login))
        .route("/api/logout", web::post().to(logout))
        .route("/api/auth-check", web::get().to(auth_check));
}

async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let creds = validate_login(&body)?;

    // Plaintext comparison against the stored record
    let account = match state.store.get_account_by_employee_id(&creds.employee_id) {
        Some(account) if account.password == creds.password => account,
        _ => {
            log::info!("[AUTH] Failed login for {}", creds.employee_id);
            return Err(ApiError::Unauthorized(
                "Invalid employee ID or password".to_string(),
            ));
        }
    };

    // A fresh token on every login; drop whatever session the client held
    if let Some(previous) = sessions::session_token(&state, &req) {
        state.sessions.destroy(&previous);
    }

    let session = state.sessions.create(SessionUser {
        account_id: account.id,
        employee_id: account.employee_id.clone(),
    });
    log::info!("[AUTH] {} logged in", account.employee_id);

    let cookie = cookie::session_cookie(
        state.signer.sign(&session.token),
        state.sessions.ttl().num_seconds(),
        state.config.is_production(),
    );

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        employee_id: account.employee_id,
    }))
}

async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(token) = sessions::session_token(&state, &req) {
        if state.sessions.destroy(&token) {
            log::info!("[AUTH] Session ended");
        }
    }

    HttpResponse::Ok()
        .cookie(cookie::removal_cookie(state.config.is_production()))
        .json(MessageResponse::new("Logged out successfully"))
}

async fn auth_check(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let body = match sessions::current_session(&state, &req) {
        Some(session) => AuthCheckResponse {
            is_authenticated: true,
            employee_id: Some(session.user.employee_id),
        },
        None => AuthCheckResponse {
            is_authenticated: false,
            employee_id: None,
        },
    };
    HttpResponse::Ok().json(body)
}
