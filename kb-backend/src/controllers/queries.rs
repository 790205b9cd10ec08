//! Knowledge entry endpoints. All routes require an authenticated session.
//!
//! Bodies and query strings are taken raw and decoded only after the
//! session check, so anonymous callers always see 401.

use actix_web::{web, HttpRequest, HttpResponse};
use kb_types::{NewQueryRequest, QueryListParams};

use crate::error::ApiError;
use crate::sessions::require_session;
use crate::store::SearchFilter;
use crate::validation::validate_new_query;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/queries")
            .route(web::get().to(list_queries))
            .route(web::post().to(create_query)),
    )
    .route("/api/employees", web::get().to(list_employees));
}

fn parse_list_params(req: &HttpRequest) -> Result<QueryListParams, ApiError> {
    web::Query::<QueryListParams>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .map_err(|e| ApiError::Validation(format!("Invalid query string: {}", e)))
}

fn parse_new_query(body: &[u8]) -> Result<NewQueryRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        log::debug!("Rejected JSON body: {}", e);
        ApiError::Validation(format!("Invalid request body: {}", e))
    })
}

/// List entries, optionally filtered by `search`, `topic`, `employee` and `date`
async fn list_queries(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    require_session(&state, &req)?;
    let params = parse_list_params(&req)?;

    let filter = SearchFilter::from_params(&params);
    let results = state.store.search_queries(&filter);
    log::debug!("[QUERIES] {:?} matched {} entries", filter, results.len());

    Ok(HttpResponse::Ok().json(results))
}

/// Create an entry authored by the session's employee
async fn create_query(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let user = require_session(&state, &req)?;
    let body = parse_new_query(&body)?;

    if body
        .employee_id
        .as_deref()
        .is_some_and(|claimed| claimed != user.employee_id)
    {
        log::warn!(
            "[QUERIES] {} submitted an entry claiming author {:?}; using the session identity",
            user.employee_id,
            body.employee_id
        );
    }

    let new_query = validate_new_query(&body, &user.employee_id)?;
    let created = state.store.create_query(new_query);

    Ok(HttpResponse::Created().json(created))
}

/// Distinct authors that have entries, for the filter dropdown
async fn list_employees(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    require_session(&state, &req)?;
    Ok(HttpResponse::Ok().json(state.store.list_employee_ids()))
}
