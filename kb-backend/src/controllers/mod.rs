pub mod auth;
pub mod health;
pub mod queries;

use actix_web::{error, web, HttpRequest};

use crate::error::ApiError;

/// Malformed JSON bodies become 400s with the usual `message` envelope
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON body: {}", err);
    ApiError::Validation(format!("Invalid request body: {}", err)).into()
}

/// Register every API route
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    health::config_routes(cfg);
    auth::config(cfg);
    queries::config(cfg);
}

#[cfg(test)]
pub(crate) mod test_support {
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::web;
    use std::path::Path;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::sessions::SESSION_COOKIE;
    use crate::store::JsonFileStore;
    use crate::AppState;

    /// App state backed by a fresh seeded store in `dir`
    pub fn test_state(dir: &Path) -> web::Data<AppState> {
        let config = Config::with_data_dir(dir);
        let store = Arc::new(JsonFileStore::open(&config));
        web::Data::new(AppState::new(config, store))
    }

    pub fn session_cookie_from(resp: &ServiceResponse) -> Option<Cookie<'static>> {
        resp.response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.into_owned())
    }
}
