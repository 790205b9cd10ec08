use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod error;
mod sessions;
mod store;
mod validation;

use config::{defaults, Config};
use sessions::{CookieSigner, SessionStore};
use store::{JsonFileStore, KnowledgeStore};

pub struct AppState {
    pub store: Arc<dyn KnowledgeStore>,
    pub sessions: Arc<SessionStore>,
    pub signer: CookieSigner,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn KnowledgeStore>) -> Self {
        Self {
            store,
            sessions: Arc::new(SessionStore::new(chrono::Duration::hours(
                defaults::SESSION_TTL_HOURS,
            ))),
            signer: CookieSigner::new(&config.session_secret),
            config,
        }
    }
}

async fn spa_fallback(state: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    let dist = state
        .config
        .frontend_dist
        .as_ref()
        .ok_or_else(|| actix_web::error::ErrorNotFound("Not found"))?;
    Ok(NamedFile::open(dist.join("index.html"))?)
}

/// Purge expired sessions on a fixed interval
fn spawn_session_cleanup(sessions: Arc<SessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(
            defaults::SESSION_CLEANUP_INTERVAL_SECS,
        ));
        interval.tick().await; // skip immediate tick
        loop {
            interval.tick().await;
            match sessions.cleanup_expired() {
                0 => {}
                count => log::info!(
                    "[SESSION_CLEANUP] Removed {} expired session(s), {} active",
                    count,
                    sessions.len()
                ),
            }
        }
    });
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Knowledge base v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    let port = config.port;
    log::info!("Using data directory: {:?}", config.data_dir);
    if config.is_production() {
        log::info!("Production mode: session cookies are marked Secure");
    }

    let store = Arc::new(JsonFileStore::open(&config));
    log::info!(
        "Store ready: {} account(s), {} quer(y/ies)",
        store.account_count(),
        store.query_count()
    );

    // Serve the built frontend only if the directory exists
    let frontend_dist = match &config.frontend_dist {
        Some(dir) if dir.exists() => {
            log::info!("Serving frontend from: {:?}", dir);
            Some(dir.clone())
        }
        Some(dir) => {
            log::warn!("Frontend dist {:?} not found - static file serving disabled", dir);
            None
        }
        None => None,
    };

    let state = web::Data::new(AppState::new(config, store));
    spawn_session_cleanup(Arc::clone(&state.sessions));

    log::info!("Starting knowledge base server on port {}", port);

    let app_state = state.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::configure_api);

        if let Some(dist) = &frontend_dist {
            app = app.service(
                Files::new("/", dist.clone())
                    .index_file("index.html")
                    .default_handler(web::to(spa_fallback)),
            );
        }

        app
    })
    .bind(("0.0.0.0", port))?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            log::warn!("Failed to listen for Ctrl+C, graceful shutdown unavailable");
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
