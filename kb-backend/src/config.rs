use std::env;
use std::path::{Path, PathBuf};

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    /// Directory holding `users.json` and `queries.json`
    pub const DATA_DIR: &str = "KB_DATA_DIR";
    /// Key for signing session cookies
    pub const SESSION_SECRET: &str = "SESSION_SECRET";
    /// "production" enables the Secure flag on the session cookie
    pub const DEPLOY_ENV: &str = "KB_ENV";
    /// Optional directory of a built frontend to serve at `/`
    pub const FRONTEND_DIST: &str = "FRONTEND_DIST";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 5000;
    pub const DATA_DIR: &str = "./data";
    pub const SESSION_SECRET: &str = "knowledge-base-secret";
    pub const DEPLOY_ENV: &str = "development";
    pub const USERS_FILE: &str = "users.json";
    pub const QUERIES_FILE: &str = "queries.json";
    /// Session lifetime, also used as the cookie Max-Age
    pub const SESSION_TTL_HOURS: i64 = 24;
    /// How often expired sessions are purged
    pub const SESSION_CLEANUP_INTERVAL_SECS: u64 = 60 * 60;
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub session_secret: String,
    pub deploy_env: String,
    pub frontend_dist: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = match env::var(env_vars::PORT) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!(
                    "{}={:?} is not a valid port, using {}",
                    env_vars::PORT,
                    raw,
                    defaults::PORT
                );
                defaults::PORT
            }),
            Err(_) => defaults::PORT,
        };

        let session_secret = env::var(env_vars::SESSION_SECRET).unwrap_or_else(|_| {
            log::warn!(
                "{} not set, signing session cookies with the built-in default",
                env_vars::SESSION_SECRET
            );
            defaults::SESSION_SECRET.to_string()
        });

        Self {
            port,
            data_dir: PathBuf::from(
                env::var(env_vars::DATA_DIR).unwrap_or_else(|_| defaults::DATA_DIR.to_string()),
            ),
            session_secret,
            deploy_env: env::var(env_vars::DEPLOY_ENV)
                .unwrap_or_else(|_| defaults::DEPLOY_ENV.to_string()),
            frontend_dist: env::var(env_vars::FRONTEND_DIST)
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Config rooted at an explicit data directory (tests, tooling)
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            port: defaults::PORT,
            data_dir: data_dir.as_ref().to_path_buf(),
            session_secret: defaults::SESSION_SECRET.to_string(),
            deploy_env: defaults::DEPLOY_ENV.to_string(),
            frontend_dist: None,
        }
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(defaults::USERS_FILE)
    }

    pub fn queries_path(&self) -> PathBuf {
        self.data_dir.join(defaults::QUERIES_FILE)
    }

    pub fn is_production(&self) -> bool {
        self.deploy_env.eq_ignore_ascii_case("production")
    }
}
