use std::path::PathBuf;

/// Deployment environment, used when building public asset URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deployment environment; production builds `https` asset URLs.
    pub environment: Environment,
    /// Externally reachable base URL. When set, takes precedence over
    /// the request host when building asset URLs (the server may sit
    /// behind a proxy that rewrites Host).
    pub public_base_url: Option<String>,
    /// Path of the catalog snapshot file.
    pub menu_file: PathBuf,
    /// Directory holding uploaded image blobs.
    pub uploads_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                   |
    /// |------------------------|---------------------------|
    /// | `HOST`                 | `0.0.0.0`                 |
    /// | `PORT`                 | `3001`                    |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                      |
    /// | `APP_ENV`              | `development`             |
    /// | `BACKEND_URL`          | unset                     |
    /// | `MENU_FILE`            | `menu-items.json`         |
    /// | `UPLOADS_DIR`          | `uploads`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let environment = match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        let public_base_url = std::env::var("BACKEND_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let menu_file = std::env::var("MENU_FILE")
            .unwrap_or_else(|_| "menu-items.json".into())
            .into();

        let uploads_dir = std::env::var("UPLOADS_DIR")
            .unwrap_or_else(|_| "uploads".into())
            .into();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            environment,
            public_base_url,
            menu_file,
            uploads_dir,
        }
    }
}
