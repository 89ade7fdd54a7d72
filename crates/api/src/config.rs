use std::path::PathBuf;

use techhub_core::storage::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    /// Operator account ensured at startup, if configured.
    pub admin: Option<AdminBootstrap>,
}

/// Where uploaded images live and how they are addressed publicly.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one sub-directory per bucket (default: `./storage`).
    pub root: PathBuf,
    /// Externally visible base URL used to build public asset links
    /// (default: `http://localhost:3000`).
    pub public_base_url: String,
    /// Largest accepted upload in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
}

/// Credentials for the admin account seeded at startup.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORAGE_ROOT`         | `./storage`                |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:{PORT}`  |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
    /// | `ADMIN_EMAIL`          | unset (no bootstrap)       |
    /// | `ADMIN_PASSWORD`       | unset (no bootstrap)       |
    ///
    /// # Panics
    ///
    /// Panics on malformed numeric values, on a missing `JWT_SECRET`, or when
    /// only one of `ADMIN_EMAIL` / `ADMIN_PASSWORD` is set.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage = StorageConfig {
            root: std::env::var("STORAGE_ROOT")
                .unwrap_or_else(|_| "./storage".into())
                .into(),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()
                .expect("MAX_UPLOAD_BYTES must be a valid usize"),
        };

        let admin = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminBootstrap { email, password }),
            (Err(_), Err(_)) => None,
            _ => panic!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            storage,
            admin,
        }
    }
}
