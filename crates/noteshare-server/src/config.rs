//! Server configuration from environment variables.

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Secret for signing and validating JWTs (HS256).
    pub jwt_secret: String,
    /// Token lifetime in hours.
    pub jwt_expiry_hours: u64,
    /// Directory uploaded note files are written to.
    pub upload_dir: String,
    /// Google OAuth client id; Google sign-in is disabled when unset.
    pub google_client_id: Option<String>,
    /// Seed account created at startup when the users table is empty.
    pub bootstrap_username: Option<String>,
    pub bootstrap_email: Option<String>,
    pub bootstrap_password: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET`: Secret for signing session tokens
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 5000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `JWT_EXPIRY_HOURS`: Token lifetime (default: 24)
    /// - `UPLOAD_DIR`: Upload directory (default: "./uploads")
    /// - `GOOGLE_CLIENT_ID`: Enables Google sign-in when set
    /// - `BOOTSTRAP_USERNAME` / `BOOTSTRAP_EMAIL` / `BOOTSTRAP_PASSWORD`:
    ///   Seed account created when no users exist yet
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let jwt_expiry_hours = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24);

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());

        let google_client_id = env::var("GOOGLE_CLIENT_ID").ok().filter(|s| !s.is_empty());

        let bootstrap_username = env::var("BOOTSTRAP_USERNAME").ok().filter(|s| !s.is_empty());
        let bootstrap_email = env::var("BOOTSTRAP_EMAIL").ok().filter(|s| !s.is_empty());
        let bootstrap_password = env::var("BOOTSTRAP_PASSWORD").ok().filter(|s| !s.is_empty());

        Ok(Self {
            port,
            log_level,
            jwt_secret,
            jwt_expiry_hours,
            upload_dir,
            google_client_id,
            bootstrap_username,
            bootstrap_email,
            bootstrap_password,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
}
