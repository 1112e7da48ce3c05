use superfix_events::EmailConfig;

use crate::auth::jwt::JwtConfig;

/// Password given to heroes created without one.
pub const DEFAULT_HERO_PASSWORD: &str = "Hero123!";

/// Default JSON body limit. Mission photos travel as data URLs.
const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Error raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Credentials for the admin account created at startup when absent.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `FRONTEND_URL`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes (default: 50 MiB).
    pub max_body_bytes: usize,
    pub jwt: JwtConfig,
    /// Password assigned to a hero created without one.
    pub default_hero_password: String,
    pub admin_bootstrap: Option<AdminBootstrap>,
    /// SMTP relay; `None` disables email delivery.
    pub email: Option<EmailConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `HOST`                     | `0.0.0.0`                |
    /// | `PORT`                     | `3001`                   |
    /// | `FRONTEND_URL`             | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                     |
    /// | `MAX_BODY_BYTES`           | `52428800`               |
    /// | `DEFAULT_HERO_PASSWORD`    | `Hero123!`               |
    /// | `ADMIN_BOOTSTRAP_USERNAME` | --                       |
    /// | `ADMIN_BOOTSTRAP_PASSWORD` | --                       |
    ///
    /// JWT and email settings are read by [`JwtConfig::from_env`] and
    /// [`EmailConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_var("PORT", 3001u16)?;

        let cors_origins: Vec<String> = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", 30u64)?;
        let max_body_bytes = parse_var("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?;

        let default_hero_password = std::env::var("DEFAULT_HERO_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_HERO_PASSWORD.to_string());

        let admin_bootstrap = match (
            std::env::var("ADMIN_BOOTSTRAP_USERNAME"),
            std::env::var("ADMIN_BOOTSTRAP_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminBootstrap { username, password })
            }
            _ => None,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            jwt: JwtConfig::from_env()?,
            default_hero_password,
            admin_bootstrap,
            email: EmailConfig::from_env(),
        })
    }
}

/// Parse an optional environment variable, falling back to `default` when
/// it is unset.
pub(crate) fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
