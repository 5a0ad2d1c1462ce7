/// Configuration management for the API server
///
/// Configuration is read from environment variables, after loading a `.env`
/// file if one is present.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `RUN_MIGRATIONS`: Apply embedded migrations at startup (default: true)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `API_PRODUCTION`: Enables HSTS (default: false)
/// - `REGISTRATION_PATH`: Path the form posts to (default: /patients)
/// - `STATIC_DIR`: Directory served for unmatched paths (optional)
/// - `MAX_CONCURRENT_HASHES`: Password hashes allowed to run at once (default: 4)
/// - `REDIRECT_SUCCESS_URL`: Where successful registrations go
/// - `REDIRECT_ERROR_URL`: Where failed registrations go
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
/// - `RUST_LOG`: Log filter (default: intelmed_api=info,intelmed_shared=info,tower_http=info)
///
/// # Example
///
/// ```no_run
/// use intelmed_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf, str::FromStr};

pub const DEFAULT_SUCCESS_URL: &str = "/group_projectDBWS/feedback_success.html";
pub const DEFAULT_ERROR_URL: &str = "/group_projectDBWS/feedback_error.html";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub redirects: RedirectConfig,
    pub log_format: LogFormat,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Production mode turns on `Strict-Transport-Security`
    pub production: bool,

    /// Path of the registration form endpoint
    pub registration_path: String,

    /// Optional directory of static pages (the feedback pages, the form)
    pub static_dir: Option<PathBuf>,

    /// Upper bound on Argon2id hashes in flight; each holds 64 MB
    pub max_concurrent_hashes: usize,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Whether to apply migrations on startup
    pub run_migrations: bool,
}

/// Fixed redirect targets of the registration endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectConfig {
    pub success_url: String,
    pub error_url: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            success_url: DEFAULT_SUCCESS_URL.to_string(),
            error_url: DEFAULT_ERROR_URL.to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
        }
    }
}

fn parse_bool(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{} must be a boolean, got '{}'", name, value),
    }
}

impl Config {
    /// Loads configuration from `.env` and the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or any variable has an
    /// invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("API_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT is invalid: {}", e))?;

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = var("DATABASE_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS is invalid: {}", e))?;

        let registration_path = var("REGISTRATION_PATH", "/patients");
        if !registration_path.starts_with('/') {
            anyhow::bail!("REGISTRATION_PATH must start with '/'");
        }

        let max_concurrent_hashes = var("MAX_CONCURRENT_HASHES", "4")
            .parse::<usize>()
            .map_err(|e| anyhow::anyhow!("MAX_CONCURRENT_HASHES is invalid: {}", e))?;
        if max_concurrent_hashes == 0 {
            anyhow::bail!("MAX_CONCURRENT_HASHES must be at least 1");
        }

        let success_url = var("REDIRECT_SUCCESS_URL", DEFAULT_SUCCESS_URL);
        let error_url = var("REDIRECT_ERROR_URL", DEFAULT_ERROR_URL);
        if success_url.is_empty() || error_url.is_empty() {
            anyhow::bail!("Redirect URLs must not be empty");
        }

        Ok(Self {
            api: ApiConfig {
                host: var("API_HOST", "0.0.0.0"),
                port,
                production: parse_bool("API_PRODUCTION", &var("API_PRODUCTION", "false"))?,
                registration_path,
                static_dir: lookup("STATIC_DIR").filter(|d| !d.is_empty()).map(PathBuf::from),
                max_concurrent_hashes,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                run_migrations: parse_bool("RUN_MIGRATIONS", &var("RUN_MIGRATIONS", "true"))?,
            },
            redirects: RedirectConfig {
                success_url,
                error_url,
            },
            log_format: var("LOG_FORMAT", "pretty").parse()?,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
