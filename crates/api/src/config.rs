use ticketing_core::rate_limit::{DEFAULT_LIMIT_PER_WINDOW, TEST_LIMIT_PER_WINDOW};

use crate::auth::jwt::JwtConfig;

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    /// Uploads skip object storage and rate limits are effectively off.
    Test,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Object storage settings for uploaded files.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Target bucket name.
    pub bucket: String,
    /// Public base URL under which stored objects are served.
    pub public_url: String,
    /// Custom S3-compatible endpoint (MinIO, R2, ...). `None` uses AWS.
    pub endpoint: Option<String>,
}

/// Server configuration loaded from environment variables.
///
/// Built once at startup and shared read-only as `Arc<ServerConfig>`.
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
    pub environment: Environment,
    pub database_url: String,
    /// Redis URL. When unset, a process-local in-memory store is used.
    pub redis_url: Option<String>,
    /// Requests allowed per fingerprint and 60-second window.
    pub rate_limit_per_minute: u64,
    /// Take the client IP from `X-Forwarded-For` instead of the socket.
    pub trust_proxy: bool,
    /// Maximum accepted multipart body size in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    /// Base URL of the blockchain ticket gateway.
    pub ticket_gateway_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                          |
    /// |-------------------------|----------------------------------|
    /// | `HOST`                  | `0.0.0.0`                        |
    /// | `PORT`                  | `3000`                           |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                             |
    /// | `APP_ENV`               | `development`                    |
    /// | `DATABASE_URL`          | **required**                     |
    /// | `REDIS_URL`             | unset (in-memory store)          |
    /// | `RATE_LIMIT_PER_MINUTE` | `100` (`1000000` in test mode)   |
    /// | `TRUST_PROXY`           | `false`                          |
    /// | `MAX_UPLOAD_BYTES`      | `10485760`                       |
    /// | `S3_BUCKET`             | `uploads`                        |
    /// | `S3_PUBLIC_URL`         | `http://localhost:9000/uploads`  |
    /// | `S3_ENDPOINT`           | unset                            |
    /// | `TICKET_GATEWAY_URL`    | `http://localhost:8545`          |
    ///
    /// # Panics
    ///
    /// Panics on missing required variables or unparseable values, so a
    /// misconfigured server never starts.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let environment = Environment::parse(&env_or("APP_ENV", "development"));

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let redis_url = std::env::var("REDIS_URL").ok().filter(|s| !s.is_empty());

        let rate_limit_per_minute = if environment == Environment::Test {
            TEST_LIMIT_PER_WINDOW
        } else {
            std::env::var("RATE_LIMIT_PER_MINUTE")
                .map(|v| {
                    v.parse()
                        .expect("RATE_LIMIT_PER_MINUTE must be a valid u64")
                })
                .unwrap_or(DEFAULT_LIMIT_PER_WINDOW)
        };

        let trust_proxy = matches!(
            env_or("TRUST_PROXY", "false").to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        );

        let max_upload_bytes: usize = env_or("MAX_UPLOAD_BYTES", "10485760")
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let storage = StorageConfig {
            bucket: env_or("S3_BUCKET", "uploads"),
            public_url: env_or("S3_PUBLIC_URL", "http://localhost:9000/uploads")
                .trim_end_matches('/')
                .to_string(),
            endpoint: std::env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
        };

        let ticket_gateway_url = env_or("TICKET_GATEWAY_URL", "http://localhost:8545")
            .trim_end_matches('/')
            .to_string();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            environment,
            database_url,
            redis_url,
            rate_limit_per_minute,
            trust_proxy,
            max_upload_bytes,
            jwt: JwtConfig::from_env(),
            storage,
            ticket_gateway_url,
        }
    }

    pub fn is_test_mode(&self) -> bool {
        self.environment == Environment::Test
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}
