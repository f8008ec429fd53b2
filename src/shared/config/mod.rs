//! Application configuration module
//!
//! Process-wide settings, read once at startup and shared read-only
//! afterwards (`Arc<AppConfig>` in the server state).
//!
//! # Sources
//!
//! `AppConfig::from_env` reads environment variables (the server binary
//! loads `.env` first). Tests and embedders use `AppConfig::builder()`.
//!
//! | Variable | Default |
//! |---|---|
//! | `APP_ENV` | `development` |
//! | `SERVER_HOST` | `0.0.0.0` |
//! | `SERVER_PORT` / `PORT` | `5000` |
//! | `DATABASE_URL` | `sqlite://solzer.db` |
//! | `JWT_SECRET` | development-only fallback |
//! | `JWT_PREVIOUS_SECRETS` | none |
//! | `TOKEN_TTL_SECS` | `604800` (at most ten years) |
//! | `BCRYPT_COST` | `12` |
//! | `USE_FIREBASE` | `false` |
//! | `FIREBASE_CREDENTIALS` | none |
//! | `FIREBASE_PROJECT_ID` | from credentials |
//! | `FIRESTORE_EMULATOR_HOST` | none |
//! | `STATIC_DIR` | `public` |
//!
//! # Secret Policy
//!
//! In production a missing `JWT_SECRET` is a startup error. Elsewhere an
//! insecure development secret is substituted and a warning logged.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Signing secret used outside production when none is configured
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://solzer.db";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
pub const DEFAULT_BCRYPT_COST: u32 = 12;
/// Longest accepted token lifetime (ten years)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" | "test" | "local" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue {
                key: "APP_ENV",
                value: other.to_string(),
            }),
        }
    }
}

/// Which persistence backend serves the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// Local SQLite database
    #[default]
    Relational,
    /// Remote Firestore document database
    Document,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relational => "relational",
            Self::Document => "document",
        }
    }
}

/// Firestore connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirebaseConfig {
    /// Service-account JSON key file
    pub credentials_path: Option<PathBuf>,
    /// Overrides the project named in the credentials
    pub project_id: Option<String>,
    /// `host:port` of a local emulator; requests go unauthenticated
    pub emulator_host: Option<String>,
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Retired secrets still accepted when verifying tokens
    pub previous_jwt_secrets: Vec<String>,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub storage: StorageKind,
    pub firebase: FirebaseConfig,
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = Self::builder();

        if let Some(env) = get("APP_ENV") {
            builder = builder.environment(env.parse()?);
        }
        if let Some(host) = get("SERVER_HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = get("SERVER_PORT").or_else(|| get("PORT")) {
            builder = builder.port(parse_value("SERVER_PORT", &port)?);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = get("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(previous) = get("JWT_PREVIOUS_SECRETS") {
            builder = builder.previous_jwt_secrets(
                previous
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        if let Some(ttl) = get("TOKEN_TTL_SECS") {
            builder = builder.token_ttl(Duration::from_secs(parse_value("TOKEN_TTL_SECS", &ttl)?));
        }
        if let Some(cost) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_value("BCRYPT_COST", &cost)?);
        }
        if let Some(flag) = get("USE_FIREBASE") {
            if is_truthy(&flag) {
                builder = builder.storage(StorageKind::Document);
            }
        }
        builder = builder.firebase(FirebaseConfig {
            credentials_path: get("FIREBASE_CREDENTIALS").map(PathBuf::from),
            project_id: get("FIREBASE_PROJECT_ID"),
            emulator_host: get("FIRESTORE_EMULATOR_HOST"),
        });
        if let Some(dir) = get("STATIC_DIR") {
            builder = builder.static_dir(dir);
        }

        builder.build()
    }

    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(bcrypt_cost_range().contains(&self.bcrypt_cost)) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.token_ttl.is_zero() || self.token_ttl > MAX_TOKEN_TTL {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_SECS",
                value: self.token_ttl.as_secs().to_string(),
            });
        }
        if self.storage == StorageKind::Document {
            let firebase = &self.firebase;
            if firebase.credentials_path.is_none() && firebase.emulator_host.is_none() {
                return Err(ConfigError::MissingValue("FIREBASE_CREDENTIALS"));
            }
            if firebase.credentials_path.is_none() && firebase.project_id.is_none() {
                return Err(ConfigError::MissingValue("FIREBASE_PROJECT_ID"));
            }
        } else if !self.database_url.starts_with("sqlite:") {
            return Err(ConfigError::InvalidUrl(self.database_url.clone()));
        }
        Ok(())
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("previous_jwt_secrets", &self.previous_jwt_secrets.len())
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("storage", &self.storage)
            .field("firebase", &self.firebase)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

/// Builder for AppConfig
#[derive(Default)]
pub struct AppConfigBuilder {
    environment: Environment,
    host: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    previous_jwt_secrets: Vec<String>,
    token_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
    storage: StorageKind,
    firebase: FirebaseConfig,
    static_dir: Option<PathBuf>,
}

impl AppConfigBuilder {
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn previous_jwt_secrets(mut self, secrets: Vec<String>) -> Self {
        self.previous_jwt_secrets = secrets;
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }

    pub fn firebase(mut self, firebase: FirebaseConfig) -> Self {
        self.firebase = firebase;
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Build the configuration
    ///
    /// Applies defaults, resolves the signing secret and validates the result.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = match self.jwt_secret {
            Some(secret) => secret,
            None if self.environment == Environment::Production => {
                return Err(ConfigError::MissingValue("JWT_SECRET"));
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using the insecure development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let config = AppConfig {
            environment: self.environment,
            host: self.host.unwrap_or_else(|| "0.0.0.0".to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            previous_jwt_secrets: self.previous_jwt_secrets,
            token_ttl: self.token_ttl.unwrap_or(DEFAULT_TOKEN_TTL),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            storage: self.storage,
            firebase: self.firebase,
            static_dir: self.static_dir.unwrap_or_else(|| PathBuf::from("public")),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

fn bcrypt_cost_range() -> std::ops::RangeInclusive<u32> {
    4..=31
}
