//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FIREBASE_API_KEY` - Firestore REST API key
//! - `FIREBASE_AUTH_DOMAIN` - Firebase auth domain
//! - `FIREBASE_DATABASE_URL` - Firebase database URL
//! - `FIREBASE_PROJECT_ID` - Project hosting the Firestore database
//! - `FIREBASE_STORAGE_BUCKET` - Firebase storage bucket
//! - `FIREBASE_MESSAGING_SENDER_ID` - Firebase messaging sender ID
//! - `FIREBASE_APP_ID` - Firebase application ID
//!
//! ## Optional
//! - `API_HOST` - Bind address (default: 127.0.0.1)
//! - `API_PORT` - Listen port (default: 8080)
//! - `FIREBASE_MEASUREMENT_ID` - Firebase analytics measurement ID
//! - `FIRESTORE_ENDPOINT` - Override for the Firestore REST endpoint
//!   (points tests at an emulator)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Firestore document-store configuration
    pub firestore: FirestoreConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Firestore document-store configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct FirestoreConfig {
    /// Firestore REST API key
    pub api_key: SecretString,
    /// Firebase auth domain (e.g., my-shop.firebaseapp.com)
    pub auth_domain: String,
    /// Firebase database URL
    pub database_url: String,
    /// Project hosting the Firestore database
    pub project_id: String,
    /// Firebase storage bucket
    pub storage_bucket: String,
    /// Firebase messaging sender ID
    pub messaging_sender_id: String,
    /// Firebase application ID
    pub app_id: String,
    /// Firebase analytics measurement ID
    pub measurement_id: Option<String>,
    /// Override for the Firestore REST endpoint (emulator support)
    pub endpoint: Option<String>,
}

impl std::fmt::Debug for FirestoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreConfig")
            .field("api_key", &"[REDACTED]")
            .field("auth_domain", &self.auth_domain)
            .field("database_url", &self.database_url)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .field("measurement_id", &self.measurement_id)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("API_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("API_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("API_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("API_PORT".to_string(), e.to_string()))?;

        let firestore = FirestoreConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            firestore,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl FirestoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let database_url = get_required_env("FIREBASE_DATABASE_URL")?;
        validate_url("FIREBASE_DATABASE_URL", &database_url)?;

        let endpoint = get_optional_env("FIRESTORE_ENDPOINT");
        if let Some(endpoint) = &endpoint {
            validate_url("FIRESTORE_ENDPOINT", endpoint)?;
        }

        Ok(Self {
            api_key: get_required_secret("FIREBASE_API_KEY")?,
            auth_domain: get_required_env("FIREBASE_AUTH_DOMAIN")?,
            database_url,
            project_id: get_required_env("FIREBASE_PROJECT_ID")?,
            storage_bucket: get_required_env("FIREBASE_STORAGE_BUCKET")?,
            messaging_sender_id: get_required_env("FIREBASE_MESSAGING_SENDER_ID")?,
            app_id: get_required_env("FIREBASE_APP_ID")?,
            measurement_id: get_optional_env("FIREBASE_MEASUREMENT_ID"),
            endpoint,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a variable holds an absolute URL.
fn validate_url(key: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
