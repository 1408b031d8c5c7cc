//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PIXELPUNK_BASE_URL` - Public URL for the storefront
//! - `PIXELPUNK_ADMIN_PASSWORD_HASH` - Argon2 PHC hash of the admin password
//!
//! ## Optional
//! - `PIXELPUNK_HOST` - Bind address (default: 127.0.0.1)
//! - `PIXELPUNK_PORT` - Listen port (default: 3000)
//! - `PIXELPUNK_DATA_DIR` - Directory for the content cache (default: ./data)
//! - `VAULTDB_URL` - Hosted document store endpoint; omit to run offline
//! - `VAULTDB_API_KEY` - Document store project API key
//! - `CLOUDINARY_CLOUD_NAME` - Media CDN cloud; omit to disable uploads
//! - `CLOUDINARY_UPLOAD_PRESET` - Unsigned upload preset token
//! - `GEMINI_API_KEY` - Generative model API key; omit to disable the curator
//! - `GEMINI_ANALYSIS_MODEL` - Vision model id
//! - `GEMINI_IMAGE_MODEL` - Image generation model id
//! - `GEMINI_LIVE_MODEL` - Realtime audio model id
//! - `GEMINI_VOICE` - Prebuilt voice name for the live curator
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry tracing sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use pixelpunk_content::RemoteStoreConfig;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory holding the local content cache
    pub data_dir: PathBuf,
    /// Admin gate configuration
    pub admin: AdminConfig,
    /// Hosted document store; `None` runs cache/defaults only
    pub remote_store: Option<RemoteStoreConfig>,
    /// Media CDN; `None` disables admin uploads
    pub media: Option<MediaConfig>,
    /// AI curator; `None` hides the curator entirely
    pub curator: Option<CuratorConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Admin gate configuration.
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone)]
pub struct AdminConfig {
    /// Argon2 PHC-format hash of the admin password.
    pub password_hash: SecretString,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Media CDN configuration.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// CDN cloud name (appears in upload and delivery URLs)
    pub cloud_name: String,
    /// Unsigned upload preset token
    pub upload_preset: String,
}

/// Generative model API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CuratorConfig {
    /// API key for the hosted model service
    pub api_key: SecretString,
    /// Vision model for garment analysis
    pub analysis_model: String,
    /// Image generation model for concept renders
    pub image_model: String,
    /// Realtime audio model for the live curator
    pub live_model: String,
    /// Prebuilt voice name for the live curator
    pub voice: String,
}

impl std::fmt::Debug for CuratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CuratorConfig")
            .field("api_key", &"[REDACTED]")
            .field("analysis_model", &self.analysis_model)
            .field("image_model", &self.image_model)
            .field("live_model", &self.live_model)
            .field("voice", &self.voice)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the admin password hash is not an argon2 PHC string.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("PIXELPUNK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PIXELPUNK_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PIXELPUNK_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PIXELPUNK_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("PIXELPUNK_BASE_URL")?;
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("PIXELPUNK_BASE_URL".to_string(), e.to_string())
        })?;
        let data_dir = PathBuf::from(get_env_or_default("PIXELPUNK_DATA_DIR", "./data"));

        let admin = AdminConfig {
            password_hash: get_admin_password_hash("PIXELPUNK_ADMIN_PASSWORD_HASH")?,
        };

        let remote_store = match get_optional_env("VAULTDB_URL") {
            Some(base_url) => Some(RemoteStoreConfig {
                base_url,
                api_key: SecretString::from(get_required_env("VAULTDB_API_KEY")?),
            }),
            None => None,
        };

        let media = match get_optional_env("CLOUDINARY_CLOUD_NAME") {
            Some(cloud_name) => Some(MediaConfig {
                cloud_name,
                upload_preset: get_required_env("CLOUDINARY_UPLOAD_PRESET")?,
            }),
            None => None,
        };

        let curator = get_optional_env("GEMINI_API_KEY").map(|api_key| CuratorConfig {
            api_key: SecretString::from(api_key),
            analysis_model: get_env_or_default("GEMINI_ANALYSIS_MODEL", "gemini-3-pro-preview"),
            image_model: get_env_or_default("GEMINI_IMAGE_MODEL", "imagen-4.0-generate-001"),
            live_model: get_env_or_default(
                "GEMINI_LIVE_MODEL",
                "gemini-2.5-flash-native-audio-preview-09-2025",
            ),
            voice: get_env_or_default("GEMINI_VOICE", "Zephyr"),
        });

        let sentry_sample_rate = parse_rate("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = parse_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            admin,
            remote_store,
            media,
            curator,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Path of the local content cache file.
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join(pixelpunk_content::cache::DEFAULT_CACHE_FILE)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a sample-rate variable in `0.0..=1.0`.
fn parse_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => {
            let rate = raw
                .parse::<f32>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
            if (0.0..=1.0).contains(&rate) {
                Ok(rate)
            } else {
                Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    format!("must be between 0.0 and 1.0 (got {rate})"),
                ))
            }
        }
    }
}

/// Load the admin password hash and verify it is an argon2 PHC string.
///
/// Storing a plain password here would silently disable verification, so it
/// is rejected at startup.
fn get_admin_password_hash(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    if !value.starts_with("$argon2") {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            "must be an argon2 PHC hash (generate one with `px-cli admin hash-password`)"
                .to_string(),
        ));
    }
    let secret = SecretString::from(value);
    // Ensure the hash parses before the first login attempt needs it.
    argon2::PasswordHash::new(secret.expose_secret()).map_err(|e| {
        ConfigError::InsecureSecret(key.to_string(), format!("invalid PHC string: {e}"))
    })?;
    Ok(secret)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, unsafe_code)]
mod tests {
    use super::*;

    /// A syntactically valid argon2id PHC string.
    const TEST_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$uHx5dF5mUVZ5Q0pXc2JhYQ$3x1YIz6Zk9w6wMFlyH65ZR0A3Ou2sOcqieTLV64B2pE";

    #[test]
    fn test_admin_hash_rejects_plain_password() {
        unsafe { std::env::set_var("TEST_ADMIN_HASH_PLAIN", "hunter2") };
        let result = get_admin_password_hash("TEST_ADMIN_HASH_PLAIN");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_admin_hash_rejects_malformed_phc() {
        unsafe { std::env::set_var("TEST_ADMIN_HASH_BAD", "$argon2id$not-a-hash") };
        let result = get_admin_password_hash("TEST_ADMIN_HASH_BAD");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_admin_hash_accepts_phc() {
        unsafe { std::env::set_var("TEST_ADMIN_HASH_OK", TEST_HASH) };
        assert!(get_admin_password_hash("TEST_ADMIN_HASH_OK").is_ok());
    }

    #[test]
    fn test_parse_rate_bounds() {
        unsafe { std::env::set_var("TEST_RATE_HIGH", "1.5") };
        assert!(parse_rate("TEST_RATE_HIGH", 1.0).is_err());
        unsafe { std::env::set_var("TEST_RATE_OK", "0.25") };
        assert!((parse_rate("TEST_RATE_OK", 1.0).unwrap() - 0.25).abs() < f32::EPSILON);
        assert!((parse_rate("TEST_RATE_UNSET", 0.5).unwrap() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            data_dir: PathBuf::from("./data"),
            admin: AdminConfig {
                password_hash: SecretString::from(TEST_HASH),
            },
            remote_store: None,
            media: None,
            curator: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_admin_config_debug_redacts_hash() {
        let config = AdminConfig {
            password_hash: SecretString::from(TEST_HASH),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("argon2id"));
    }
}
