use crate::constants::{DEFAULT_FUNCTION_PATH, DEFAULT_MAX_BODY_BYTES};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration for the registration server.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub registration: RegistrationConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Registration function settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Route the function is mounted on.
    pub function_path: String,
    /// Request bodies above this size are answered with `413`.
    pub max_body_bytes: usize,
}

/// Static site hosting. When `static_dir` is unset only the API is served.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub static_dir: Option<PathBuf>,
}

/// Log output settings, mapped onto the logger builder by the applications.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    /// Extra `EnvFilter` directives, e.g. `summit=debug,hyper=info`.
    pub filter: Option<String>,
    /// Directory for rolling log files.
    pub path: Option<PathBuf>,
    /// Write file logs as JSON lines.
    pub json: bool,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 8888, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            function_path: DEFAULT_FUNCTION_PATH.to_owned(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, path: None, json: false }
    }
}
