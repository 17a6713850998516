use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "summit";
/// Prefix of environment overrides (`SUMMIT__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "SUMMIT";

/// Custom error type for config loading.
#[summit_derive::summit_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file layered with environment overrides.
///
/// 1. **Base File**: `path` if given (must exist), otherwise an optional `summit.{toml,json,yaml}`
///    in the working directory. Without any file every section falls back to its defaults.
/// 2. **Environment Overrides**: variables prefixed with `SUMMIT__`; nested keys are separated
///    by double underscores (`SUMMIT__REGISTRATION__FUNCTION_PATH` maps to
///    `registration.function_path`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicitly requested file is missing, a source is
/// malformed, or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use summit_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use summit_domain::config::ApiConfig;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn explicit_file_is_loaded() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("server.toml");
        fs::write(
            &file,
            "[server]\nport = 9100\n\n[registration]\nfunction_path = \"/api/register\"\n",
        )?;

        let cfg: ApiConfig = load_config(Some(&file))?;
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.registration.function_path, "/api/register");
        assert_eq!(cfg.logging.level, "info");
        Ok(())
    }

    #[test]
    #[serial]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let res: Result<ApiConfig, _> = load_config(Some(dir.path().join("absent.toml")));
        assert!(matches!(res, Err(ConfigError::Config { context: Some(_), .. })));
    }
}
