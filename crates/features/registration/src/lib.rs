//! Registration feature slice.
//!
//! * `server`: the stateless validation function ([`server::handle`]) and its Axum route.
//! * `client`: the [`client::SubmissionController`] that posts a form to the function and,
//!   optionally, to a legacy relay.
mod error;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "server")]
pub mod server;

pub use crate::error::{RegistrationError, RegistrationErrorExt};

use std::ops::Deref;
use std::sync::Arc;
use summit_kernel::domain::registry::FeatureSlice;
#[cfg(feature = "server")]
use summit_kernel::domain::constants::REQUIRED_FIELDS;
#[cfg(feature = "server")]
use summit_kernel::domain::{config::RegistrationConfig, registry::InitializedSlice};

/// Registration feature state.
#[derive(Debug, Clone)]
pub struct RegistrationInner {
    /// Route the registration function is mounted on.
    pub function_path: String,
    /// Fields a submission must carry to be accepted.
    pub required_fields: &'static [&'static str],
    /// Largest request body the function reads.
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct Registration {
    inner: Arc<RegistrationInner>,
}

impl Registration {
    #[must_use]
    pub fn new(inner: RegistrationInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Registration {
    type Target = RegistrationInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Registration {
    fn name(&self) -> &'static str {
        "registration"
    }
}

/// Initialize the registration feature.
///
/// # Errors
/// Returns [`RegistrationError::Config`] if the function path cannot be mounted as a plain
/// route or the body limit is zero.
#[cfg(feature = "server")]
pub fn init(config: &RegistrationConfig) -> Result<InitializedSlice, RegistrationError> {
    let function_path = config.function_path.trim();
    validate_function_path(function_path).map_err(|reason| RegistrationError::Config {
        message: format!("function_path '{function_path}' {reason}").into(),
        context: None,
    })?;

    if config.max_body_bytes == 0 {
        return Err(RegistrationError::Config {
            message: "max_body_bytes must be greater than zero".into(),
            context: None,
        });
    }

    tracing::info!(
        path = function_path,
        required = ?REQUIRED_FIELDS,
        max_body_bytes = config.max_body_bytes,
        "Registration slice initialized"
    );

    let slice = Registration::new(RegistrationInner {
        function_path: function_path.to_owned(),
        required_fields: &REQUIRED_FIELDS,
        max_body_bytes: config.max_body_bytes,
    });
    Ok(InitializedSlice::new(slice))
}

/// Routes the server mounts itself; the function may not shadow them.
#[cfg(feature = "server")]
const RESERVED_PATHS: [&str; 2] = ["/health", "/api"];

/// The function path must be a static route: absolute, no empty segments and no
/// `:`/`*`/`{}` capture syntax, which the router would either reject or treat as a wildcard.
#[cfg(feature = "server")]
fn validate_function_path(path: &str) -> Result<(), &'static str> {
    let Some(rest) = path.strip_prefix('/') else {
        return Err("must start with '/'");
    };
    if rest.is_empty() {
        return Err("must not be the site root");
    }
    if RESERVED_PATHS.contains(&path.trim_end_matches('/')) {
        return Err("collides with a built-in route");
    }
    if rest.contains("//") {
        return Err("must not contain empty segments");
    }
    for segment in rest.split('/') {
        if segment.starts_with(':') || segment.starts_with('*') {
            return Err("must not contain ':' or '*' captures");
        }
        if segment.contains(['{', '}']) {
            return Err("must not contain '{}' captures");
        }
    }
    Ok(())
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    fn config(path: &str) -> RegistrationConfig {
        RegistrationConfig { function_path: path.to_owned(), ..RegistrationConfig::default() }
    }

    #[test]
    fn static_paths_are_accepted() {
        for path in ["/.netlify/functions/register", "/register", "/api/register", "/register/"] {
            let slice = init(&config(path)).expect(path);
            let registration = slice.downcast_ref::<Registration>().expect("registration");
            assert_eq!(registration.function_path, path);
            assert_eq!(slice.name, "registration");
        }
    }

    #[test]
    fn unroutable_paths_are_rejected() {
        for path in [
            "",
            "register",
            "/",
            "/register/:id",
            "/files/*rest",
            "/register/{id}",
            "/register/{",
            "/a//b",
            "/health",
            "/api",
            "/api/",
        ] {
            let err = init(&config(path)).expect_err(path);
            assert!(matches!(err, RegistrationError::Config { .. }), "{path}");
        }
    }

    #[test]
    fn zero_body_limit_is_rejected() {
        let cfg = RegistrationConfig { max_body_bytes: 0, ..RegistrationConfig::default() };
        assert!(init(&cfg).is_err());
    }
}
