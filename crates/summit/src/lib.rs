//! Facade crate for Summit features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `summit` with the desired feature flags (`server`/`client`).
//! - Call `summit::init` (server) to register feature slices.

pub use summit_domain as domain;
#[cfg(feature = "server")]
use summit_domain::config::ApiConfig;
pub use summit_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use summit_kernel::server::router::system_router;
        pub use summit_registration::server::{RegistrationApi, registration_router};
    }
}

#[cfg(feature = "client")]
pub mod client {
    pub use summit_registration::client::*;
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use summit_registration as registration;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "client")]
        "client",
        "registration",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    config: &ApiConfig,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let slices = vec![features::registration::init(&config.registration)?];

    Ok(slices)
}
