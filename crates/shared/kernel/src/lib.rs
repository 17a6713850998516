//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading plus, behind the `server` feature,
//! the shared API state and system routes.
//!
//! ## Config loading
//! ```rust,no_run
//! use summit_kernel::config::load_config;
//! use summit_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(None::<&str>).unwrap_or_default();
//! assert!(cfg.server.port > 0);
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use summit_domain as domain;
