pub use crate::config::{ConfigError, load_config};
#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateBuilder, ApiStateError};
