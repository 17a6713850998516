//! Shared string constants.

/// `OpenAPI` tag for platform endpoints (health, docs).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the registration function.
pub const REGISTRATION_TAG: &str = "Registration";

/// Path the registration function is served from, relative to the site root.
pub const DEFAULT_FUNCTION_PATH: &str = "/.netlify/functions/register";

/// Body size limit of the registration function (the router's stock 2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub const NAME_FIELD: &str = "name";
pub const COLLEGE_FIELD: &str = "college";

/// Fields a submission must carry (non-empty) to be accepted.
pub const REQUIRED_FIELDS: [&str; 2] = [NAME_FIELD, COLLEGE_FIELD];
