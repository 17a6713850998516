mod function;
mod routes;

pub use function::{
    ACCEPTED_MESSAGE, FunctionRequest, FunctionResponse, METHOD_NOT_ALLOWED_MESSAGE,
    MISSING_FIELDS_MESSAGE, SERVER_ERROR_MESSAGE, handle, missing_required,
};
pub use routes::{RegistrationApi, register_handler, registration_router};
