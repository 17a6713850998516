//! Browser-side half of the registration flow, usable from any front end that can forward
//! field edits and a submit action.
mod attributes;
mod controller;
mod form;
mod relay;

pub use attributes::{
    ENDPOINT_ATTR, FormAttributes, RELAY_ATTR, RELAY_ENTRY_PREFIX, SETTLE_ATTR,
};
pub use controller::{
    DEFAULT_SETTLING_DELAY, FormEdit, SubmissionController, SubmissionControllerBuilder,
};
pub use form::{
    DEFAULT_ACCEPTED_TEXT, FAILED_TEXT, FormView, Outcome, RELAY_ONLY_TEXT, RegistrationForm,
    SENT_TEXT, StatusLine, SubmissionPhase, Tone,
};
pub use relay::{RelayConfig, TIMESTAMP_FIELD};

pub use reqwest::Url;
