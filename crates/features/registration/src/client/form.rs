//! Form state, the submit lifecycle and its rendered projection.
//!
//! Transitions are pure functions on [`SubmissionPhase`]; what a front end shows is derived
//! from the phase and the form values by [`FormView::project`].

use std::borrow::Cow;
use summit_kernel::domain::submission::Submission;

pub const DEFAULT_ACCEPTED_TEXT: &str = "Thank you — your registration was received.";
pub const SENT_TEXT: &str = "Registration sent — thank you!";
pub const RELAY_ONLY_TEXT: &str = "Registration saved via the backup form only. If you do not hear from us, please contact the organisers.";
pub const FAILED_TEXT: &str = "Submission failed. Please try again or contact the organisers.";

/// Input state of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    values: Submission,
}

impl RegistrationForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name, value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name)
    }

    /// Field map handed to the endpoints.
    #[must_use]
    pub const fn values(&self) -> &Submission {
        &self.values
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }
}

/// Terminal result of one submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Primary endpoint accepted; carries its message (or the default thank-you text).
    Accepted { message: String },
    /// Relay dispatched and primary endpoint accepted.
    Sent,
    /// Relay dispatched but the primary endpoint failed.
    RelayOnly,
    /// No relay and the primary endpoint failed.
    Failed,
}

impl Outcome {
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Accepted { message } => Cow::Borrowed(message.as_str()),
            Self::Sent => Cow::Borrowed(SENT_TEXT),
            Self::RelayOnly => Cow::Borrowed(RELAY_ONLY_TEXT),
            Self::Failed => Cow::Borrowed(FAILED_TEXT),
        }
    }

    #[must_use]
    pub const fn tone(&self) -> Tone {
        match self {
            Self::Accepted { .. } | Self::Sent => Tone::Success,
            Self::RelayOnly => Tone::Warning,
            Self::Failed => Tone::Error,
        }
    }

    /// Whether the primary endpoint took the submission; the form is cleared only then.
    #[must_use]
    pub const fn primary_succeeded(&self) -> bool {
        matches!(self, Self::Accepted { .. } | Self::Sent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
}

/// Lifecycle of the submit control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Completed(Outcome),
}

impl SubmissionPhase {
    /// Starting a submit hides any previous status.
    #[must_use]
    pub fn begin(self) -> Self {
        Self::Submitting
    }

    #[must_use]
    pub fn complete(self, outcome: Outcome) -> Self {
        match self {
            Self::Submitting => Self::Completed(outcome),
            other => other,
        }
    }

    /// Abandoned submit (the future was dropped before an outcome existed).
    #[must_use]
    pub fn abort(self) -> Self {
        match self {
            Self::Submitting => Self::Idle,
            other => other,
        }
    }

    #[must_use]
    pub const fn submit_enabled(&self) -> bool {
        !matches!(self, Self::Submitting)
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<&Outcome> {
        match self {
            Self::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// User-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

/// Snapshot of everything a front end renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub values: Submission,
    pub submit_enabled: bool,
    pub status: Option<StatusLine>,
}

impl FormView {
    #[must_use]
    pub fn project(form: &RegistrationForm, phase: &SubmissionPhase) -> Self {
        Self {
            values: form.values().clone(),
            submit_enabled: phase.submit_enabled(),
            status: phase
                .outcome()
                .map(|outcome| StatusLine { text: outcome.text().into_owned(), tone: outcome.tone() }),
        }
    }
}
