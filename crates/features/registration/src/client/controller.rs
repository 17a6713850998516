use super::form::{DEFAULT_ACCEPTED_TEXT, FormView, Outcome, RegistrationForm, SubmissionPhase};
use super::relay::RelayConfig;
use crate::error::{RegistrationError, RegistrationErrorExt};
use reqwest::{Client, Url};
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use summit_kernel::domain::submission::{MessageBody, Submission};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Wait between dispatching the relay and reporting a combined outcome.
pub const DEFAULT_SETTLING_DELAY: Duration = Duration::from_millis(1500);

/// Builder for [`SubmissionController`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct SubmissionControllerBuilder {
    endpoint: Option<Url>,
    relay: Option<RelayConfig>,
    settling_delay: Option<Duration>,
    client: Option<Client>,
}

impl SubmissionControllerBuilder {
    /// Primary (JSON) endpoint.
    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Enables the legacy relay.
    pub fn relay(mut self, relay: RelayConfig) -> Self {
        self.relay = Some(relay);
        self
    }

    pub const fn settling_delay(mut self, delay: Duration) -> Self {
        self.settling_delay = Some(delay);
        self
    }

    /// Reuses an existing HTTP client (timeouts, proxies, TLS roots).
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// # Errors
    /// Returns [`RegistrationError::Config`] when no endpoint was set.
    pub fn build(self) -> Result<SubmissionController, RegistrationError> {
        let endpoint = self.endpoint.ok_or_else(|| RegistrationError::Config {
            message: "primary endpoint not provided".into(),
            context: None,
        })?;

        let form = RegistrationForm::new();
        let phase = SubmissionPhase::default();
        let (view, _) = watch::channel(FormView::project(&form, &phase));

        Ok(SubmissionController {
            dispatcher: Dispatcher {
                client: self.client.unwrap_or_default(),
                endpoint,
                relay: self.relay,
                settling_delay: self.settling_delay.unwrap_or(DEFAULT_SETTLING_DELAY),
            },
            state: FormState { form, phase, view },
        })
    }
}

/// Drives one registration form: collects field values, posts them on [`submit`], and
/// publishes every visible change as a [`FormView`] to subscribers.
///
/// [`submit`]: SubmissionController::submit
#[derive(Debug)]
pub struct SubmissionController {
    dispatcher: Dispatcher,
    state: FormState,
}

impl SubmissionController {
    pub fn builder() -> SubmissionControllerBuilder {
        SubmissionControllerBuilder::default()
    }

    /// Receives a [`FormView`] after every change. The current view is available immediately.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.state.view.subscribe()
    }

    #[must_use]
    pub fn view(&self) -> FormView {
        self.state.view.borrow().clone()
    }

    #[must_use]
    pub const fn form(&self) -> &RegistrationForm {
        &self.state.form
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.state.form.set(name, value);
        self.state.publish();
    }

    /// Edits the form in place; subscribers see one view once the guard is dropped.
    pub fn form_mut(&mut self) -> FormEdit<'_> {
        FormEdit { state: &mut self.state }
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.dispatcher.endpoint
    }

    #[must_use]
    pub const fn relay(&self) -> Option<&RelayConfig> {
        self.dispatcher.relay.as_ref()
    }

    #[must_use]
    pub const fn settling_delay(&self) -> Duration {
        self.dispatcher.settling_delay
    }

    /// Submits the current form values.
    ///
    /// The submit control is disabled until this returns, or until the future is dropped.
    /// Exactly one [`Outcome`] is produced; transport and decoding failures never escape.
    pub async fn submit(&mut self) -> Outcome {
        let submission = self.state.form.values().clone();
        let in_flight = InFlight::begin(&mut self.state);

        let outcome = self.dispatcher.dispatch(&submission).await;

        in_flight.finish(outcome.clone());
        outcome
    }
}

#[derive(Debug)]
struct FormState {
    form: RegistrationForm,
    phase: SubmissionPhase,
    view: watch::Sender<FormView>,
}

impl FormState {
    fn publish(&self) {
        self.view.send_replace(FormView::project(&self.form, &self.phase));
    }

    fn transition(&mut self, step: impl FnOnce(SubmissionPhase) -> SubmissionPhase) {
        self.phase = step(std::mem::take(&mut self.phase));
        self.publish();
    }
}

/// Mutable access to the form that publishes the view on drop.
#[derive(Debug)]
pub struct FormEdit<'a> {
    state: &'a mut FormState,
}

impl Deref for FormEdit<'_> {
    type Target = RegistrationForm;

    fn deref(&self) -> &Self::Target {
        &self.state.form
    }
}

impl DerefMut for FormEdit<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state.form
    }
}

impl Drop for FormEdit<'_> {
    fn drop(&mut self) {
        self.state.publish();
    }
}

/// Holds the form in `Submitting`; re-enables the control on drop if no outcome arrived.
#[derive(Debug)]
struct InFlight<'a> {
    state: &'a mut FormState,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a mut FormState) -> Self {
        state.transition(SubmissionPhase::begin);
        Self { state, finished: false }
    }

    fn finish(mut self, outcome: Outcome) {
        if outcome.primary_succeeded() {
            self.state.form.reset();
        }
        self.state.transition(|phase| phase.complete(outcome));
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("Submission abandoned before completion");
            self.state.transition(SubmissionPhase::abort);
        }
    }
}

#[derive(Debug)]
struct Dispatcher {
    client: Client,
    endpoint: Url,
    relay: Option<RelayConfig>,
    settling_delay: Duration,
}

impl Dispatcher {
    async fn dispatch(&self, submission: &Submission) -> Outcome {
        let missing = submission.missing_required();
        if !missing.is_empty() {
            debug!(?missing, "Submitting without required fields");
        }

        let ticket = self.relay.as_ref().map(|relay| relay.dispatch(&self.client, submission));
        let primary = self.post_primary(submission).await;

        if let Some(ticket) = ticket {
            ticket.settle(self.settling_delay).await;
            return match primary {
                Ok(_) => Outcome::Sent,
                Err(e) => {
                    warn!(error = %e, "Primary endpoint failed; submission relayed only");
                    Outcome::RelayOnly
                }
            };
        }

        match primary {
            Ok(message) => Outcome::Accepted {
                message: message.unwrap_or_else(|| DEFAULT_ACCEPTED_TEXT.to_owned()),
            },
            Err(e) => {
                warn!(error = %e, "Form submit error");
                Outcome::Failed
            }
        }
    }

    /// Posts the field map as JSON. `Ok(None)` means the body carried no usable message.
    async fn post_primary(&self, submission: &Submission) -> Result<Option<String>, RegistrationError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .context("Primary endpoint unreachable")?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistrationError::Rejected { status: status.as_u16(), context: None });
        }

        let message = match response.bytes().await {
            Ok(body) => serde_json::from_slice::<MessageBody>(&body)
                .ok()
                .map(|body| body.message)
                .filter(|message| !message.is_empty()),
            Err(e) => {
                debug!(error = %e, "Primary response body unreadable");
                None
            }
        };

        info!(endpoint = %self.endpoint, %status, "Registration submitted");
        Ok(message)
    }
}
