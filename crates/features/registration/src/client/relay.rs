//! Best-effort relay of a submission to a legacy form-collection service.

use chrono::{SecondsFormat, Utc};
use reqwest::{Client, Url};
use std::collections::BTreeMap;
use std::time::Duration;
use summit_kernel::domain::submission::Submission;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

/// Field the relay receives the dispatch time in.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Where the relay posts and how form fields are named there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub url: Url,
    /// Form field name to the external entry name (e.g. `name` to `entry.1234567`).
    pub entries: BTreeMap<String, String>,
}

impl RelayConfig {
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self { url, entries: BTreeMap::new() }
    }

    /// Tags a form field for relaying under `entry`.
    #[must_use]
    pub fn entry(mut self, field: impl Into<String>, entry: impl Into<String>) -> Self {
        self.entries.insert(field.into(), entry.into());
        self
    }

    /// Form-encoded pairs for one dispatch: every tagged field (empty when the form lacks it)
    /// under its entry name, then `timestamp`.
    #[must_use]
    pub fn fields(&self, submission: &Submission, timestamp: &str) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(field, entry)| (entry.clone(), submission.get(field).unwrap_or_default().to_owned()))
            .chain(std::iter::once((TIMESTAMP_FIELD.to_owned(), timestamp.to_owned())))
            .collect()
    }

    /// Spawns the relay POST and returns immediately. The response is never read back.
    pub(crate) fn dispatch(&self, client: &Client, submission: &Submission) -> RelayTicket {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let request = client.post(self.url.clone()).form(&self.fields(submission, &timestamp));
        let url = self.url.clone();

        let handle = tokio::spawn(async move {
            match request.send().await {
                Ok(response) => debug!(%url, status = %response.status(), "Relay submission sent"),
                Err(e) => warn!(%url, error = %e, "Relay submission failed"),
            }
        });

        RelayTicket { dispatched_at: Instant::now(), handle }
    }
}

/// A relay dispatch in flight.
#[derive(Debug)]
pub(crate) struct RelayTicket {
    dispatched_at: Instant,
    handle: JoinHandle<()>,
}

impl RelayTicket {
    /// Waits until `delay` has elapsed since dispatch. The relay task is not joined; it keeps
    /// running in the background if it has not finished by then.
    pub(crate) async fn settle(self, delay: Duration) {
        sleep_until(self.dispatched_at + delay).await;
        if !self.handle.is_finished() {
            debug!(?delay, "Relay still in flight after settling delay");
        }
    }
}
