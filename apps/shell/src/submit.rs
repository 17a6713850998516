//! `summit submit`: drives a [`SubmissionController`] from command-line arguments.

use crate::args::SubmitArgs;
use anyhow::{Context, Result};
use std::io::Write;
use summit::client::{
    ENDPOINT_ATTR, FormAttributes, FormView, Outcome, RELAY_ATTR, RELAY_ENTRY_PREFIX,
    SETTLE_ATTR, SubmissionController, Url,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Submits the fields in `args` and writes the rendered status line to `out`.
///
/// # Errors
/// Fails only when the controller cannot be configured or `out` cannot be written.
/// Submission failures are reported through the returned [`Outcome`].
pub async fn run(args: SubmitArgs, out: &mut impl Write) -> Result<Outcome> {
    let site = Url::parse(&args.site).with_context(|| format!("Invalid site URL '{}'", args.site))?;

    let mut builder = SubmissionController::builder()
        .attributes(&site, &form_attributes(&args))
        .context("Invalid form configuration")?;

    if let Some(timeout) = args.timeout {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        builder = builder.client(client);
    }

    let mut controller = builder.build()?;
    debug!(endpoint = %controller.endpoint(), relay = controller.relay().is_some(), "Submitting");

    for (field, value) in args.fields {
        controller.set_field(field, value);
    }

    let watcher = args.watch.then(|| watch_views(controller.subscribe()));

    let outcome = controller.submit().await;

    drop(controller);
    if let Some(watcher) = watcher {
        watcher.await.context("View watcher panicked")?;
    }

    writeln!(out, "{}", outcome.text())?;
    Ok(outcome)
}

fn form_attributes(args: &SubmitArgs) -> FormAttributes {
    let mut attrs = FormAttributes::new();
    if let Some(endpoint) = &args.endpoint {
        attrs = attrs.with(ENDPOINT_ATTR, endpoint);
    }
    if let Some(relay) = &args.relay {
        attrs = attrs.with(RELAY_ATTR, relay);
    }
    for (field, entry) in &args.entries {
        attrs = attrs.with(format!("{RELAY_ENTRY_PREFIX}{field}"), entry);
    }
    if let Some(millis) = args.settle_ms {
        attrs = attrs.with(SETTLE_ATTR, millis.to_string());
    }
    attrs
}

/// Echoes each view to stderr until the controller is dropped.
#[allow(clippy::print_stderr)]
fn watch_views(mut views: watch::Receiver<FormView>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            let status = view.status.map(|s| format!("{:?}: {}", s.tone, s.text));
            eprintln!(
                "[form] submit_enabled={} fields={} status={}",
                view.submit_enabled,
                view.values.len(),
                status.as_deref().unwrap_or("-"),
            );
        }
    })
}
