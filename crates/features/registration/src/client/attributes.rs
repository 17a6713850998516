//! Controller configuration read from form element attributes.

use super::controller::{SubmissionController, SubmissionControllerBuilder};
use super::relay::RelayConfig;
use crate::error::{RegistrationError, RegistrationErrorExt};
use reqwest::Url;
use std::collections::BTreeMap;
use std::time::Duration;
use summit_kernel::domain::constants::DEFAULT_FUNCTION_PATH;

pub const ENDPOINT_ATTR: &str = "data-endpoint";
pub const RELAY_ATTR: &str = "data-relay";
/// `data-relay-entry-<field>="<external entry name>"`
pub const RELAY_ENTRY_PREFIX: &str = "data-relay-entry-";
pub const SETTLE_ATTR: &str = "data-settle-ms";

/// Attributes of a form element, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormAttributes(BTreeMap<String, String>);

impl FormAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Attribute value, treating blank values as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// `(field, entry)` pairs from `data-relay-entry-*` attributes.
    pub fn relay_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|(name, entry)| {
            let field = name.strip_prefix(RELAY_ENTRY_PREFIX)?;
            let entry = entry.trim();
            (!field.is_empty() && !entry.is_empty()).then_some((field, entry))
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl SubmissionControllerBuilder {
    /// Applies form attributes. Relative URLs resolve against `base` (the page URL); the
    /// endpoint defaults to the registration function path.
    ///
    /// # Errors
    /// Returns [`RegistrationError::Url`] for unparseable URLs and
    /// [`RegistrationError::Config`] for a non-numeric settling delay.
    pub fn attributes(mut self, base: &Url, attrs: &FormAttributes) -> Result<Self, RegistrationError> {
        let endpoint = attrs.get(ENDPOINT_ATTR).unwrap_or(DEFAULT_FUNCTION_PATH);
        self = self.endpoint(base.join(endpoint).context("Resolving primary endpoint")?);

        if let Some(relay) = attrs.get(RELAY_ATTR) {
            let url = base.join(relay).context("Resolving relay URL")?;
            let config = attrs
                .relay_entries()
                .fold(RelayConfig::new(url), |config, (field, entry)| config.entry(field, entry));
            self = self.relay(config);
        }

        if let Some(raw) = attrs.get(SETTLE_ATTR) {
            let millis = raw.parse::<u64>().map_err(|e| RegistrationError::Config {
                message: format!("{SETTLE_ATTR}='{raw}': {e}").into(),
                context: None,
            })?;
            self = self.settling_delay(Duration::from_millis(millis));
        }

        Ok(self)
    }
}

impl SubmissionController {
    /// Builds a controller from form attributes with a default HTTP client.
    ///
    /// # Errors
    /// See [`SubmissionControllerBuilder::attributes`].
    pub fn from_attributes(base: &Url, attrs: &FormAttributes) -> Result<Self, RegistrationError> {
        Self::builder().attributes(base, attrs)?.build()
    }
}
