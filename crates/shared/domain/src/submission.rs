//! The registration submission: a flat map of form field names to values.

use crate::constants::REQUIRED_FIELDS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field values captured from the registration form at submit time.
///
/// Serializes as a plain JSON object (`{"name": "...", "college": "...", ...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct Submission(BTreeMap<String, String>);

impl Submission {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Required fields that are absent or empty.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|field| self.get(field).is_none_or(str::is_empty))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Submission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// `{"message": "..."}` body returned by the registration function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct MessageBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_reports_absent_and_empty_fields() {
        let submission: Submission = [("name", "Ada"), ("college", "")].into_iter().collect();
        assert_eq!(submission.missing_required(), vec!["college"]);

        assert_eq!(Submission::new().missing_required(), vec!["name", "college"]);
    }

    #[test]
    fn serializes_as_flat_object() {
        let submission: Submission =
            [("name", "Ada"), ("college", "Girton"), ("email", "ada@example.org")]
                .into_iter()
                .collect();

        let value = serde_json::to_value(&submission).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({ "name": "Ada", "college": "Girton", "email": "ada@example.org" })
        );
    }
}
