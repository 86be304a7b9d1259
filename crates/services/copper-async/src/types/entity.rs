//! The [`Entity`] trait tying each record type to its endpoint and validation rules

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::CopperError;

/// The CRM record types this client manipulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// People (contacts)
    People,
    /// Companies
    Companies,
    /// Opportunities (deals)
    Opportunities,
    /// Tasks
    Tasks,
}

impl EntityKind {
    /// Path segment of the collection endpoint
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Companies => "companies",
            Self::Opportunities => "opportunities",
            Self::Tasks => "tasks",
        }
    }

    /// `/{kind}`
    #[must_use]
    pub fn collection_path(self) -> String {
        format!("/{}", self.as_str())
    }

    /// `/{kind}/{id}`
    #[must_use]
    pub fn record_path(self, id: u64) -> String {
        format!("/{}/{id}", self.as_str())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Copper record type with its own collection endpoint
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Which collection this type lives in
    const KIND: EntityKind;

    /// Extra query/body filters accepted by list and search
    type Filters: Serialize + Default + Clone + Send + Sync;

    /// The record's ID, if it has been saved
    fn id(&self) -> Option<u64>;

    /// Checks the record before it is sent to Copper
    ///
    /// # Errors
    ///
    /// Returns [`CopperError::Validation`] describing the first violated rule.
    fn validate(&self) -> Result<(), CopperError>;
}

pub(crate) fn require_name(kind: EntityKind, name: &str) -> Result<(), CopperError> {
    if name.trim().is_empty() {
        return Err(CopperError::Validation(format!(
            "{kind}: name must not be blank"
        )));
    }
    Ok(())
}

pub(crate) fn require_non_negative(
    kind: EntityKind,
    field: &str,
    value: Option<i64>,
) -> Result<(), CopperError> {
    match value {
        Some(v) if v < 0 => Err(CopperError::Validation(format!(
            "{kind}: {field} must be non-negative, got {v}"
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn require_percentage(
    kind: EntityKind,
    field: &str,
    value: Option<u32>,
) -> Result<(), CopperError> {
    match value {
        Some(v) if v > 100 => Err(CopperError::Validation(format!(
            "{kind}: {field} must be between 0 and 100, got {v}"
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn require_amount(
    kind: EntityKind,
    field: &str,
    value: Option<f64>,
) -> Result<(), CopperError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(CopperError::Validation(format!(
            "{kind}: {field} must be a non-negative amount, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// `local@domain.tld`: one `@`, no whitespace, dotted domain without empty labels
pub(crate) fn require_email(kind: EntityKind, email: &str) -> Result<(), CopperError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
                && domain.contains('.')
                && domain.split('.').all(|label| !label.is_empty())
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CopperError::Validation(format!(
            "{kind}: invalid email address {email:?}"
        )))
    }
}

/// Absolute `http`/`https` URL with a host
pub(crate) fn require_url(kind: EntityKind, url: &str) -> Result<(), CopperError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| CopperError::Validation(format!("{kind}: invalid URL {url:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(CopperError::Validation(format!(
            "{kind}: URL must be http or https with a host, got {url:?}"
        )));
    }
    Ok(())
}
