//! Types for the Copper `/companies` endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Address, NoFilters, PhoneNumber, RecordMeta, Social, Website};
use super::entity::{Entity, EntityKind, require_name, require_non_negative, require_url};
use crate::error::CopperError;

/// A company (organisation) in Copper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Company {
    /// ID, timestamps and custom fields
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Company name
    pub name: String,
    /// ID of the owning user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    /// Contact type ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_type_id: Option<u64>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Email domain used to match people to this company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_domain: Option<String>,
    /// Phone numbers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<PhoneNumber>,
    /// Social profiles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub socials: Vec<Social>,
    /// Tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Websites
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub websites: Vec<Website>,
    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// ID of the parent company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_company_id: Option<u64>,
    /// Number of logged interactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_count: Option<i64>,
    /// Time of the most recent interaction
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<i64>"))]
    pub last_interaction: Option<DateTime<Utc>>,
}

impl Company {
    /// Create an unsaved company with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the email domain
    #[must_use]
    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = Some(domain.into());
        self
    }

    /// Add a `work` website
    #[must_use]
    pub fn with_website(mut self, url: impl Into<String>) -> Self {
        self.websites.push(Website {
            url: url.into(),
            category: Some("work".into()),
        });
        self
    }
}

impl Entity for Company {
    const KIND: EntityKind = EntityKind::Companies;
    type Filters = NoFilters;

    fn id(&self) -> Option<u64> {
        self.meta.id
    }

    fn validate(&self) -> Result<(), CopperError> {
        require_name(Self::KIND, &self.name)?;
        require_non_negative(Self::KIND, "interaction_count", self.interaction_count)?;
        for w in &self.websites {
            require_url(Self::KIND, &w.url)?;
        }
        Ok(())
    }
}
