//! Types for related-record and activity queries

use chrono::{DateTime, SecondsFormat, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::companies::Company;
use super::entity::EntityKind;
use super::opportunities::Opportunity;
use super::people::Person;
use super::tasks::Task;

/// Optional paging for related-record queries
///
/// Unset fields are not sent, so Copper applies its own defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Records per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl PageRequest {
    /// Request a specific page
    #[must_use]
    pub const fn new(page_size: u32, page_number: u32) -> Self {
        Self {
            page_size: Some(page_size),
            page_number: Some(page_number),
        }
    }
}

/// Pagination details returned alongside a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct PageMetadata {
    /// Records matching across all pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Number of pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
    /// Page this response holds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,
    /// Records per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u64>,
    /// Whether a later page exists
    #[serde(default)]
    pub has_more: bool,
}

/// One page of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Page<T> {
    /// Records on this page
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Pagination details
    #[serde(default)]
    pub metadata: PageMetadata,
}

/// Copper's structured activity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ActivityType {
    /// `user` for logged activities, `system` for automatic ones
    pub category: String,
    /// Activity type ID within the category
    pub id: u64,
}

/// The `type` of an activity: either a plain name or Copper's typed object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(untagged)]
pub enum ActivityKind {
    /// `{"category": "user", "id": 0}`
    Typed(ActivityType),
    /// e.g. `note` or `email`
    Name(String),
}

impl ActivityKind {
    /// The name, or the category of a typed activity
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Typed(t) => &t.category,
            Self::Name(name) => name,
        }
    }
}

/// An entry in a record's activity history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Activity {
    /// Activity ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Activity type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ActivityKind>,
    /// What happened, e.g. `created`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Activity-specific payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// User who performed the activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// When it happened
    #[serde(
        default,
        alias = "activity_date",
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<i64>"))]
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Filters for `GET /{entity}/{id}/activities`
///
/// Build with [`ActivityQueryBuilder`]; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
#[builder(setter(into, strip_option), default)]
pub struct ActivityQuery {
    /// Only these activity types
    #[builder(setter(custom))]
    pub activity_types: Vec<String>,
    /// Only activities at or after this time
    pub date_from: Option<DateTime<Utc>>,
    /// Only activities at or before this time
    pub date_to: Option<DateTime<Utc>>,
    /// Records per page
    pub page_size: Option<u32>,
    /// 1-based page number
    pub page_number: Option<u32>,
}

impl ActivityQueryBuilder {
    /// Add an activity type filter; may be called repeatedly
    pub fn activity_type(&mut self, kind: impl Into<String>) -> &mut Self {
        self.activity_types
            .get_or_insert_with(Vec::new)
            .push(kind.into());
        self
    }

    /// Replace the activity type filter
    pub fn activity_types<I, S>(&mut self, kinds: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activity_types = Some(kinds.into_iter().map(Into::into).collect());
        self
    }
}

impl ActivityQuery {
    /// Query pairs; `activity_types` repeats its key once per value
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q: Vec<(&'static str, String)> = self
            .activity_types
            .iter()
            .map(|t| ("activity_types", t.clone()))
            .collect();
        if let Some(from) = self.date_from {
            q.push(("date_from", from.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(to) = self.date_to {
            q.push(("date_to", to.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(size) = self.page_size {
            q.push(("page_size", size.to_string()));
        }
        if let Some(number) = self.page_number {
            q.push(("page_number", number.to_string()));
        }
        q
    }
}

/// What to fetch in a related-record query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum RelatedKind {
    /// Related people
    People,
    /// Related companies
    Companies,
    /// Related opportunities
    Opportunities,
    /// Related tasks
    Tasks,
    /// The record's activity history
    Activities,
}

impl RelatedKind {
    /// The entity collection this kind maps to, if it is one
    #[must_use]
    pub const fn entity(self) -> Option<EntityKind> {
        match self {
            Self::People => Some(EntityKind::People),
            Self::Companies => Some(EntityKind::Companies),
            Self::Opportunities => Some(EntityKind::Opportunities),
            Self::Tasks => Some(EntityKind::Tasks),
            Self::Activities => None,
        }
    }
}

impl From<EntityKind> for RelatedKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::People => Self::People,
            EntityKind::Companies => Self::Companies,
            EntityKind::Opportunities => Self::Opportunities,
            EntityKind::Tasks => Self::Tasks,
        }
    }
}

/// Records returned by [`crate::resources::Related::get_related_records`]
#[derive(Debug, Clone, PartialEq)]
pub enum RelatedRecords {
    /// Related people
    People(Page<Person>),
    /// Related companies
    Companies(Page<Company>),
    /// Related opportunities
    Opportunities(Page<Opportunity>),
    /// Related tasks
    Tasks(Page<Task>),
    /// Activity history
    Activities(Page<Activity>),
}

impl RelatedRecords {
    /// Pagination details of whichever page this holds
    #[must_use]
    pub const fn metadata(&self) -> &PageMetadata {
        match self {
            Self::People(p) => &p.metadata,
            Self::Companies(p) => &p.metadata,
            Self::Opportunities(p) => &p.metadata,
            Self::Tasks(p) => &p.metadata,
            Self::Activities(p) => &p.metadata,
        }
    }

    /// Number of records on the page
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::People(p) => p.data.len(),
            Self::Companies(p) => p.data.len(),
            Self::Opportunities(p) => p.data.len(),
            Self::Tasks(p) => p.data.len(),
            Self::Activities(p) => p.data.len(),
        }
    }

    /// True when the page holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
