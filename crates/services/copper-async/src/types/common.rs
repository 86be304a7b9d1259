//! Shared types used across Copper API endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields every Copper record carries
///
/// Flattened into each entity. Copper names the timestamps `date_created` and
/// `date_modified` and sends them as unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RecordMeta {
    /// Unique identifier, assigned by Copper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// When the record was created
    #[serde(
        rename = "date_created",
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<i64>"))]
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last modified
    #[serde(
        rename = "date_modified",
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<i64>"))]
    pub updated_at: Option<DateTime<Utc>>,
    /// Values for account-defined custom fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
}

/// Value of a single custom field on a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct CustomField {
    /// ID of the custom field definition
    #[serde(alias = "field_id")]
    pub custom_field_definition_id: u64,
    /// Field value; its shape depends on the definition's data type
    #[serde(default)]
    pub value: serde_json::Value,
}

/// An email address with its category (e.g. `work`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct EmailAddress {
    /// The address itself
    pub email: String,
    /// Category such as `work` or `personal`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl EmailAddress {
    /// Creates a `work` email address
    #[must_use]
    pub fn work(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            category: Some("work".into()),
        }
    }
}

/// A phone number with its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct PhoneNumber {
    /// The number as entered
    pub number: String,
    /// Category such as `mobile` or `work`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A website URL with its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Website {
    /// Site URL
    pub url: String,
    /// Category such as `work` or `personal`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A social profile link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Social {
    /// Profile URL
    pub url: String,
    /// Network, e.g. `linkedin` or `twitter`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Address {
    /// Street line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or province
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// ZIP or postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Priority shared by opportunities and tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum Priority {
    /// No priority set
    None,
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

/// Sort order for list and search calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

/// Filter set for entities that have no entity-specific list filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct NoFilters {}

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Query parameters for `GET /{entity}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRequest<F = NoFilters> {
    /// Records per page
    pub page_size: u32,
    /// 1-based page number
    pub page_number: u32,
    /// Field to sort by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    /// Entity-specific filters
    #[serde(flatten)]
    pub filters: F,
}

impl<F: Default> Default for ListRequest<F> {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_number: 1,
            sort_by: None,
            sort_direction: None,
            filters: F::default(),
        }
    }
}

impl<F> ListRequest<F> {
    /// Set the page size
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the 1-based page number
    #[must_use]
    pub const fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Sort by `field` in `direction`
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_direction = Some(direction);
        self
    }

    /// Set the entity-specific filters
    #[must_use]
    pub fn with_filters(mut self, filters: F) -> Self {
        self.filters = filters;
        self
    }
}

/// Body for `POST /{entity}/search`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest<F = NoFilters> {
    /// Records per page
    pub page_size: u32,
    /// 1-based page number
    pub page_number: u32,
    /// Free-text query across all fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Field to sort by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    /// Field-specific criteria, sent as top-level keys
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
    /// Entity-specific filters
    #[serde(flatten)]
    pub filters: F,
}

impl<F: Default> Default for SearchRequest<F> {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_number: 1,
            query: None,
            sort_by: None,
            sort_direction: None,
            fields: serde_json::Map::new(),
            filters: F::default(),
        }
    }
}

impl<F: Default> SearchRequest<F> {
    /// Create a free-text search
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }
}

impl<F> SearchRequest<F> {
    /// Add a field-specific criterion
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the 1-based page number
    #[must_use]
    pub const fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Sort by `field` in `direction`
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_direction = Some(direction);
        self
    }

    /// Set the entity-specific filters
    #[must_use]
    pub fn with_filters(mut self, filters: F) -> Self {
        self.filters = filters;
        self
    }
}

/// List payload as Copper returns it: a bare array or a `data` envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

const fn deleted_default() -> bool {
    true
}

/// Response from `DELETE /{entity}/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// ID of the deleted record
    #[serde(default)]
    pub id: Option<u64>,
    /// Whether Copper reports the record as deleted
    #[serde(default = "deleted_default")]
    pub is_deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_meta_reads_unix_timestamps() {
        let meta: RecordMeta = serde_json::from_value(json!({
            "id": 7,
            "date_created": 1_700_000_000,
            "date_modified": null,
            "custom_fields": [{"field_id": 3, "value": "gold"}]
        }))
        .unwrap();

        assert_eq!(meta.id, Some(7));
        assert_eq!(meta.created_at.unwrap().timestamp(), 1_700_000_000);
        assert!(meta.updated_at.is_none());
        assert_eq!(meta.custom_fields[0].custom_field_definition_id, 3);
        assert_eq!(meta.custom_fields[0].value, "gold");
    }

    #[test]
    fn empty_meta_serializes_to_empty_object() {
        let v = serde_json::to_value(RecordMeta::default()).unwrap();
        assert_eq!(v, json!({}));
    }

    #[test]
    fn listing_accepts_bare_and_wrapped() {
        let bare: Listing<u32> = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2]);

        let wrapped: Listing<u32> = serde_json::from_value(json!({"data": [3]})).unwrap();
        assert_eq!(wrapped.into_vec(), vec![3]);
    }

    #[test]
    fn search_request_flattens_fields() {
        let req: SearchRequest = SearchRequest::new("acme")
            .with_field("city", "Berlin")
            .with_page_size(5);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({"page_size": 5, "page_number": 1, "query": "acme", "city": "Berlin"})
        );
    }

    #[test]
    fn delete_response_defaults_to_deleted() {
        let r: DeleteResponse = serde_json::from_value(json!({})).unwrap();
        assert!(r.is_deleted);
        assert!(r.id.is_none());
    }
}
