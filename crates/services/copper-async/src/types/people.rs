//! Types for the Copper `/people` endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Address, EmailAddress, NoFilters, PhoneNumber, RecordMeta, Social, Website};
use super::entity::{
    Entity, EntityKind, require_email, require_name, require_non_negative, require_url,
};
use crate::error::CopperError;

/// Lifecycle status of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum PersonStatus {
    /// Active contact
    Active,
    /// No longer active
    Inactive,
    /// Prospective contact
    Lead,
    /// Paying customer
    Customer,
}

/// A person (contact) in Copper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Person {
    /// ID, timestamps and custom fields
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Full name
    pub name: String,
    /// Name prefix (Mr., Dr., ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// First name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Middle name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Name suffix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Email addresses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<EmailAddress>,
    /// Phone numbers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<PhoneNumber>,
    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// ID of the person's company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,
    /// Name of the person's company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Social profiles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub socials: Vec<Social>,
    /// Websites
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub websites: Vec<Website>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ID of the owning user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    /// Contact type ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_type_id: Option<u64>,
    /// Lifecycle status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PersonStatus>,
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

impl Person {
    /// Create an unsaved person with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Some(PersonStatus::Active),
            ..Self::default()
        }
    }

    /// Add a `work` email address
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.emails.push(EmailAddress::work(email));
        self
    }
}

impl Entity for Person {
    const KIND: EntityKind = EntityKind::People;
    type Filters = NoFilters;

    fn id(&self) -> Option<u64> {
        self.meta.id
    }

    fn validate(&self) -> Result<(), CopperError> {
        require_name(Self::KIND, &self.name)?;
        require_non_negative(Self::KIND, "interaction_count", self.interaction_count)?;
        for e in &self.emails {
            require_email(Self::KIND, &e.email)?;
        }
        for w in &self.websites {
            require_url(Self::KIND, &w.url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": 12345,
            "name": "John Doe",
            "first_name": "John",
            "last_name": "Doe",
            "emails": [{"email": "john@example.com", "category": "work"}],
            "phone_numbers": [{"number": "+1234567890", "category": "mobile"}],
            "address": {
                "street": "123 Main St",
                "city": "Anytown",
                "state": "CA",
                "postal_code": "12345",
                "country": "USA"
            },
            "title": "CEO",
            "company_name": "Example Corp",
            "tags": ["VIP", "Customer"],
            "date_created": 1_700_000_000,
            "date_modified": 1_700_000_500,
            "custom_fields": [{"custom_field_definition_id": 1, "value": 42}],
            "some_future_field": true
        })
    }

    #[test]
    fn deserializes_api_payload() {
        let person: Person = serde_json::from_value(sample()).unwrap();

        assert_eq!(person.id(), Some(12345));
        assert_eq!(person.name, "John Doe");
        assert_eq!(person.first_name.as_deref(), Some("John"));
        assert_eq!(person.emails[0].email, "john@example.com");
        assert_eq!(person.phone_numbers[0].number, "+1234567890");
        assert_eq!(
            person.address.as_ref().unwrap().street.as_deref(),
            Some("123 Main St")
        );
        assert_eq!(person.tags, vec!["VIP", "Customer"]);
        assert_eq!(person.meta.created_at.unwrap().timestamp(), 1_700_000_000);
        assert_eq!(person.meta.updated_at.unwrap().timestamp(), 1_700_000_500);
        assert_eq!(person.meta.custom_fields.len(), 1);
    }

    #[test]
    fn serializes_to_api_shape() {
        let person: Person = serde_json::from_value(sample()).unwrap();
        let v = serde_json::to_value(&person).unwrap();

        assert_eq!(v["name"], "John Doe");
        assert_eq!(v["emails"], json!([{"email": "john@example.com", "category": "work"}]));
        assert_eq!(v["phone_numbers"][0]["number"], "+1234567890");
        assert_eq!(v["address"]["street"], "123 Main St");
        assert_eq!(v["date_created"], 1_700_000_000);
        assert!(v.get("some_future_field").is_none());
    }

    #[test]
    fn new_person_omits_unset_fields() {
        let v = serde_json::to_value(Person::new("Ada").with_email("ada@example.com")).unwrap();
        assert_eq!(
            v,
            json!({
                "name": "Ada",
                "emails": [{"email": "ada@example.com", "category": "work"}],
                "status": "Active"
            })
        );
    }

    #[test]
    fn validation_rules() {
        assert!(Person::new("Ada").validate().is_ok());
        assert!(Person::new(" ").validate().is_err());

        let mut p = Person::new("Ada");
        p.interaction_count = Some(-3);
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("interaction_count"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        assert!(Person::new("Ada").with_email("ada@example.com").validate().is_ok());

        let err = Person::new("Ada")
            .with_email("not-an-email")
            .validate()
            .unwrap_err();
        assert!(matches!(err, CopperError::Validation(_)));
        assert!(err.to_string().contains("not-an-email"));
    }
}
