//! Types for the Copper `/opportunities` endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Priority, RecordMeta};
use super::entity::{Entity, EntityKind, require_amount, require_name, require_percentage};
use crate::error::CopperError;

/// Where an opportunity stands in its pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum OpportunityStatus {
    /// Still being worked
    #[default]
    Open,
    /// Closed as won
    Won,
    /// Closed as lost
    Lost,
    /// Dropped without a decision
    Abandoned,
}

/// An opportunity (deal) in Copper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Opportunity {
    /// ID, timestamps and custom fields
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Opportunity name
    pub name: String,
    /// ID of the owning user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    /// Expected close date
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<i64>"))]
    pub close_date: Option<DateTime<Utc>>,
    /// ID of the associated company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,
    /// Name of the associated company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// ID of the customer source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_source_id: Option<u64>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ID of the loss reason, once lost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_reason_id: Option<u64>,
    /// Deal value in the account currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monetary_value: Option<f64>,
    /// ID of the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<u64>,
    /// ID of the stage within the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_stage_id: Option<u64>,
    /// Priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Stage probability, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<u32>,
    /// Pipeline status
    #[serde(default)]
    pub status: OpportunityStatus,
    /// Tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Estimated chance of winning, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_probability: Option<u32>,
}

impl Opportunity {
    /// Create an open, unsaved opportunity with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the deal value
    #[must_use]
    pub const fn with_monetary_value(mut self, value: f64) -> Self {
        self.monetary_value = Some(value);
        self
    }

    /// Place the opportunity in a pipeline stage
    #[must_use]
    pub const fn with_pipeline(mut self, pipeline_id: u64, stage_id: u64) -> Self {
        self.pipeline_id = Some(pipeline_id);
        self.pipeline_stage_id = Some(stage_id);
        self
    }
}

/// Extra filters for listing and searching opportunities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct OpportunityFilters {
    /// Only opportunities in this pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<u64>,
    /// Only opportunities in this stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_stage_id: Option<u64>,
}

impl Entity for Opportunity {
    const KIND: EntityKind = EntityKind::Opportunities;
    type Filters = OpportunityFilters;

    fn id(&self) -> Option<u64> {
        self.meta.id
    }

    fn validate(&self) -> Result<(), CopperError> {
        require_name(Self::KIND, &self.name)?;
        require_percentage(Self::KIND, "probability", self.probability)?;
        require_percentage(Self::KIND, "win_probability", self.win_probability)?;
        require_amount(Self::KIND, "monetary_value", self.monetary_value)
    }
}
