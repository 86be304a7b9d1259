//! Types for the Copper `/tasks` endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Priority, RecordMeta};
use super::entity::{Entity, EntityKind, require_name};
use crate::error::CopperError;

/// Completion state of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum TaskStatus {
    /// Not done yet
    #[default]
    Open,
    /// Done
    Completed,
}

/// The record a task is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RelatedResource {
    /// ID of the related record
    pub id: u64,
    /// Kind of the related record, e.g. `person` or `opportunity`
    #[serde(rename = "type")]
    pub kind: String,
}

/// A task in Copper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Task {
    /// ID, timestamps and custom fields
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Task title
    pub name: String,
    /// ID of the user the task is assigned to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    /// When the task is due
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<i64>"))]
    pub due_date: Option<DateTime<Utc>>,
    /// When to send a reminder
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<i64>"))]
    pub reminder_date: Option<DateTime<Utc>>,
    /// Priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Completion state
    #[serde(default)]
    pub status: TaskStatus,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Primary related record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_resource: Option<RelatedResource>,
    /// When the task was completed
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<i64>"))]
    pub completed_date: Option<DateTime<Utc>>,
    /// Tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Task {
    /// Create an open, unsaved task with the given title
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the due date
    #[must_use]
    pub const fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Attach the task to another record
    #[must_use]
    pub fn related_to(mut self, kind: impl Into<String>, id: u64) -> Self {
        self.related_resource = Some(RelatedResource {
            id,
            kind: kind.into(),
        });
        self
    }
}

/// Extra filters for listing and searching tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct TaskFilters {
    /// Only tasks assigned to this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    /// Only tasks in this state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Only tasks attached to records of this kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_resource_type: Option<String>,
    /// Only tasks attached to this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_resource_id: Option<u64>,
}

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Tasks;
    type Filters = TaskFilters;

    fn id(&self) -> Option<u64> {
        self.meta.id
    }

    fn validate(&self) -> Result<(), CopperError> {
        require_name(Self::KIND, &self.name)
    }
}
