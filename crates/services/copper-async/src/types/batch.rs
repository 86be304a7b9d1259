//! Types for batch create, update and delete

use serde::{Deserialize, Serialize};

use crate::error::{CopperError, ErrorCode};

/// How a batch call reacts to per-record failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct BatchOptions {
    /// Keep going after a record fails
    pub continue_on_error: bool,
    /// Include failed records in [`BatchResponse::results`]
    pub return_errors: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            return_errors: true,
        }
    }
}

impl BatchOptions {
    /// Stop at the first failure
    #[must_use]
    pub const fn stop_on_error(mut self) -> Self {
        self.continue_on_error = false;
        self
    }

    /// Leave failed records out of the results; they are still counted
    #[must_use]
    pub const fn without_errors(mut self) -> Self {
        self.return_errors = false;
        self
    }
}

/// One record of a batch update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUpdate<E> {
    /// ID of the record to update
    pub id: u64,
    /// New field values
    pub data: E,
}

impl<E> BatchUpdate<E> {
    /// Pair a record ID with its new values
    pub const fn new(id: u64, data: E) -> Self {
        Self { id, data }
    }
}

/// Why a single record in a batch failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct BatchItemError {
    /// Human-readable message
    pub message: String,
    /// Error category, when one applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Request identifier reported by Copper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// The record that failed, for create and update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl BatchItemError {
    pub(crate) fn from_error(err: &CopperError, details: Option<serde_json::Value>) -> Self {
        Self {
            message: err.to_string(),
            code: err.code(),
            request_id: err.request_id().map(str::to_string),
            details,
        }
    }
}

/// Outcome for one record of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct BatchItemResult {
    /// Whether the operation succeeded for this record
    pub success: bool,
    /// Record ID: the created ID, or the ID that was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Failure detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchItemError>,
}

impl BatchItemResult {
    pub(crate) const fn succeeded(id: Option<u64>) -> Self {
        Self {
            success: true,
            id,
            error: None,
        }
    }

    pub(crate) const fn failed(id: Option<u64>, error: BatchItemError) -> Self {
        Self {
            success: false,
            id,
            error: Some(error),
        }
    }
}

/// Counts across a whole batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct BatchSummary {
    /// Number of records submitted
    pub total: usize,
    /// Records that succeeded
    pub succeeded: usize,
    /// Records that failed
    pub failed: usize,
}

/// Result of a batch call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct BatchResponse {
    /// Per-record outcomes, in input order
    pub results: Vec<BatchItemResult>,
    /// Aggregate counts
    pub summary: BatchSummary,
}

impl BatchResponse {
    /// True when no record failed
    #[must_use]
    pub const fn is_complete_success(&self) -> bool {
        self.summary.failed == 0 && self.summary.succeeded == self.summary.total
    }
}

/// Accumulates outcomes while a batch runs
#[derive(Debug)]
pub(crate) struct BatchCollector {
    options: BatchOptions,
    response: BatchResponse,
}

impl BatchCollector {
    pub(crate) fn new(total: usize, options: BatchOptions) -> Self {
        Self {
            options,
            response: BatchResponse {
                results: Vec::with_capacity(total),
                summary: BatchSummary {
                    total,
                    ..BatchSummary::default()
                },
            },
        }
    }

    pub(crate) fn success(&mut self, id: Option<u64>) {
        self.response.summary.succeeded += 1;
        self.response.results.push(BatchItemResult::succeeded(id));
    }

    /// Records a failure; returns `false` when the batch should stop
    pub(crate) fn failure(&mut self, id: Option<u64>, error: BatchItemError) -> bool {
        self.response.summary.failed += 1;
        if self.options.return_errors {
            self.response.results.push(BatchItemResult::failed(id, error));
        }
        self.options.continue_on_error
    }

    pub(crate) fn finish(self) -> BatchResponse {
        self.response
    }
}
