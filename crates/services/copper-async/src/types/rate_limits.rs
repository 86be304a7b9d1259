//! Types for the `/rate_limits` endpoint

use serde::{Deserialize, Serialize};

/// When the current rate-limit window resets
///
/// Copper has sent both unix timestamps and date strings here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(untagged)]
pub enum ResetAt {
    /// Unix seconds
    Timestamp(i64),
    /// Date string as sent by the server
    Text(String),
}

/// Raw shape of `GET /rate_limits`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RateLimitsResponse {
    pub(crate) per_second: u32,
    pub(crate) per_hour: u32,
    pub(crate) remaining_this_second: u32,
    pub(crate) remaining_this_hour: u32,
    #[serde(default)]
    pub(crate) reset_at: Option<ResetAt>,
}

/// Requests still available in the current windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RateLimitRemaining {
    /// Left in the current second
    pub requests_this_second: u32,
    /// Left in the current hour
    pub requests_this_hour: u32,
}

/// The account's rate limits and current usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RateLimits {
    /// Allowed requests per second
    pub requests_per_second: u32,
    /// Allowed requests per hour
    pub requests_per_hour: u32,
    /// What is left
    pub remaining: RateLimitRemaining,
    /// Reset time of the current window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<ResetAt>,
}

impl From<RateLimitsResponse> for RateLimits {
    fn from(raw: RateLimitsResponse) -> Self {
        Self {
            requests_per_second: raw.per_second,
            requests_per_hour: raw.per_hour,
            remaining: RateLimitRemaining {
                requests_this_second: raw.remaining_this_second,
                requests_this_hour: raw.remaining_this_hour,
            },
            reset_at: raw.reset_at,
        }
    }
}

impl RateLimits {
    /// True when either window is used up
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining.requests_this_second == 0 || self.remaining.requests_this_hour == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reshapes_raw_response() {
        let raw: RateLimitsResponse = serde_json::from_value(json!({
            "per_second": 10,
            "per_hour": 3600,
            "remaining_this_second": 0,
            "remaining_this_hour": 3000,
            "reset_at": 1_700_000_060
        }))
        .unwrap();
        let limits = RateLimits::from(raw);

        assert_eq!(limits.requests_per_second, 10);
        assert_eq!(limits.remaining.requests_this_hour, 3000);
        assert_eq!(limits.reset_at, Some(ResetAt::Timestamp(1_700_000_060)));
        assert!(limits.is_exhausted());
    }

    #[test]
    fn reset_at_accepts_strings() {
        let r: ResetAt = serde_json::from_value(json!("2024-01-01T00:00:00Z")).unwrap();
        assert_eq!(r, ResetAt::Text("2024-01-01T00:00:00Z".into()));
    }
}
