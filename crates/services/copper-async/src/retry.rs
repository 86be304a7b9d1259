use std::time::Duration;

use backon::ExponentialBuilder;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::CopperError;

/// Header carrying the unix time at which the rate-limit window resets
pub const HDR_RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Upper bound on any delay taken from response headers
pub const MAX_HEADER_DELAY: Duration = Duration::from_secs(60);

/// Creates the default exponential backoff builder for Copper API requests
///
/// Configured with:
/// - Initial interval: 1s
/// - Max interval: 60s
/// - Max times: 2 (3 attempts in total)
/// - Factor: 2.0
/// - Jitter enabled
#[must_use]
pub fn default_backoff_builder() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(MAX_HEADER_DELAY)
        .with_max_times(2)
        .with_factor(2.0)
        .with_jitter()
}

/// Determines if an HTTP status code should trigger a retry
///
/// Retries on: 408, 429, and 5xx
#[must_use]
pub const fn is_retryable_status(code: u16) -> bool {
    matches!(code, 408 | 429 | 500..=599)
}

/// Reads the server-requested retry delay from response headers
///
/// `Retry-After` wins (delta seconds or an HTTP date). For 429 responses
/// without it, `X-RateLimit-Reset` is used. Non-retryable statuses yield `None`.
#[must_use]
pub fn parse_retry_after(status: u16, headers: &HeaderMap) -> Option<Duration> {
    parse_retry_after_at(status, headers, Utc::now())
}

fn parse_retry_after_at(status: u16, headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
    if !is_retryable_status(status) {
        return None;
    }

    let delay = if let Some(value) = header_str(headers, RETRY_AFTER.as_str()) {
        if let Ok(secs) = value.parse::<u64>() {
            Some(Duration::from_secs(secs))
        } else {
            DateTime::parse_from_rfc2822(value)
                .ok()
                .map(|at| until(now, at.with_timezone(&Utc)))
        }
    } else if status == 429 {
        header_str(headers, HDR_RATE_LIMIT_RESET)
            .and_then(|v| v.parse::<i64>().ok())
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|at| until(now, at))
    } else {
        None
    };

    delay.map(|d| d.min(MAX_HEADER_DELAY))
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
}

fn until(now: DateTime<Utc>, at: DateTime<Utc>) -> Duration {
    (at - now).to_std().unwrap_or(Duration::ZERO)
}

/// Picks the delay before the next attempt
///
/// `None` from the backoff means retries are exhausted and is passed through.
/// Otherwise the server-requested delay is honoured when it is longer.
#[must_use]
pub fn next_delay(err: &CopperError, backoff: Option<Duration>) -> Option<Duration> {
    let planned = backoff?;
    Some(err.retry_after().map_or(planned, |requested| requested.max(planned)))
}
