use crate::{
    client::Client,
    config::Config,
    error::CopperError,
    types::rate_limits::{RateLimits, RateLimitsResponse},
};

/// API resource for the `/rate_limits` endpoint
pub struct RateLimitsResource<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> RateLimitsResource<'c, C> {
    /// Creates a new rate-limits resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Current limits and remaining request budget
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self) -> Result<RateLimits, CopperError> {
        let raw: RateLimitsResponse = self.client.get("/rate_limits").await?;
        Ok(raw.into())
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the rate-limits API resource
    #[must_use]
    pub const fn rate_limits(&self) -> RateLimitsResource<'_, C> {
        RateLimitsResource::new(self)
    }
}
