use std::marker::PhantomData;

use crate::{
    client::Client,
    config::Config,
    error::{CopperError, map_deser},
    types::{
        common::{DeleteResponse, ListRequest, Listing, SearchRequest},
        companies::Company,
        entity::{Entity, EntityKind},
        opportunities::Opportunity,
        people::Person,
        tasks::Task,
    },
};

/// API resource for one entity collection, e.g. `/people`
///
/// Every entity exposes the same operations; the entity type picks the
/// endpoint, the filters and the validation rules.
pub struct Entities<'c, C: Config, E: Entity> {
    client: &'c Client<C>,
    _entity: PhantomData<fn() -> E>,
}

/// API resource for the `/people` endpoints
pub type People<'c, C> = Entities<'c, C, Person>;
/// API resource for the `/companies` endpoints
pub type Companies<'c, C> = Entities<'c, C, Company>;
/// API resource for the `/opportunities` endpoints
pub type Opportunities<'c, C> = Entities<'c, C, Opportunity>;
/// API resource for the `/tasks` endpoints
pub type Tasks<'c, C> = Entities<'c, C, Task>;

impl<'c, C: Config, E: Entity> Entities<'c, C, E> {
    /// Creates a new resource for entity type `E`
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    /// List records, one page at a time
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self, req: &ListRequest<E::Filters>) -> Result<Vec<E>, CopperError> {
        let listing: Listing<E> = self
            .client
            .get_with_query(&E::KIND.collection_path(), req)
            .await?;
        Ok(listing.into_vec())
    }

    /// Fetch a single record by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error
    /// (`not_found` for unknown IDs).
    pub async fn get(&self, id: u64) -> Result<E, CopperError> {
        self.client.get(&E::KIND.record_path(id)).await
    }

    /// Create a record
    ///
    /// # Errors
    ///
    /// Returns [`CopperError::Validation`] without sending anything if the
    /// record is invalid, otherwise any request or API error.
    pub async fn create(&self, record: &E) -> Result<E, CopperError> {
        record.validate()?;
        self.client.post(&E::KIND.collection_path(), record).await
    }

    /// Replace the fields of an existing record
    ///
    /// # Errors
    ///
    /// Returns [`CopperError::Validation`] without sending anything if the
    /// record is invalid, otherwise any request or API error.
    pub async fn update(&self, id: u64, record: &E) -> Result<E, CopperError> {
        record.validate()?;
        self.client.put(&E::KIND.record_path(id), record).await
    }

    /// Delete a record
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn delete(&self, id: u64) -> Result<DeleteResponse, CopperError> {
        self.client.delete_record(E::KIND, id).await
    }

    /// Search with free text, field criteria and entity filters
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn search(&self, req: &SearchRequest<E::Filters>) -> Result<Vec<E>, CopperError> {
        let path = format!("{}/search", E::KIND.collection_path());
        let listing: Listing<E> = self.client.post(&path, req).await?;
        Ok(listing.into_vec())
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the People API resource
    #[must_use]
    pub const fn people(&self) -> People<'_, C> {
        Entities::new(self)
    }

    /// Returns the Companies API resource
    #[must_use]
    pub const fn companies(&self) -> Companies<'_, C> {
        Entities::new(self)
    }

    /// Returns the Opportunities API resource
    #[must_use]
    pub const fn opportunities(&self) -> Opportunities<'_, C> {
        Entities::new(self)
    }

    /// Returns the Tasks API resource
    #[must_use]
    pub const fn tasks(&self) -> Tasks<'_, C> {
        Entities::new(self)
    }

    /// `DELETE /{kind}/{id}`; an empty body counts as deleted
    pub(crate) async fn delete_record(
        &self,
        kind: EntityKind,
        id: u64,
    ) -> Result<DeleteResponse, CopperError> {
        let bytes = self.delete(&kind.record_path(id)).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(DeleteResponse {
                id: Some(id),
                is_deleted: true,
            });
        }

        let mut resp: DeleteResponse =
            serde_json::from_slice(&bytes).map_err(|e| map_deser(&e, &bytes))?;
        resp.id = resp.id.or(Some(id));
        Ok(resp)
    }
}
