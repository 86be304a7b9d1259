use crate::{
    client::Client,
    config::Config,
    error::CopperError,
    types::{
        companies::Company,
        entity::{Entity, EntityKind},
        opportunities::Opportunity,
        people::Person,
        related::{Activity, ActivityQuery, Page, PageRequest, RelatedKind, RelatedRecords},
        tasks::Task,
    },
};

/// API resource for records linked to another record
pub struct Related<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Related<'c, C> {
    /// Creates a new Related resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Records of type `E` related to `kind`/`id`
    ///
    /// Calls `GET /{kind}/{id}/related/{E}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn records<E: Entity>(
        &self,
        kind: EntityKind,
        id: u64,
        page: &PageRequest,
    ) -> Result<Page<E>, CopperError> {
        let path = format!("{}/related/{}", kind.record_path(id), E::KIND);
        self.client.get_with_query(&path, page).await
    }

    /// Related records of a kind chosen at runtime
    ///
    /// [`RelatedKind::Activities`] is served from the activity history
    /// endpoint rather than `/related`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get_related_records(
        &self,
        kind: EntityKind,
        id: u64,
        related: RelatedKind,
        page: &PageRequest,
    ) -> Result<RelatedRecords, CopperError> {
        Ok(match related {
            RelatedKind::People => {
                RelatedRecords::People(self.records::<Person>(kind, id, page).await?)
            }
            RelatedKind::Companies => {
                RelatedRecords::Companies(self.records::<Company>(kind, id, page).await?)
            }
            RelatedKind::Opportunities => {
                RelatedRecords::Opportunities(self.records::<Opportunity>(kind, id, page).await?)
            }
            RelatedKind::Tasks => {
                RelatedRecords::Tasks(self.records::<Task>(kind, id, page).await?)
            }
            RelatedKind::Activities => {
                let query = ActivityQuery {
                    page_size: page.page_size,
                    page_number: page.page_number,
                    ..ActivityQuery::default()
                };
                RelatedRecords::Activities(self.activities(kind, id, &query).await?)
            }
        })
    }

    /// Activity history of `kind`/`id`
    ///
    /// Calls `GET /{kind}/{id}/activities`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn activities(
        &self,
        kind: EntityKind,
        id: u64,
        query: &ActivityQuery,
    ) -> Result<Page<Activity>, CopperError> {
        let path = format!("{}/activities", kind.record_path(id));
        let pairs = query.to_query();
        self.client.get_with_query(&path, pairs.as_slice()).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Related API resource
    #[must_use]
    pub const fn related(&self) -> Related<'_, C> {
        Related::new(self)
    }
}
