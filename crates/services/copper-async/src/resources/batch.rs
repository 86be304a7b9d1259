use crate::{
    client::Client,
    config::Config,
    error::CopperError,
    types::{
        batch::{BatchCollector, BatchItemError, BatchOptions, BatchResponse, BatchUpdate},
        entity::{Entity, EntityKind},
    },
};

/// Batch helpers that apply one operation to many records
///
/// Records are sent one request at a time, in input order. A record that
/// fails validation or is rejected by Copper becomes a failed item in the
/// [`BatchResponse`]; it never fails the whole call.
pub struct Batch<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Batch<'c, C> {
    /// Creates a new Batch resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Create every record
    ///
    /// A success item carries the ID Copper assigned; a response without
    /// one is reported as a failed item.
    ///
    /// # Errors
    ///
    /// Returns [`CopperError::Config`] before sending anything if credentials
    /// are missing. Per-record failures are reported in the response.
    pub async fn create<E: Entity>(
        &self,
        records: &[E],
        options: BatchOptions,
    ) -> Result<BatchResponse, CopperError> {
        self.client.config().validate_auth()?;
        tracing::debug!(kind = %E::KIND, total = records.len(), "batch create");

        let path = E::KIND.collection_path();
        let mut collector = BatchCollector::new(records.len(), options);
        for record in records {
            let outcome = match record.validate() {
                Ok(()) => self
                    .client
                    .post::<E, E>(&path, record)
                    .await
                    .and_then(|created| {
                        created.id().ok_or_else(|| {
                            CopperError::Serde(format!("{} create response has no id", E::KIND))
                        })
                    }),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(id) => collector.success(Some(id)),
                Err(e) => {
                    tracing::debug!(kind = %E::KIND, "batch create item failed: {e}");
                    let error = BatchItemError::from_error(&e, serde_json::to_value(record).ok());
                    if !collector.failure(None, error) {
                        break;
                    }
                }
            }
        }

        Ok(finish(E::KIND, "create", collector))
    }

    /// Update every record by ID
    ///
    /// # Errors
    ///
    /// Returns [`CopperError::Config`] before sending anything if credentials
    /// are missing. Per-record failures are reported in the response.
    pub async fn update<E: Entity>(
        &self,
        records: &[BatchUpdate<E>],
        options: BatchOptions,
    ) -> Result<BatchResponse, CopperError> {
        self.client.config().validate_auth()?;
        tracing::debug!(kind = %E::KIND, total = records.len(), "batch update");

        let mut collector = BatchCollector::new(records.len(), options);
        for BatchUpdate { id, data } in records {
            let outcome = match data.validate() {
                Ok(()) => {
                    self.client
                        .put::<E, E>(&E::KIND.record_path(*id), data)
                        .await
                }
                Err(e) => Err(e),
            };
            match outcome {
                Ok(_) => collector.success(Some(*id)),
                Err(e) => {
                    tracing::debug!(kind = %E::KIND, id, "batch update item failed: {e}");
                    let error = BatchItemError::from_error(&e, serde_json::to_value(data).ok());
                    if !collector.failure(Some(*id), error) {
                        break;
                    }
                }
            }
        }

        Ok(finish(E::KIND, "update", collector))
    }

    /// Delete every ID from the `kind` collection
    ///
    /// # Errors
    ///
    /// Returns [`CopperError::Config`] before sending anything if credentials
    /// are missing. Per-record failures are reported in the response.
    pub async fn delete(
        &self,
        kind: EntityKind,
        ids: &[u64],
        options: BatchOptions,
    ) -> Result<BatchResponse, CopperError> {
        self.client.config().validate_auth()?;
        tracing::debug!(%kind, total = ids.len(), "batch delete");

        let mut collector = BatchCollector::new(ids.len(), options);
        for &id in ids {
            match self.client.delete_record(kind, id).await {
                Ok(resp) if resp.is_deleted => collector.success(Some(id)),
                Ok(_) => {
                    let error = BatchItemError {
                        message: format!("{kind} {id} was not deleted"),
                        code: None,
                        request_id: None,
                        details: None,
                    };
                    if !collector.failure(Some(id), error) {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(%kind, id, "batch delete item failed: {e}");
                    if !collector.failure(Some(id), BatchItemError::from_error(&e, None)) {
                        break;
                    }
                }
            }
        }

        Ok(finish(kind, "delete", collector))
    }
}

fn finish(kind: EntityKind, op: &str, collector: BatchCollector) -> BatchResponse {
    let resp = collector.finish();
    tracing::debug!(
        %kind,
        op,
        total = resp.summary.total,
        succeeded = resp.summary.succeeded,
        failed = resp.summary.failed,
        "batch finished"
    );
    resp
}

impl<C: Config> crate::Client<C> {
    /// Returns the Batch API resource
    #[must_use]
    pub const fn batch(&self) -> Batch<'_, C> {
        Batch::new(self)
    }
}
