//! Generic CRUD store for REST-backed GRC resources.
//!
//! One [`ResourceStore`] per resource type replaces hand-written
//! per-domain stores. The local item list mirrors the server and is only
//! mutated after the corresponding API call succeeds; a list fetch
//! replaces it wholesale (the last fetch wins).

use std::sync::Arc;

use serde_json::Value;

use grc_core::error::CoreError;
use grc_core::types::DbId;

use crate::error::ClientError;
use crate::resources::Resource;
use crate::transport::Transport;

/// Client-side cache of one resource collection.
pub struct ResourceStore<R: Resource> {
    transport: Arc<dyn Transport>,
    items: Vec<R>,
    loading: bool,
    error: Option<String>,
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Items in server order, as of the last successful call.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed call, cleared when the next call starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: DbId) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// `GET {endpoint}` and replace the local list.
    pub async fn fetch_all(&mut self) -> Result<&[R], ClientError> {
        let transport = Arc::clone(&self.transport);
        let result = {
            let _loading = self.begin();
            async {
                let value = transport.get(R::ENDPOINT).await?;
                decode_list::<R>(value)
            }
            .await
        };

        let items = self.settle("fetch_all", result)?;
        tracing::debug!(entity = R::ENTITY, count = items.len(), "Fetched collection");
        self.items = items;
        Ok(&self.items)
    }

    /// `GET {endpoint}/{id}` and upsert the item locally.
    pub async fn fetch_one(&mut self, id: DbId) -> Result<R, ClientError> {
        let transport = Arc::clone(&self.transport);
        let result = {
            let _loading = self.begin();
            async {
                let value = transport.get(&R::item_path(id)).await?;
                decode_item::<R>(value, id)
            }
            .await
        };

        let item = self.settle("fetch_one", result)?;
        self.upsert(item.clone());
        Ok(item)
    }

    /// `POST {endpoint}` and append the created item.
    pub async fn create(&mut self, draft: &R::Draft) -> Result<R, ClientError> {
        let transport = Arc::clone(&self.transport);
        let result = {
            let _loading = self.begin();
            async {
                let body = serde_json::to_value(draft)?;
                let value = transport.post(R::ENDPOINT, &body).await?;
                Ok::<R, ClientError>(serde_json::from_value(value)?)
            }
            .await
        };

        let item = self.settle("create", result)?;
        tracing::info!(entity = R::ENTITY, id = item.id(), "Resource created");
        self.items.push(item.clone());
        Ok(item)
    }

    /// `PUT {endpoint}/{id}` and replace the item locally.
    ///
    /// An item that was never loaded is appended.
    pub async fn update(&mut self, id: DbId, draft: &R::Draft) -> Result<R, ClientError> {
        let transport = Arc::clone(&self.transport);
        let result = {
            let _loading = self.begin();
            async {
                let body = serde_json::to_value(draft)?;
                let value = transport.put(&R::item_path(id), &body).await?;
                decode_item::<R>(value, id)
            }
            .await
        };

        let item = self.settle("update", result)?;
        tracing::info!(entity = R::ENTITY, id, "Resource updated");
        self.upsert(item.clone());
        Ok(item)
    }

    /// `DELETE {endpoint}/{id}` and drop the item locally, if loaded.
    pub async fn delete(&mut self, id: DbId) -> Result<(), ClientError> {
        let transport = Arc::clone(&self.transport);
        let result = {
            let _loading = self.begin();
            transport.delete(&R::item_path(id)).await
        };

        self.settle("delete", result)?;
        tracing::info!(entity = R::ENTITY, id, "Resource deleted");
        self.items.retain(|item| item.id() != id);
        Ok(())
    }

    /// Clear the last error and raise the loading flag until the returned
    /// guard drops, including when the request future is cancelled.
    fn begin(&mut self) -> LoadingGuard<'_> {
        self.error = None;
        self.loading = true;
        LoadingGuard(&mut self.loading)
    }

    /// Record a failure message, if any.
    fn settle<V>(
        &mut self,
        operation: &'static str,
        result: Result<V, ClientError>,
    ) -> Result<V, ClientError> {
        if let Err(e) = &result {
            tracing::warn!(entity = R::ENTITY, operation, error = %e, "Store operation failed");
            self.error = Some(e.to_string());
        }
        result
    }

    fn upsert(&mut self, item: R) {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }
}

/// Clears the loading flag on drop.
struct LoadingGuard<'a>(&'a mut bool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

fn decode_list<R: Resource>(value: Value) -> Result<Vec<R>, ClientError> {
    match value {
        Value::Null => Ok(Vec::new()),
        other => Ok(serde_json::from_value(other)?),
    }
}

fn decode_item<R: Resource>(value: Value, id: DbId) -> Result<R, ClientError> {
    if value.is_null() {
        return Err(CoreError::NotFound {
            entity: R::ENTITY,
            id: id.to_string(),
        }
        .into());
    }
    Ok(serde_json::from_value(value)?)
}
