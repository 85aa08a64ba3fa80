use std::marker::PhantomData;

use crate::error::ApiError;
use crate::resource::Resource;
use crate::transport::{fetch_empty, fetch_json, HttpRequest, Transport};

/// Authenticated CRUD against the collection of one resource.
pub struct CollectionClient<R: Resource> {
    path: &'static str,
    _resource: PhantomData<R>,
}

impl<R: Resource> Default for CollectionClient<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> CollectionClient<R> {
    pub fn new() -> Self {
        Self { path: R::profile().collection, _resource: PhantomData }
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }

    pub async fn list<T: Transport + ?Sized>(&self, transport: &T, token: Option<&str>) -> Result<Vec<R::Item>, ApiError> {
        let list: R::List = fetch_json(transport, HttpRequest::get(self.path).bearer(token)).await?;
        Ok(list.into())
    }

    pub async fn create<T: Transport + ?Sized>(&self, transport: &T, token: Option<&str>, data: &R::Create) -> Result<R::Item, ApiError> {
        fetch_json(transport, HttpRequest::post(self.path, data)?.bearer(token)).await
    }

    /// Replaces the record; `data` must carry the full field set.
    pub async fn update<T: Transport + ?Sized>(
        &self,
        transport: &T,
        token: Option<&str>,
        id: &str,
        data: &R::Update,
    ) -> Result<R::Item, ApiError> {
        fetch_json(transport, HttpRequest::put(&self.item_path(id), data)?.bearer(token)).await
    }

    pub async fn remove<T: Transport + ?Sized>(&self, transport: &T, token: Option<&str>, id: &str) -> Result<(), ApiError> {
        fetch_empty(transport, HttpRequest::delete(&self.item_path(id)).bearer(token)).await
    }
}
