//! Generic CRUD over a [`Resource`] collection.

use std::marker::PhantomData;

use serde::Serialize;

use infradesk_entity::Resource;

use crate::client::ApiClient;
use crate::outcome::ApiOutcome;

/// Typed view of one REST collection, e.g. `/servers/`.
#[derive(Debug)]
pub struct ResourceApi<'a, R: Resource> {
    client: &'a ApiClient,
    token: Option<&'a str>,
    _kind: PhantomData<R>,
}

impl<'a, R: Resource> ResourceApi<'a, R> {
    pub fn new(client: &'a ApiClient, token: Option<&'a str>) -> Self {
        Self {
            client,
            token,
            _kind: PhantomData,
        }
    }

    /// `/{collection}/`
    pub fn collection_path() -> String {
        format!("/{}/", R::COLLECTION)
    }

    /// `/{collection}/{id}/`
    pub fn item_path(id: R::Id) -> String {
        format!("/{}/{}/", R::COLLECTION, id)
    }

    /// List the whole collection.
    pub async fn list(&self) -> ApiOutcome<Vec<R>> {
        self.list_at(&Self::collection_path()).await
    }

    /// List from an alternative path returning the same shape, such as
    /// `/maintenance/by-datacenter/{dc}/`.
    pub async fn list_at(&self, path: &str) -> ApiOutcome<Vec<R>> {
        self.client.get(path, self.token).await
    }

    pub async fn get(&self, id: R::Id) -> ApiOutcome<R> {
        self.client.get(&Self::item_path(id), self.token).await
    }

    /// `POST` a full draft.
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> ApiOutcome<R> {
        self.client
            .post(&Self::collection_path(), self.token, body)
            .await
    }

    /// `PATCH` the given fields only.
    pub async fn update<B: Serialize + ?Sized>(&self, id: R::Id, patch: &B) -> ApiOutcome<R> {
        self.client
            .patch(&Self::item_path(id), self.token, patch)
            .await
    }

    pub async fn delete(&self, id: R::Id) -> ApiOutcome<()> {
        self.client.delete(&Self::item_path(id), self.token).await
    }
}

impl ApiClient {
    /// Typed CRUD handle for `R`, authorised with `token`.
    pub fn resource<'a, R: Resource>(&'a self, token: Option<&'a str>) -> ResourceApi<'a, R> {
        ResourceApi::new(self, token)
    }
}
