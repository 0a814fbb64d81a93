//! List Store - REST backend
//!
//! CRUD plus the reorder and cards-count endpoints.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainResult, List, ListOrdering};
use crate::store::traits::{ListOperations, Repository};

use super::client::ApiClient;
use super::error::ApiError;

pub struct HttpListStore {
    client: ApiClient,
}

#[derive(Serialize)]
struct ListBody<'a> {
    name: &'a str,
    order: u32,
}

#[derive(Serialize)]
struct ReorderBody<'a> {
    orders: &'a HashMap<u32, u32>,
}

#[derive(Deserialize)]
struct CountBody {
    count: u32,
}

impl HttpListStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Repository<List> for HttpListStore {
    async fn create(&self, entity: &List) -> DomainResult<List> {
        let body = ListBody {
            name: &entity.name,
            order: entity.order,
        };
        Ok(self.client.post_json("/lists", &body).await?)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<List>> {
        match self.client.get_json::<List>(&format!("/lists/{}", id)).await {
            Ok(list) => Ok(Some(list)),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self) -> DomainResult<Vec<List>> {
        Ok(self.client.get_json("/lists").await?)
    }

    async fn update(&self, entity: &List) -> DomainResult<List> {
        let body = ListBody {
            name: &entity.name,
            order: entity.order,
        };
        Ok(self
            .client
            .put_json(&format!("/lists/{}", entity.id), &body)
            .await?)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        Ok(self.client.delete(&format!("/lists/{}", id)).await?)
    }
}

#[async_trait]
impl ListOperations for HttpListStore {
    async fn reorder(&self, ordering: &ListOrdering) -> DomainResult<()> {
        let body = ReorderBody {
            orders: &ordering.orders,
        };
        Ok(self.client.put_no_content("/lists/reorder", &body).await?)
    }

    async fn card_count(&self, list_id: u32) -> DomainResult<u32> {
        let body: CountBody = self
            .client
            .get_json(&format!("/lists/{}/cards/count", list_id))
            .await?;
        Ok(body.count)
    }
}
