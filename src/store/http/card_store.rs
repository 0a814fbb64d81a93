//! Card Store - REST backend

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Card, DomainResult};
use crate::store::traits::{CardOperations, Repository};

use super::client::ApiClient;
use super::error::ApiError;

pub struct HttpCardStore {
    client: ApiClient,
}

#[derive(Serialize)]
struct CreateCardBody<'a> {
    title: &'a str,
    #[serde(rename = "listId")]
    list_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    due_date: Option<i64>,
}

#[derive(Serialize)]
struct UpdateCardBody<'a> {
    title: &'a str,
    description: Option<&'a str>,
    position: i32,
    #[serde(rename = "dueDate")]
    due_date: Option<i64>,
}

#[derive(Serialize)]
struct MoveCardBody {
    #[serde(rename = "listId")]
    list_id: u32,
}

impl HttpCardStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Repository<Card> for HttpCardStore {
    async fn create(&self, entity: &Card) -> DomainResult<Card> {
        let body = CreateCardBody {
            title: &entity.title,
            list_id: entity.list_id,
            description: entity.description.as_deref(),
            due_date: entity.due_date,
        };
        Ok(self.client.post_json("/cards", &body).await?)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Card>> {
        match self.client.get_json::<Card>(&format!("/cards/{}", id)).await {
            Ok(card) => Ok(Some(card)),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Card>> {
        Ok(self.client.get_json("/cards").await?)
    }

    async fn update(&self, entity: &Card) -> DomainResult<Card> {
        let body = UpdateCardBody {
            title: &entity.title,
            description: entity.description.as_deref(),
            position: entity.position,
            due_date: entity.due_date,
        };
        Ok(self
            .client
            .put_json(&format!("/cards/{}", entity.id), &body)
            .await?)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        Ok(self.client.delete(&format!("/cards/{}", id)).await?)
    }
}

#[async_trait]
impl CardOperations for HttpCardStore {
    async fn list_by_list(&self, list_id: u32) -> DomainResult<Vec<Card>> {
        Ok(self
            .client
            .get_json(&format!("/lists/{}/cards", list_id))
            .await?)
    }

    async fn move_to_list(&self, card_id: u32, list_id: u32) -> DomainResult<Card> {
        let body = MoveCardBody { list_id };
        Ok(self
            .client
            .put_json(&format!("/cards/{}/move", card_id), &body)
            .await?)
    }
}
