//! Comment Store - REST backend

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Comment, DomainResult};
use crate::store::traits::{CommentOperations, Repository};

use super::client::ApiClient;
use super::error::ApiError;

pub struct HttpCommentStore {
    client: ApiClient,
}

#[derive(Serialize)]
struct CreateCommentBody<'a> {
    #[serde(rename = "cardId")]
    card_id: u32,
    text: &'a str,
}

#[derive(Serialize)]
struct UpdateCommentBody<'a> {
    text: &'a str,
}

impl HttpCommentStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Repository<Comment> for HttpCommentStore {
    async fn create(&self, entity: &Comment) -> DomainResult<Comment> {
        let body = CreateCommentBody {
            card_id: entity.card_id,
            text: &entity.text,
        };
        Ok(self.client.post_json("/comments", &body).await?)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Comment>> {
        match self
            .client
            .get_json::<Comment>(&format!("/comments/{}", id))
            .await
        {
            Ok(comment) => Ok(Some(comment)),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Comment>> {
        Ok(self.client.get_json("/comments").await?)
    }

    async fn update(&self, entity: &Comment) -> DomainResult<Comment> {
        let body = UpdateCommentBody { text: &entity.text };
        Ok(self
            .client
            .put_json(&format!("/comments/{}", entity.id), &body)
            .await?)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        Ok(self.client.delete(&format!("/comments/{}", id)).await?)
    }
}

#[async_trait]
impl CommentOperations for HttpCommentStore {
    async fn list_by_card(&self, card_id: u32) -> DomainResult<Vec<Comment>> {
        Ok(self
            .client
            .get_json(&format!("/cards/{}/comments", card_id))
            .await?)
    }
}
