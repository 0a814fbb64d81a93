//! Label Store - REST backend
//!
//! Label CRUD plus card attachment endpoints.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{DomainResult, Label};
use crate::store::traits::{LabelOperations, Repository};

use super::client::ApiClient;
use super::error::ApiError;

pub struct HttpLabelStore {
    client: ApiClient,
}

#[derive(Serialize)]
struct LabelBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
}

impl HttpLabelStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Repository<Label> for HttpLabelStore {
    async fn create(&self, entity: &Label) -> DomainResult<Label> {
        let body = LabelBody {
            name: &entity.name,
            color: entity.color.as_deref(),
        };
        Ok(self.client.post_json("/labels", &body).await?)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Label>> {
        match self
            .client
            .get_json::<Label>(&format!("/labels/{}", id))
            .await
        {
            Ok(label) => Ok(Some(label)),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Label>> {
        Ok(self.client.get_json("/labels").await?)
    }

    async fn update(&self, entity: &Label) -> DomainResult<Label> {
        let body = LabelBody {
            name: &entity.name,
            color: entity.color.as_deref(),
        };
        Ok(self
            .client
            .put_json(&format!("/labels/{}", entity.id), &body)
            .await?)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        Ok(self.client.delete(&format!("/labels/{}", id)).await?)
    }
}

#[async_trait]
impl LabelOperations for HttpLabelStore {
    async fn attach(&self, card_id: u32, label_id: u32) -> DomainResult<()> {
        Ok(self
            .client
            .post_no_content(&format!("/cards/{}/labels/{}", card_id, label_id))
            .await?)
    }

    async fn detach(&self, card_id: u32, label_id: u32) -> DomainResult<()> {
        Ok(self
            .client
            .delete(&format!("/cards/{}/labels/{}", card_id, label_id))
            .await?)
    }
}
