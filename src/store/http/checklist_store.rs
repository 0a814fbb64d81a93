//! Checklist Store - REST backend
//!
//! Checklist CRUD plus item management endpoints.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Checklist, ChecklistItem, DomainResult};
use crate::store::traits::{ChecklistOperations, Repository};

use super::client::ApiClient;
use super::error::ApiError;

pub struct HttpChecklistStore {
    client: ApiClient,
}

#[derive(Serialize)]
struct CreateChecklistBody<'a> {
    #[serde(rename = "cardId")]
    card_id: u32,
    title: &'a str,
}

#[derive(Serialize)]
struct UpdateChecklistBody<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct AddItemBody<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct UpdateItemBody<'a> {
    title: &'a str,
    done: bool,
    position: i32,
}

impl HttpChecklistStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Repository<Checklist> for HttpChecklistStore {
    async fn create(&self, entity: &Checklist) -> DomainResult<Checklist> {
        let body = CreateChecklistBody {
            card_id: entity.card_id,
            title: &entity.title,
        };
        Ok(self.client.post_json("/checklists", &body).await?)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Checklist>> {
        match self
            .client
            .get_json::<Checklist>(&format!("/checklists/{}", id))
            .await
        {
            Ok(checklist) => Ok(Some(checklist)),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Checklist>> {
        Ok(self.client.get_json("/checklists").await?)
    }

    async fn update(&self, entity: &Checklist) -> DomainResult<Checklist> {
        let body = UpdateChecklistBody {
            title: &entity.title,
        };
        Ok(self
            .client
            .put_json(&format!("/checklists/{}", entity.id), &body)
            .await?)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        Ok(self.client.delete(&format!("/checklists/{}", id)).await?)
    }
}

#[async_trait]
impl ChecklistOperations for HttpChecklistStore {
    async fn list_by_card(&self, card_id: u32) -> DomainResult<Vec<Checklist>> {
        Ok(self
            .client
            .get_json(&format!("/cards/{}/checklists", card_id))
            .await?)
    }

    async fn add_item(&self, checklist_id: u32, title: &str) -> DomainResult<ChecklistItem> {
        let body = AddItemBody { title };
        Ok(self
            .client
            .post_json(&format!("/checklists/{}/items", checklist_id), &body)
            .await?)
    }

    async fn update_item(
        &self,
        checklist_id: u32,
        item: &ChecklistItem,
    ) -> DomainResult<ChecklistItem> {
        let body = UpdateItemBody {
            title: &item.title,
            done: item.done,
            position: item.position,
        };
        Ok(self
            .client
            .put_json(
                &format!("/checklists/{}/items/{}", checklist_id, item.id),
                &body,
            )
            .await?)
    }

    async fn remove_item(&self, checklist_id: u32, item_id: u32) -> DomainResult<()> {
        Ok(self
            .client
            .delete(&format!("/checklists/{}/items/{}", checklist_id, item_id))
            .await?)
    }
}
