//! Member Store - REST backend

use async_trait::async_trait;

use crate::domain::{DomainResult, Member};
use crate::store::traits::MemberDirectory;

use super::client::ApiClient;

pub struct HttpMemberStore {
    client: ApiClient,
}

impl HttpMemberStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MemberDirectory for HttpMemberStore {
    async fn current(&self) -> DomainResult<Member> {
        Ok(self.client.get_json("/members/me").await?)
    }

    async fn list(&self) -> DomainResult<Vec<Member>> {
        Ok(self.client.get_json("/members").await?)
    }
}
