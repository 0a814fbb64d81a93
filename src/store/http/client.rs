//! REST API Client
//!
//! Thin wrapper around `reqwest::Client` shared by all HTTP stores.
//! Owns the base URL and the optional bearer token; every request goes
//! through the same status check so failures classify uniformly.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;

use super::error::ApiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body shape the backend uses for failures
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Shared HTTP client for the REST backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let client = Self::new(config.base_url.clone());
        match &config.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = self.authorize(req).send().await.map_err(ApiError::from)?;
        check_status(resp).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send(self.client.get(self.url(path))).await?;
        resp.json::<T>().await.map_err(ApiError::from)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let resp = self
            .send(self.client.post(self.url(path)).json(body))
            .await?;
        resp.json::<T>().await.map_err(ApiError::from)
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let resp = self
            .send(self.client.put(self.url(path)).json(body))
            .await?;
        resp.json::<T>().await.map_err(ApiError::from)
    }

    pub(crate) async fn put_no_content<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(self.client.put(self.url(path)).json(body))
            .await?;
        Ok(())
    }

    pub(crate) async fn post_no_content(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.client.post(self.url(path))).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }
}

async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.json::<ErrorBody>().await.ok().map(|body| body.error);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
