//! HTTP client for the attendance backend
//!
//! Attaches the bearer token of the current [`Session`], maps status codes
//! onto [`ClientError`], and expires the session on 401.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::response::ApiErrorBody;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Query parameters as `(name, value)` pairs
pub type Query = [(&'static str, String)];

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &Query) -> ClientResult<T>;
    async fn get_bytes(&self, path: &str, query: &Query) -> ClientResult<Vec<u8>>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    fn session(&self) -> Option<&Session>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    config: ClientConfig,
    session: Option<Arc<Session>>,
}

impl NetworkHttpClient {
    /// Create a client without a session (login only)
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
            session: None,
        })
    }

    /// Same connection pool, bound to a session
    pub fn with_session(&self, session: Arc<Session>) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
            session: Some(session),
        }
    }

    /// Same connection pool, no session
    pub fn anonymous(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
            session: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn authorize(&self, req: RequestBuilder) -> ClientResult<RequestBuilder> {
        match &self.session {
            Some(session) if session.is_expired() => Err(ClientError::SessionExpired),
            Some(session) => Ok(req.bearer_auth(session.token())),
            None => Ok(req),
        }
    }

    async fn send(&self, req: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = self
            .authorize(req)?
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.map_err(ClientError::from_transport)?;
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.text().map(str::to_string))
            .unwrap_or_else(|| if text.trim().is_empty() { default_message(status) } else { text });

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                if let Some(session) = &self.session {
                    tracing::warn!("Backend rejected the session token, expiring session");
                    session.expire();
                }
                ClientError::Unauthorized(message)
            }
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = self.send(req).await?;
        let bytes = response.bytes().await.map_err(ClientError::from_transport)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("unexpected response body: {e}")))
    }
}

fn default_message(status: StatusCode) -> String {
    if status.is_server_error() {
        "Error del servidor".to_string()
    } else {
        status
            .canonical_reason()
            .unwrap_or("Error desconocido")
            .to_string()
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        self.send_json(self.client.get(self.config.url(path))).await
    }

    async fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &Query) -> ClientResult<T> {
        tracing::debug!(path, ?query, "GET");
        self.send_json(self.client.get(self.config.url(path)).query(query))
            .await
    }

    async fn get_bytes(&self, path: &str, query: &Query) -> ClientResult<Vec<u8>> {
        tracing::debug!(path, ?query, "GET (binary)");
        let response = self
            .send(self.client.get(self.config.url(path)).query(query))
            .await?;
        let bytes = response.bytes().await.map_err(ClientError::from_transport)?;
        Ok(bytes.to_vec())
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        self.send_json(self.client.post(self.config.url(path)).json(body))
            .await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<T> {
        tracing::debug!(path, "PATCH");
        self.send_json(self.client.patch(self.config.url(path)).json(body))
            .await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "DELETE");
        self.send_json(self.client.delete(self.config.url(path))).await
    }

    fn session(&self) -> Option<&Session> {
        self.session.as_deref()
    }
}
