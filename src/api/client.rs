//! HTTP client with bearer token injection.
//!
//! Every request reads the current token from the injected [`TokenStore`] at
//! send time, so a login or logout is visible on the very next call. Failures
//! come back as [`ApiError`] values, never as panics.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::outcome::{ApiError, Outcome, TransportKind};
use super::request::RequestDescriptor;
use crate::session::TokenStore;

/// Connection settings fixed at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Total time allowed for one request, including the body.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client wrapper for KidsCare API communication.
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads credentials from.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Send a request and return the decoded JSON payload.
    ///
    /// A 2xx with an empty body yields `Value::Null`.
    pub async fn request(&self, descriptor: RequestDescriptor) -> Outcome<Value> {
        self.send(descriptor).await.map(|(_, value)| value)
    }

    /// Send a request and validate the payload against `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Outcome<T> {
        let (status, value) = self.send(descriptor).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Malformed {
            status,
            message: e.to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Outcome<T> {
        self.request_json(RequestDescriptor::get(path)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Outcome<T> {
        self.request_json(RequestDescriptor::delete(path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Outcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let descriptor = with_body(RequestDescriptor::post(path), body)?;
        self.request_json(descriptor).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Outcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let descriptor = with_body(RequestDescriptor::patch(path), body)?;
        self.request_json(descriptor).await
    }

    /// Read the token for this request only. A store fault degrades to an
    /// unauthenticated request.
    fn current_token(&self) -> Option<String> {
        match self.tokens.load() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("Token read failed, sending request without credentials: {}", e);
                None
            }
        }
    }

    async fn send(&self, descriptor: RequestDescriptor) -> Outcome<(u16, Value)> {
        let (method, path, body) = descriptor.into_parts();
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self
            .client
            .request(method.into(), &url)
            .header(ACCEPT, "application/json");

        let token = self.current_token();
        if let Some(ref t) = token {
            builder = builder.bearer_auth(t);
        }
        if let Some(ref b) = body {
            builder = builder.json(b);
        }

        log::debug!(
            "{} {} (authenticated: {})",
            method.as_str(),
            path,
            token.is_some()
        );

        let resp = builder.send().await.map_err(|e| {
            let err = ApiError::from_reqwest(&e);
            log::warn!("{} {} failed: {}", method.as_str(), path, err);
            err
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), &text);
            log::warn!("{} {} returned {}", method.as_str(), path, status);
            return Err(err);
        }

        let text = resp.text().await.map_err(|e| ApiError::from_reqwest(&e))?;
        let value = decode_body(status.as_u16(), &text)?;
        Ok((status.as_u16(), value))
    }
}

pub(crate) fn with_body<B: Serialize + ?Sized>(
    descriptor: RequestDescriptor,
    body: &B,
) -> Outcome<RequestDescriptor> {
    descriptor.json(body).map_err(|e| ApiError::Transport {
        kind: TransportKind::Request,
        message: format!("Failed to encode request body: {}", e),
    })
}

fn decode_body(status: u16, text: &str) -> Outcome<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Malformed {
        status,
        message: format!("Response is not valid JSON: {}", e),
    })
}
