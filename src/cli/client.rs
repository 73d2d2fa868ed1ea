use std::time::Duration;

use anyhow::anyhow;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use super::config::CliConfig;

/// Thin wrapper over the HTTP API that unwraps the `{success, data}` envelope.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &CliConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            token: config.token().map(str::to_string),
        })
    }

    /// Fails early for admin commands when there is no live session.
    pub fn require_session(&self) -> anyhow::Result<()> {
        if self.token.is_none() {
            return Err(anyhow!("Not logged in (or session expired). Run `atelier auth login <username>`"));
        }
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<Value> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> anyhow::Result<Value> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B, revision: Option<i64>) -> anyhow::Result<Value> {
        let mut builder = self.request(Method::PUT, path).json(body);
        if let Some(revision) = revision {
            builder = builder.header(reqwest::header::IF_MATCH, format!("\"{}\"", revision));
        }
        self.send(builder).await
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<Value> {
        self.send(self.request(Method::DELETE, path)).await
    }

    async fn send(&self, builder: RequestBuilder) -> anyhow::Result<Value> {
        let response = builder
            .send()
            .await
            .map_err(|e| anyhow!("cannot reach {}: {}", self.base_url, e))?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if status.is_success() && body["success"] == Value::Bool(true) {
            return Ok(body["data"].clone());
        }

        let message = body["message"].as_str().unwrap_or("request failed");
        match body["code"].as_str() {
            Some(code) => Err(anyhow!("{} ({}, HTTP {})", message, code, status.as_u16())),
            None => Err(anyhow!("{} (HTTP {})", message, status.as_u16())),
        }
    }
}
