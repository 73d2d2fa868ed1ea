#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "test-password";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // In-memory store and fixed credentials keep every run independent of the environment
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_atelier-api"));
        cmd.env("APP_ENV", "development")
            .env("PAGE_STORE", "memory")
            .env("ATELIER_API_PORT", port.to_string())
            .env("JWT_SECRET", "integration-test-secret")
            .env("ADMIN_USERNAME", ADMIN_USERNAME)
            .env("ADMIN_PASSWORD_SHA256", atelier_api::config::sha256_hex(ADMIN_PASSWORD))
            .env("EDITOR_REORDER_UNKNOWN_IDS", "drop")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Logs in as the test admin and returns the bearer token.
pub async fn admin_token(server: &TestServer) -> Result<String> {
    let res = reqwest::Client::new()
        .post(server.url("/admin/login"))
        .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body: Value = res.json().await?;
    body["data"]["token"]
        .as_str()
        .map(str::to_string)
        .context("login response without token")
}

/// Slugs are shared across tests hitting the same server; keep them distinct.
pub fn unique_slug(prefix: &str) -> String {
    format!("{}-{}", prefix, &uuid::Uuid::new_v4().simple().to_string()[..8])
}

/// Creates a page and returns its `data` payload.
pub async fn create_page(server: &TestServer, token: &str, body: Value) -> Result<Value> {
    let res = reqwest::Client::new()
        .post(server.url("/admin/pages"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    let status = res.status();
    let body: Value = res.json().await?;
    anyhow::ensure!(status == StatusCode::CREATED, "create failed ({}): {}", status, body);
    Ok(body["data"].clone())
}
