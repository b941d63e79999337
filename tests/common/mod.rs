#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{header, Response, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;

use hrms::config::{AppConfig, Environment};
use hrms::database::{schema, TenantRegistry};
use hrms::server;
use hrms::services::{account, sms::LogSmsSender};
use hrms::state::AppState;

pub const ROOT_PASSWORD: &str = "root-secret";

/// A live server on a free port, backed by migrated SQLite tenants in a private directory.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub registry: Arc<TenantRegistry>,
    _dir: TempDir,
}

/// Test config whose tenants live under `dir`.
pub fn test_config(dir: &std::path::Path, names: &[&str]) -> AppConfig {
    let mut config = AppConfig::defaults(Environment::Test);
    config.database.path = dir.to_path_buf();
    config.database.names = names.iter().map(|s| s.to_string()).collect();
    config
}

impl TestApp {
    /// Tenants `hrms_C001` and `hrms_C002`, each with a `root` credential.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(&["hrms_C001", "hrms_C002"]).await
    }

    pub async fn spawn_with(names: &[&str]) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = test_config(dir.path(), names);

        let registry = Arc::new(TenantRegistry::initialize(&config.database.names, &config.database).await?);
        for name in registry.names() {
            let db = registry.lookup(name).context("tenant vanished")?;
            schema::migrate(db).await?;
            account::seed_root(db, ROOT_PASSWORD).await?;
        }

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        let state = AppState::new(config, registry.clone(), Arc::new(LogSmsSender));
        tokio::spawn(async move {
            let _ = axum::serve(listener, server::router(state)).await;
        });

        let app = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            registry,
            _dir: dir,
        };
        app.wait_ready(Duration::from_secs(10)).await?;
        Ok(app)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/ping")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET with an optional raw `Cookie` header value.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Result<Response> {
        let mut req = self.client.get(self.url(path));
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        Ok(req.send().await?)
    }

    pub async fn post(&self, path: &str, cookie: Option<&str>, body: Value) -> Result<Response> {
        let mut req = self.client.post(self.url(path)).json(&body);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        Ok(req.send().await?)
    }

    pub async fn delete(&self, path: &str, cookie: Option<&str>) -> Result<Response> {
        let mut req = self.client.delete(self.url(path));
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        Ok(req.send().await?)
    }

    /// Log in and return the `user_cookie=...` pair to send back.
    pub async fn login(&self, branch_id: &str, staff_id: &str, password: &str) -> Result<String> {
        let resp = self
            .post(
                "/account/login",
                None,
                json!({ "branch_id": branch_id, "staff_id": staff_id, "password": password }),
            )
            .await?;
        anyhow::ensure!(resp.status() == StatusCode::OK, "login failed: {}", resp.status());
        set_cookie_pair(&resp).context("login response carried no user_cookie")
    }

    pub async fn login_root(&self, branch_id: &str) -> Result<String> {
        self.login(branch_id, "root", ROOT_PASSWORD).await
    }
}

/// `name=value` of the identity cookie from a `Set-Cookie` header.
pub fn set_cookie_pair(resp: &Response) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("user_cookie="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn json_body(resp: Response) -> Result<Value> {
    Ok(resp.json::<Value>().await?)
}

/// Status and parsed body together.
pub async fn status_and_body(resp: Response) -> Result<(StatusCode, Value)> {
    let status = resp.status();
    Ok((status, resp.json::<Value>().await?))
}
