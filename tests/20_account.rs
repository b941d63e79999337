mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};
use serde_json::json;

use common::{set_cookie_pair, status_and_body, TestApp, ROOT_PASSWORD};

#[tokio::test]
async fn login_sets_identity_cookie() -> Result<()> {
    let app = TestApp::spawn().await?;

    let resp = app
        .post(
            "/account/login",
            None,
            json!({"branch_id": "C002", "staff_id": "root", "password": ROOT_PASSWORD}),
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let raw = resp.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("Path=/"));
    assert_eq!(set_cookie_pair(&resp).as_deref(), Some("user_cookie=supersys_root_C002"));

    let body = resp.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["user_type_name"], "Super administrator");
    Ok(())
}

#[tokio::test]
async fn failed_logins_are_indistinguishable() -> Result<()> {
    let app = TestApp::spawn().await?;

    let attempts = [
        json!({"branch_id": "C001", "staff_id": "root", "password": "wrong"}),
        json!({"branch_id": "C999", "staff_id": "root", "password": ROOT_PASSWORD}),
        json!({"branch_id": "C001", "staff_id": "H99999", "password": ROOT_PASSWORD}),
        json!({"branch_id": "C_01", "staff_id": "root", "password": ROOT_PASSWORD}),
    ];

    let mut bodies = Vec::new();
    for attempt in attempts {
        let resp = app.post("/account/login", None, attempt).await?;
        assert!(set_cookie_pair(&resp).is_none());
        bodies.push(status_and_body(resp).await?);
    }
    for entry in &bodies {
        assert_eq!(entry.0, StatusCode::UNAUTHORIZED);
        assert_eq!(entry, &bodies[0]);
    }
    Ok(())
}

#[tokio::test]
async fn issued_cookie_opens_protected_routes() -> Result<()> {
    let app = TestApp::spawn().await?;
    let cookie = app.login_root("C001").await?;

    let resp = app.get("/staff/query_by_staff_id/root", Some(&cookie)).await?;
    let (status, body) = status_and_body(resp).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 0);
    Ok(())
}

#[tokio::test]
async fn quit_expires_the_cookie() -> Result<()> {
    let app = TestApp::spawn().await?;

    let resp = app.post("/account/quit", None, json!({})).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let raw = resp.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(raw.starts_with("user_cookie=;"));
    assert!(raw.contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_client_error() -> Result<()> {
    let app = TestApp::spawn().await?;

    let resp = app.post("/account/login", None, json!({"branch_id": "C001"})).await?;
    let (status, body) = status_and_body(resp).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}
