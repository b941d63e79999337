mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{status_and_body, TestApp};

#[tokio::test]
async fn valid_cookie_reaches_its_own_tenant() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (status, body) = status_and_body(app.get("/depart/query", Some("user_cookie=normal_H00001_C001")).await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total"], 0);

    // Components after the branch id are ignored.
    let resp = app.get("/depart/query", Some("user_cookie=normal_H00001_C001_extra")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn every_denial_looks_the_same() -> Result<()> {
    let app = TestApp::spawn().await?;

    let cookies = [
        None,
        Some("user_cookie="),
        Some("user_cookie=normal_H00001"),
        Some("user_cookie=normal_H00001_C999"),
        Some("user_cookie=normal_H00001_c001"),
        Some("theme=dark"),
    ];

    let mut responses = Vec::new();
    for cookie in cookies {
        responses.push(status_and_body(app.get("/staff/query", cookie).await?).await?);
    }

    for (status, body) in &responses {
        assert_eq!(*status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, &json!({"error": true, "message": "Unauthorized", "code": "UNAUTHORIZED"}));
    }
    Ok(())
}

#[tokio::test]
async fn writes_stay_in_the_resolved_tenant() -> Result<()> {
    let app = TestApp::spawn().await?;
    let c001 = "user_cookie=sys_H00001_C001";
    let c002 = "user_cookie=sys_H00001_C002";

    let resp = app.post("/depart/create", Some(c001), json!({"dep_name": "Finance"})).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let (_, one) = status_and_body(app.get("/depart/query", Some(c001)).await?).await?;
    let (_, two) = status_and_body(app.get("/depart/query", Some(c002)).await?).await?;
    assert_eq!(one["data"]["total"], 1);
    assert_eq!(two["data"]["total"], 0);
    Ok(())
}

#[tokio::test]
async fn interleaved_requests_never_cross_tenants() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.post("/rank/create", Some("user_cookie=sys_H1_C001"), json!({"rank_name": "only-in-C001"}))
        .await?;

    let mut tasks = Vec::new();
    for i in 0..40 {
        let branch = if i % 2 == 0 { "C001" } else { "C002" };
        let cookie = format!("user_cookie=normal_H{}_{}", i, branch);
        let client = app.client.clone();
        let url = app.url("/rank/query");
        tasks.push(tokio::spawn(async move {
            let body: serde_json::Value = client
                .get(url)
                .header(reqwest::header::COOKIE, cookie)
                .send()
                .await?
                .json()
                .await?;
            anyhow::Ok((branch, body["data"]["total"].as_i64()))
        }));
    }

    for result in futures::future::join_all(tasks).await {
        let (branch, total) = result??;
        let expected = if branch == "C001" { 1 } else { 0 };
        assert_eq!(total, Some(expected), "branch {}", branch);
    }
    Ok(())
}

#[tokio::test]
async fn public_routes_work_without_identity() -> Result<()> {
    let app = TestApp::spawn().await?;

    for path in ["/", "/ping", "/health", "/company/query"] {
        assert_eq!(app.get(path, None).await?.status(), StatusCode::OK, "{}", path);
    }
    Ok(())
}
