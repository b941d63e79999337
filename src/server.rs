//! Router assembly and the serve loop.
//!
//! Public routes need no identity. Every feature route is grouped per resource and placed
//! behind [`require_tenant`], which resolves the branch database before the handler runs.

use std::time::Duration;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::handlers::{protected, public};
use crate::middleware::require_tenant;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .nest("/depart", depart_routes())
        .nest("/rank", rank_routes())
        .nest("/staff", staff_routes())
        .nest("/password", password_routes())
        .nest("/authority", authority_routes())
        .nest("/notification", notification_routes())
        .nest("/salary", salary_routes())
        .nest("/salary_record", salary_record_routes())
        .nest("/attendance_record", attendance_routes())
        .nest("/recruitment", recruitment_routes())
        .nest("/candidate", candidate_routes())
        .route_layer(from_fn_with_state(state.clone(), require_tenant));

    Router::new()
        // Public
        .route("/", get(public::root::index))
        .route("/ping", get(public::root::ping))
        .route("/health", get(public::root::health))
        .route("/account/login", post(public::account::login))
        .route("/account/quit", post(public::account::quit))
        .route("/company/query", get(public::company::query))
        // Tenant-scoped
        .merge(protected_routes)
        // Global middleware
        .layer(TimeoutLayer::new(Duration::from_secs(state.config.api.request_timeout_secs)))
        .layer(cors_layer(&state.config.api.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<_> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // Cookie auth needs credentials, which rules out wildcard headers and methods.
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

fn depart_routes() -> Router<AppState> {
    use protected::department;

    Router::new()
        .route("/create", post(department::create))
        .route("/del/:dep_id", delete(department::delete))
        .route("/edit", post(department::edit))
        .route("/query", get(department::query))
        .route("/query/:dep_id", get(department::query))
}

fn rank_routes() -> Router<AppState> {
    use protected::rank;

    Router::new()
        .route("/create", post(rank::create))
        .route("/del/:rank_id", delete(rank::delete))
        .route("/edit", post(rank::edit))
        .route("/query", get(rank::query))
        .route("/query/:rank_id", get(rank::query))
}

fn staff_routes() -> Router<AppState> {
    use protected::staff;

    Router::new()
        .route("/create", post(staff::create))
        .route("/del/:staff_id", delete(staff::delete))
        .route("/edit", post(staff::edit))
        .route("/query", get(staff::query))
        .route("/query/:staff_id", get(staff::query))
        .route("/query_by_name/:staff_name", get(staff::query_by_name))
        .route("/query_by_dep/:dep_name", get(staff::query_by_dep))
        .route("/query_by_staff_id/:staff_id", get(staff::query_by_staff_id))
}

fn password_routes() -> Router<AppState> {
    use protected::password;

    Router::new()
        .route("/query/:staff_id", get(password::query))
        .route("/edit", post(password::edit))
}

fn authority_routes() -> Router<AppState> {
    use protected::authority;

    Router::new()
        .route("/create", post(authority::create))
        .route("/edit", post(authority::edit))
        .route("/query_by_user_type/:user_type", get(authority::query_by_user_type))
        .route("/query_by_user_type_and_model", post(authority::query_by_user_type_and_model))
        .route("/set_admin/:staff_id", post(authority::set_admin))
        .route("/set_normal/:staff_id", post(authority::set_normal))
}

fn notification_routes() -> Router<AppState> {
    use protected::notification;

    Router::new()
        .route("/create", post(notification::create))
        .route("/delete/:notice_id", delete(notification::delete))
        .route("/edit", post(notification::edit))
        .route("/query", get(notification::query))
        .route("/query/:notice_title", get(notification::query))
}

fn salary_routes() -> Router<AppState> {
    use protected::salary;

    Router::new()
        .route("/create", post(salary::create))
        .route("/delete/:salary_id", delete(salary::delete))
        .route("/edit", post(salary::edit))
        .route("/query", get(salary::query))
        .route("/query/:staff_id", get(salary::query))
}

fn salary_record_routes() -> Router<AppState> {
    use protected::salary_record;

    Router::new()
        .route("/query/:staff_id", get(salary_record::query))
        .route("/query_history/:staff_id", get(salary_record::query_history))
        .route("/get_salary_record_is_pay_by_id/:id", get(salary_record::is_pay))
        .route("/pay_salary_record_by_id/:id", get(salary_record::pay))
}

fn attendance_routes() -> Router<AppState> {
    use protected::attendance;

    Router::new()
        .route("/create", post(attendance::create))
        .route("/delete/:attendance_id", delete(attendance::delete))
        .route("/edit", post(attendance::edit))
        .route("/query", get(attendance::query))
        .route("/query/:staff_id", get(attendance::query))
        .route("/query_history/:staff_id", get(attendance::query_history))
        .route("/get_attend_record_is_pay/:staff_id/:date", get(attendance::is_pay))
        .route("/approve/query/:leader_staff_id", get(attendance::approval_queue))
        .route("/approve_accept/:attend_id", get(attendance::approve_accept))
        .route("/approve_reject/:attend_id", get(attendance::approve_reject))
}

fn recruitment_routes() -> Router<AppState> {
    use protected::recruitment;

    Router::new()
        .route("/create", post(recruitment::create))
        .route("/delete/:recruitment_id", delete(recruitment::delete))
        .route("/edit", post(recruitment::edit))
        .route("/query", get(recruitment::query))
        .route("/query/:job_name", get(recruitment::query))
}

fn candidate_routes() -> Router<AppState> {
    use protected::candidate;

    Router::new()
        .route("/create", post(candidate::create))
        .route("/delete/:candidate_id", delete(candidate::delete))
        .route("/edit", post(candidate::edit))
        .route("/query_by_name/:name", get(candidate::query_by_name))
        .route("/query_by_staff_id/:staff_id", get(candidate::query_by_staff_id))
        .route("/reject/:id", get(candidate::reject))
        .route("/accept/:id", get(candidate::accept))
}

/// Serve until ctrl-c or SIGTERM, then close every tenant pool.
pub async fn serve(state: AppState, listener: TcpListener) -> std::io::Result<()> {
    let resolver = state.resolver.clone();
    let app = router(state);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Shutting down, closing tenant pools");
    resolver.registry().close_all().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::services::sms::LogSmsSender;
    use crate::testing::TestContext;

    async fn app(ctx: &TestContext) -> Router {
        let state = AppState::new(ctx.app_config(), ctx.registry.clone(), Arc::new(LogSmsSender));
        router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn protected_routes_deny_identically() {
        let ctx = TestContext::new().await.unwrap();
        let app = app(&ctx).await;

        let mut bodies = Vec::new();
        for cookie in [None, Some("user_cookie=garbage"), Some("user_cookie=normal_H1_C999")] {
            let response = app.clone().oneshot(get_with_cookie("/depart/query", cookie)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(body_json(response).await);
        }
        assert!(bodies.iter().all(|b| b == &bodies[0]));
    }

    #[tokio::test]
    async fn resolved_tenant_reaches_handler() {
        let ctx = TestContext::new().await.unwrap();
        let app = app(&ctx).await;

        let response = app
            .oneshot(get_with_cookie("/depart/query", Some("user_cookie=normal_H1_C001")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["total"], 0);
    }

    #[tokio::test]
    async fn quoted_cookie_value_resolves() {
        let ctx = TestContext::new().await.unwrap();
        let response = app(&ctx)
            .await
            .oneshot(get_with_cookie("/depart/query", Some("user_cookie=\"normal_H1_C001\"")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn paging_is_bounded() {
        let ctx = TestContext::new().await.unwrap();
        let app = app(&ctx).await;
        let cookie = Some("user_cookie=normal_H1_C001");

        let response = app
            .clone()
            .oneshot(get_with_cookie("/depart/query?page=9223372036854775807&limit=2", cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

        let response = app
            .oneshot(get_with_cookie("/depart/query?page=2&limit=9223372036854775807", cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn public_routes_need_no_cookie() {
        let ctx = TestContext::new().await.unwrap();
        let app = app(&ctx).await;

        for uri in ["/", "/ping", "/health", "/company/query"] {
            let response = app.clone().oneshot(get_with_cookie(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn health_does_not_list_tenant_names() {
        let ctx = TestContext::new().await.unwrap();
        let response = app(&ctx).await.oneshot(get_with_cookie("/health", None)).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(body["data"]["tenants"], 1);
        assert!(!body.to_string().contains("hrms_C001"));
    }
}
