// handlers/public/account.rs - POST /account/login, POST /account/quit

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::database::models::UserType;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::services::account::{self, LoginRequest};
use crate::state::AppState;
use crate::tenant::COOKIE_NAME;

/// Verify the credential on the named branch and hand back the identity cookie.
///
/// Every failure, including an unknown branch, is the same 401 the tenant gate returns.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let token = account::login(state.registry(), &req).await?;

    let cookie = format!("{}={}; Path=/; HttpOnly", COOKIE_NAME, token);
    let body = ApiResponse::success(json!({
        "user_type": token.user_type,
        "user_type_name": UserType::display_name(&token.user_type),
        "staff_id": token.staff_id,
        "branch_id": token.branch_id,
    }));
    Ok(([(SET_COOKIE, cookie)], body))
}

/// Expire the identity cookie.
pub async fn quit() -> impl IntoResponse {
    let cookie = format!("{}=; Path=/; Max-Age=0; HttpOnly", COOKIE_NAME);
    ([(SET_COOKIE, cookie)], ApiResponse::ok())
}
