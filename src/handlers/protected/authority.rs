// handlers/protected/authority.rs - /authority/*

use axum::extract::{rejection::JsonRejection, Extension, Path};
use axum::Json;
use serde_json::{json, Value};

use super::{page_of, PageParams};
use crate::database::models::{
    AuthorityDetail, AuthorityDetailCreate, AuthorityDetailEdit, AuthorityDetailQuery, UserType,
};
use crate::database::Page;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::authority;
use crate::tenant::TenantSession;

pub async fn create(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<AuthorityDetailCreate>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    authority::create_detail(session.db(), dto).await?;
    Ok(ApiResponse::with_status((), axum::http::StatusCode::CREATED))
}

pub async fn edit(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<AuthorityDetailEdit>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    authority::edit_detail(session.db(), dto).await?;
    Ok(ApiResponse::ok())
}

pub async fn query_by_user_type(
    Extension(session): Extension<TenantSession>,
    Path(user_type): Path<String>,
    page: PageParams,
) -> ApiResult<Page<AuthorityDetail>> {
    let page = authority::list_by_user_type(session.db(), &user_type, page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

pub async fn query_by_user_type_and_model(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<AuthorityDetailQuery>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(query) = payload?;
    let content = authority::content(session.db(), &query).await?;
    Ok(ApiResponse::success(json!({ "authority_content": content })))
}

pub async fn set_admin(Extension(session): Extension<TenantSession>, Path(staff_id): Path<String>) -> ApiResult<()> {
    authority::set_user_type(session.db(), &staff_id, UserType::Sys).await?;
    Ok(ApiResponse::ok())
}

pub async fn set_normal(Extension(session): Extension<TenantSession>, Path(staff_id): Path<String>) -> ApiResult<()> {
    authority::set_user_type(session.db(), &staff_id, UserType::Normal).await?;
    Ok(ApiResponse::ok())
}
