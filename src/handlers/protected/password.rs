// handlers/protected/password.rs - /password/*

use axum::extract::{rejection::JsonRejection, Extension, Path};
use axum::Json;

use super::{page_of, PageParams};
use crate::database::models::{Authority, PasswordEdit};
use crate::database::Page;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::password;
use crate::tenant::TenantSession;

/// Credential summary. The hash never leaves the service.
pub async fn query(
    Extension(session): Extension<TenantSession>,
    Path(staff_id): Path<String>,
    page: PageParams,
) -> ApiResult<Page<Authority>> {
    let page = password::query(session.db(), &staff_id, page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

pub async fn edit(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<PasswordEdit>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    password::edit(session.db(), dto).await?;
    Ok(ApiResponse::ok())
}
