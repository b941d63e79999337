// handlers/protected/staff.rs - /staff/*
//
// Create writes the staff row and its login credential together; see services::staff.

use axum::extract::{rejection::JsonRejection, Extension, Path};
use axum::Json;

use super::{page_of, PageParams};
use crate::database::models::{Staff, StaffCreate, StaffEdit, StaffView};
use crate::database::Page;
use crate::handlers::path_or_all;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::staff;
use crate::tenant::TenantSession;

pub async fn create(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<StaffCreate>, JsonRejection>,
) -> ApiResult<Staff> {
    let Json(dto) = payload?;
    Ok(ApiResponse::created(staff::create(session.db(), dto).await?))
}

pub async fn delete(Extension(session): Extension<TenantSession>, Path(staff_id): Path<String>) -> ApiResult<()> {
    staff::delete(session.db(), &staff_id).await?;
    Ok(ApiResponse::ok())
}

pub async fn edit(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<StaffEdit>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    staff::edit(session.db(), dto).await?;
    Ok(ApiResponse::ok())
}

pub async fn query(
    Extension(session): Extension<TenantSession>,
    staff_id: Option<Path<String>>,
    page: PageParams,
) -> ApiResult<Page<StaffView>> {
    let page = staff::query(session.db(), &path_or_all(staff_id), page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

pub async fn query_by_name(
    Extension(session): Extension<TenantSession>,
    Path(staff_name): Path<String>,
    page: PageParams,
) -> ApiResult<Page<StaffView>> {
    let page = staff::query_by_name(session.db(), &staff_name, page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

pub async fn query_by_dep(
    Extension(session): Extension<TenantSession>,
    Path(dep_name): Path<String>,
    page: PageParams,
) -> ApiResult<Page<StaffView>> {
    let page = staff::query_by_dep(session.db(), &dep_name, page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

pub async fn query_by_staff_id(
    Extension(session): Extension<TenantSession>,
    Path(staff_id): Path<String>,
) -> ApiResult<Page<StaffView>> {
    Ok(ApiResponse::success(staff::query_by_staff_id(session.db(), &staff_id).await?))
}
