// handlers/protected/department.rs - /depart/*

use axum::extract::{rejection::JsonRejection, Extension, Path};
use axum::Json;

use super::{page_of, PageParams};
use crate::database::models::{Department, DepartmentCreate, DepartmentEdit};
use crate::database::Page;
use crate::handlers::path_or_all;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::department;
use crate::tenant::TenantSession;

pub async fn create(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<DepartmentCreate>, JsonRejection>,
) -> ApiResult<Department> {
    let Json(dto) = payload?;
    Ok(ApiResponse::created(department::create(session.db(), dto).await?))
}

pub async fn delete(Extension(session): Extension<TenantSession>, Path(dep_id): Path<String>) -> ApiResult<()> {
    department::delete(session.db(), &dep_id).await?;
    Ok(ApiResponse::ok())
}

pub async fn edit(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<DepartmentEdit>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    department::edit(session.db(), dto).await?;
    Ok(ApiResponse::ok())
}

/// GET /depart/query and /depart/query/:dep_id
pub async fn query(
    Extension(session): Extension<TenantSession>,
    dep_id: Option<Path<String>>,
    page: PageParams,
) -> ApiResult<Page<Department>> {
    let page = department::query(session.db(), &path_or_all(dep_id), page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}
