// handlers/protected/salary.rs - /salary/*

use axum::extract::{rejection::JsonRejection, Extension, Path};
use axum::Json;

use super::{page_of, PageParams};
use crate::database::models::{Salary, SalaryCreate, SalaryEdit};
use crate::database::Page;
use crate::handlers::path_or_all;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::salary;
use crate::tenant::TenantSession;

pub async fn create(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<SalaryCreate>, JsonRejection>,
) -> ApiResult<Salary> {
    let Json(dto) = payload?;
    Ok(ApiResponse::created(salary::create(session.db(), dto).await?))
}

pub async fn delete(Extension(session): Extension<TenantSession>, Path(salary_id): Path<String>) -> ApiResult<()> {
    salary::delete(session.db(), &salary_id).await?;
    Ok(ApiResponse::ok())
}

pub async fn edit(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<SalaryEdit>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    salary::edit(session.db(), dto).await?;
    Ok(ApiResponse::ok())
}

pub async fn query(
    Extension(session): Extension<TenantSession>,
    staff_id: Option<Path<String>>,
    page: PageParams,
) -> ApiResult<Page<Salary>> {
    let page = salary::query(session.db(), &path_or_all(staff_id), page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}
