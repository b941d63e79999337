// handlers/protected/salary_record.rs - /salary_record/*
//
// Records are created by attendance approval, never directly.

use axum::extract::{rejection::PathRejection, Extension, Path};
use serde_json::{json, Value};

use super::{page_of, PageParams};
use crate::database::models::SalaryRecord;
use crate::database::Page;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::salary_record;
use crate::tenant::TenantSession;

pub async fn query(
    Extension(session): Extension<TenantSession>,
    Path(staff_id): Path<String>,
    page: PageParams,
) -> ApiResult<Page<SalaryRecord>> {
    let page = salary_record::query_unpaid(session.db(), &staff_id, page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

pub async fn query_history(
    Extension(session): Extension<TenantSession>,
    Path(staff_id): Path<String>,
    page: PageParams,
) -> ApiResult<Page<SalaryRecord>> {
    let page = salary_record::query_paid(session.db(), &staff_id, page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

pub async fn is_pay(
    Extension(session): Extension<TenantSession>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Value> {
    let Path(id) = id?;
    let paid = salary_record::is_pay(session.db(), id).await?;
    Ok(ApiResponse::success(json!({ "id": id, "is_pay": paid })))
}

pub async fn pay(Extension(session): Extension<TenantSession>, id: Result<Path<i64>, PathRejection>) -> ApiResult<()> {
    let Path(id) = id?;
    salary_record::pay(session.db(), id).await?;
    Ok(ApiResponse::ok())
}
