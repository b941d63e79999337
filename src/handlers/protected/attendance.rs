// handlers/protected/attendance.rs - /attendance_record/*

use axum::extract::{rejection::JsonRejection, Extension, Path};
use axum::Json;
use serde_json::{json, Value};

use super::{page_of, PageParams};
use crate::database::models::{AttendanceCreate, AttendanceEdit, AttendanceRecord};
use crate::database::Page;
use crate::handlers::path_or_all;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::attendance::{self, PayBreakdown};
use crate::tenant::TenantSession;

pub async fn create(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<AttendanceCreate>, JsonRejection>,
) -> ApiResult<AttendanceRecord> {
    let Json(dto) = payload?;
    Ok(ApiResponse::created(attendance::create(session.db(), dto).await?))
}

pub async fn delete(
    Extension(session): Extension<TenantSession>,
    Path(attendance_id): Path<String>,
) -> ApiResult<()> {
    attendance::delete(session.db(), &attendance_id).await?;
    Ok(ApiResponse::ok())
}

pub async fn edit(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<AttendanceEdit>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    attendance::edit(session.db(), dto).await?;
    Ok(ApiResponse::ok())
}

/// Pending sheets only.
pub async fn query(
    Extension(session): Extension<TenantSession>,
    staff_id: Option<Path<String>>,
    page: PageParams,
) -> ApiResult<Page<AttendanceRecord>> {
    let page = attendance::query(session.db(), &path_or_all(staff_id), page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

pub async fn query_history(
    Extension(session): Extension<TenantSession>,
    Path(staff_id): Path<String>,
    page: PageParams,
) -> ApiResult<Page<AttendanceRecord>> {
    let page = attendance::history(session.db(), &staff_id, page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

pub async fn is_pay(
    Extension(session): Extension<TenantSession>,
    Path((staff_id, date)): Path<(String, String)>,
) -> ApiResult<Value> {
    let paid = attendance::is_pay(session.db(), &staff_id, &date).await?;
    Ok(ApiResponse::success(json!({ "staff_id": staff_id, "date": date, "is_pay": paid })))
}

pub async fn approval_queue(
    Extension(session): Extension<TenantSession>,
    Path(leader_staff_id): Path<String>,
) -> ApiResult<Page<AttendanceRecord>> {
    Ok(ApiResponse::success(attendance::approval_queue(session.db(), &leader_staff_id).await?))
}

pub async fn approve_accept(
    Extension(session): Extension<TenantSession>,
    Path(attendance_id): Path<String>,
) -> ApiResult<PayBreakdown> {
    Ok(ApiResponse::success(attendance::approve_accept(session.db(), &attendance_id).await?))
}

pub async fn approve_reject(
    Extension(session): Extension<TenantSession>,
    Path(attendance_id): Path<String>,
) -> ApiResult<()> {
    attendance::approve_reject(session.db(), &attendance_id).await?;
    Ok(ApiResponse::ok())
}
