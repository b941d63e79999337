// handlers/protected/recruitment.rs - /recruitment/*

use axum::extract::{rejection::JsonRejection, Extension, Path};
use axum::Json;

use super::{page_of, PageParams};
use crate::database::models::{Recruitment, RecruitmentCreate, RecruitmentEdit};
use crate::database::Page;
use crate::handlers::path_or_all;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::recruitment;
use crate::tenant::TenantSession;

pub async fn create(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<RecruitmentCreate>, JsonRejection>,
) -> ApiResult<Recruitment> {
    let Json(dto) = payload?;
    Ok(ApiResponse::created(recruitment::create(session.db(), dto).await?))
}

pub async fn delete(
    Extension(session): Extension<TenantSession>,
    Path(recruitment_id): Path<String>,
) -> ApiResult<()> {
    recruitment::delete(session.db(), &recruitment_id).await?;
    Ok(ApiResponse::ok())
}

pub async fn edit(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<RecruitmentEdit>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    recruitment::edit(session.db(), dto).await?;
    Ok(ApiResponse::ok())
}

pub async fn query(
    Extension(session): Extension<TenantSession>,
    job_name: Option<Path<String>>,
    page: PageParams,
) -> ApiResult<Page<Recruitment>> {
    let page = recruitment::query(session.db(), &path_or_all(job_name), page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}
