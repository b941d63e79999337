// handlers/protected/candidate.rs - /candidate/*

use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Extension, Path,
};
use axum::Json;

use super::{page_of, PageParams};
use crate::database::models::{Candidate, CandidateCreate, CandidateEdit};
use crate::database::Page;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::candidate;
use crate::tenant::TenantSession;

pub async fn create(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<CandidateCreate>, JsonRejection>,
) -> ApiResult<Candidate> {
    let Json(dto) = payload?;
    Ok(ApiResponse::created(candidate::create(session.db(), dto).await?))
}

pub async fn delete(
    Extension(session): Extension<TenantSession>,
    Path(candidate_id): Path<String>,
) -> ApiResult<()> {
    candidate::delete(session.db(), &candidate_id).await?;
    Ok(ApiResponse::ok())
}

pub async fn edit(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<CandidateEdit>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    candidate::edit(session.db(), dto).await?;
    Ok(ApiResponse::ok())
}

pub async fn query_by_name(
    Extension(session): Extension<TenantSession>,
    Path(name): Path<String>,
    page: PageParams,
) -> ApiResult<Page<Candidate>> {
    let page = candidate::query_by_name(session.db(), &name, page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

/// Candidates assigned to one interviewer.
pub async fn query_by_staff_id(
    Extension(session): Extension<TenantSession>,
    Path(staff_id): Path<String>,
    page: PageParams,
) -> ApiResult<Page<Candidate>> {
    let page = candidate::query_by_staff_id(session.db(), &staff_id, page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}

pub async fn reject(Extension(session): Extension<TenantSession>, id: Result<Path<i64>, PathRejection>) -> ApiResult<()> {
    let Path(id) = id?;
    candidate::reject(session.db(), id).await?;
    Ok(ApiResponse::ok())
}

pub async fn accept(Extension(session): Extension<TenantSession>, id: Result<Path<i64>, PathRejection>) -> ApiResult<()> {
    let Path(id) = id?;
    candidate::accept(session.db(), id).await?;
    Ok(ApiResponse::ok())
}
