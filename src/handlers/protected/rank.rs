// handlers/protected/rank.rs - /rank/*

use axum::extract::{rejection::JsonRejection, Extension, Path};
use axum::Json;

use super::{page_of, PageParams};
use crate::database::models::{Rank, RankCreate, RankEdit};
use crate::database::Page;
use crate::handlers::path_or_all;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::rank;
use crate::tenant::TenantSession;

pub async fn create(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<RankCreate>, JsonRejection>,
) -> ApiResult<Rank> {
    let Json(dto) = payload?;
    Ok(ApiResponse::created(rank::create(session.db(), dto).await?))
}

pub async fn delete(Extension(session): Extension<TenantSession>, Path(rank_id): Path<String>) -> ApiResult<()> {
    rank::delete(session.db(), &rank_id).await?;
    Ok(ApiResponse::ok())
}

pub async fn edit(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<RankEdit>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    rank::edit(session.db(), dto).await?;
    Ok(ApiResponse::ok())
}

pub async fn query(
    Extension(session): Extension<TenantSession>,
    rank_id: Option<Path<String>>,
    page: PageParams,
) -> ApiResult<Page<Rank>> {
    let page = rank::query(session.db(), &path_or_all(rank_id), page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}
