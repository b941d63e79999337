// handlers/protected/notification.rs - /notification/*

use axum::extract::{rejection::JsonRejection, Extension, Path, State};
use axum::Json;

use super::{page_of, PageParams};
use crate::database::models::{Notification, NotificationCreate, NotificationEdit};
use crate::database::Page;
use crate::handlers::path_or_all;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::notification;
use crate::state::AppState;
use crate::tenant::TenantSession;

/// Urgent notices are also texted to every staff phone of this tenant.
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<NotificationCreate>, JsonRejection>,
) -> ApiResult<Notification> {
    let Json(dto) = payload?;
    let notice = notification::create(session.db(), state.sms.as_ref(), dto).await?;
    Ok(ApiResponse::created(notice))
}

pub async fn delete(Extension(session): Extension<TenantSession>, Path(notice_id): Path<String>) -> ApiResult<()> {
    notification::delete(session.db(), &notice_id).await?;
    Ok(ApiResponse::ok())
}

pub async fn edit(
    Extension(session): Extension<TenantSession>,
    payload: Result<Json<NotificationEdit>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    notification::edit(session.db(), dto).await?;
    Ok(ApiResponse::ok())
}

pub async fn query(
    Extension(session): Extension<TenantSession>,
    notice_title: Option<Path<String>>,
    page: PageParams,
) -> ApiResult<Page<Notification>> {
    let page = notification::query(session.db(), &path_or_all(notice_title), page_of(page)?).await?;
    Ok(ApiResponse::success(page))
}
