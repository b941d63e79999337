// handlers/public/company.rs - GET /company/query
//
// Bootstrap read: the login page lists branches before the caller has a tenant, so this
// reads the default handle.

use axum::extract::State;

use crate::database::models::BranchCompany;
use crate::database::Page;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::company;
use crate::state::AppState;

pub async fn query(State(state): State<AppState>) -> ApiResult<Page<BranchCompany>> {
    let page = company::list(state.registry().default_db()).await?;
    Ok(ApiResponse::success(page))
}
