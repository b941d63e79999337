// handlers/protected/mod.rs - Tenant-scoped handlers
//
// Every route here sits behind `require_tenant`. Handlers take the resolved
// `TenantSession` from request extensions and pass `session.db()` to the service;
// no handler looks up a database on its own.

pub mod attendance;
pub mod authority;
pub mod candidate;
pub mod department;
pub mod notification;
pub mod password;
pub mod rank;
pub mod recruitment;
pub mod salary;
pub mod salary_record;
pub mod staff;

use axum::extract::{rejection::QueryRejection, Query};

use crate::database::PageQuery;
use crate::error::ApiError;

/// `?page=&limit=` with a readable 400 on garbage.
pub(crate) type PageParams = Result<Query<PageQuery>, QueryRejection>;

pub(crate) fn page_of(params: PageParams) -> Result<PageQuery, ApiError> {
    let Query(page) = params?;
    if !page.is_addressable() {
        return Err(ApiError::validation_error("page is out of range"));
    }
    Ok(page)
}
