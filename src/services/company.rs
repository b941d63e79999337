//! Branch company directory. Read from the bootstrap (default) handle, before any tenant is
//! known to the caller.

use super::{require, ServiceError, ServiceResult};
use crate::database::models::{BranchCompany, BranchCompanyCreate};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

pub async fn list(db: &TenantDb) -> ServiceResult<Page<BranchCompany>> {
    let items = QueryBuilder::new("SELECT * FROM branch_company")
        .order_by("id")
        .fetch_all(db, PageQuery::all())
        .await?;
    Ok(Page::of_returned(items))
}

pub async fn add(db: &TenantDb, dto: BranchCompanyCreate) -> ServiceResult<()> {
    require("company_id", &dto.company_id)?;
    require("company_name", &dto.company_name)?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM branch_company WHERE company_id = ?")
        .bind(&dto.company_id)
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        return Err(ServiceError::Conflict(format!("Company {} already exists", dto.company_id)));
    }

    sqlx::query("INSERT INTO branch_company (company_id, company_name) VALUES (?, ?)")
        .bind(&dto.company_id)
        .bind(&dto.company_name)
        .execute(db.pool())
        .await?;
    Ok(())
}
