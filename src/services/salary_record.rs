use tracing::info;

use super::{is_all, ServiceError, ServiceResult};
use crate::database::models::SalaryRecord;
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

async fn by_state(db: &TenantDb, staff_id: &str, paid: bool, page: PageQuery) -> ServiceResult<Page<SalaryRecord>> {
    let state = format!("is_pay = {}", i64::from(paid));
    let mut builder = QueryBuilder::new("SELECT * FROM salary_record").filter_raw(&state);
    if !is_all(staff_id) {
        builder = builder.filter("staff_id = ?", staff_id);
    }
    let items = builder.order_by("salary_date DESC, id DESC").fetch_all(db, page).await?;

    if is_all(staff_id) {
        let total = QueryBuilder::new("SELECT COUNT(*) FROM salary_record")
            .filter_raw(&state)
            .count(db)
            .await?;
        return Ok(Page { total, items });
    }
    Ok(Page::of_returned(items))
}

/// Computed but not yet paid.
pub async fn query_unpaid(db: &TenantDb, staff_id: &str, page: PageQuery) -> ServiceResult<Page<SalaryRecord>> {
    by_state(db, staff_id, false, page).await
}

pub async fn query_paid(db: &TenantDb, staff_id: &str, page: PageQuery) -> ServiceResult<Page<SalaryRecord>> {
    by_state(db, staff_id, true, page).await
}

async fn get(db: &TenantDb, id: i64) -> ServiceResult<SalaryRecord> {
    sqlx::query_as("SELECT * FROM salary_record WHERE id = ?")
        .bind(id)
        .fetch_optional(db.pool())
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Salary record #{}", id)))
}

pub async fn is_pay(db: &TenantDb, id: i64) -> ServiceResult<bool> {
    Ok(get(db, id).await?.paid())
}

/// Mark a record paid. Paying twice is a conflict.
pub async fn pay(db: &TenantDb, id: i64) -> ServiceResult<()> {
    let result = sqlx::query("UPDATE salary_record SET is_pay = 1 WHERE id = ? AND is_pay = 0")
        .bind(id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        get(db, id).await?;
        return Err(ServiceError::Conflict(format!("Salary record #{} is already paid", id)));
    }
    info!("Paid salary record #{} in {}", id, db.name());
    Ok(())
}
