use super::{hash_password, is_all, require, ServiceError, ServiceResult};
use crate::database::models::{Authority, PasswordEdit};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

/// Credential rows for `staff_id` or `all`. Hashes are never serialized.
pub async fn query(db: &TenantDb, staff_id: &str, page: PageQuery) -> ServiceResult<Page<Authority>> {
    if is_all(staff_id) {
        let items = QueryBuilder::new("SELECT * FROM authority")
            .order_by("id")
            .fetch_all(db, page)
            .await?;
        let total = QueryBuilder::new("SELECT COUNT(*) FROM authority").count(db).await?;
        return Ok(Page { total, items });
    }

    let items = QueryBuilder::new("SELECT * FROM authority")
        .filter("staff_id = ?", staff_id)
        .fetch_all(db, page)
        .await?;
    Ok(Page::of_returned(items))
}

pub async fn edit(db: &TenantDb, dto: PasswordEdit) -> ServiceResult<()> {
    require("password", &dto.password)?;

    let result = sqlx::query("UPDATE authority SET user_password = ? WHERE staff_id = ?")
        .bind(hash_password(&dto.password))
        .bind(&dto.staff_id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Credential for {}", dto.staff_id)));
    }
    Ok(())
}
