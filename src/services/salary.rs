use super::{check_amounts, is_all, random_id, require, unique_conflict, ServiceError, ServiceResult};
use crate::database::models::{Salary, SalaryCreate, SalaryEdit};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

pub async fn create(db: &TenantDb, dto: SalaryCreate) -> ServiceResult<Salary> {
    require("staff_id", &dto.staff_id)?;
    check_amounts(&[dto.base, dto.subsidy, dto.bonus])?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM salary WHERE staff_id = ?")
        .bind(&dto.staff_id)
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        return Err(ServiceError::Conflict(format!("Salary for {} already exists", dto.staff_id)));
    }

    let salary_id = random_id("salary");
    sqlx::query("INSERT INTO salary (salary_id, staff_id, staff_name, base, subsidy, bonus) VALUES (?, ?, ?, ?, ?, ?)")
        .bind(&salary_id)
        .bind(&dto.staff_id)
        .bind(&dto.staff_name)
        .bind(dto.base)
        .bind(dto.subsidy)
        .bind(dto.bonus)
        .execute(db.pool())
        .await
        .map_err(|e| unique_conflict(e, || format!("Salary for {} already exists", dto.staff_id)))?;

    get(db, &dto.staff_id).await
}

/// Salary definition of `staff_id`.
pub async fn get(db: &TenantDb, staff_id: &str) -> ServiceResult<Salary> {
    QueryBuilder::new("SELECT * FROM salary")
        .filter("staff_id = ?", staff_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Salary for {}", staff_id)))
}

pub async fn delete(db: &TenantDb, salary_id: &str) -> ServiceResult<()> {
    let result = sqlx::query("DELETE FROM salary WHERE salary_id = ?")
        .bind(salary_id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Salary {}", salary_id)));
    }
    Ok(())
}

pub async fn edit(db: &TenantDb, dto: SalaryEdit) -> ServiceResult<()> {
    let amounts: Vec<i64> = [dto.base, dto.subsidy, dto.bonus].into_iter().flatten().collect();
    check_amounts(&amounts)?;

    let result = sqlx::query(
        "UPDATE salary SET \
         staff_name = COALESCE(?, staff_name), \
         base = COALESCE(?, base), \
         subsidy = COALESCE(?, subsidy), \
         bonus = COALESCE(?, bonus) \
         WHERE id = ?",
    )
    .bind(dto.staff_name)
    .bind(dto.base)
    .bind(dto.subsidy)
    .bind(dto.bonus)
    .bind(dto.id)
    .execute(db.pool())
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Salary #{}", dto.id)));
    }
    Ok(())
}

pub async fn query(db: &TenantDb, staff_id: &str, page: PageQuery) -> ServiceResult<Page<Salary>> {
    if is_all(staff_id) {
        let items = QueryBuilder::new("SELECT * FROM salary")
            .order_by("id")
            .fetch_all(db, page)
            .await?;
        let total = QueryBuilder::new("SELECT COUNT(*) FROM salary").count(db).await?;
        return Ok(Page { total, items });
    }

    let items = QueryBuilder::new("SELECT * FROM salary")
        .filter("staff_id = ?", staff_id)
        .fetch_all(db, page)
        .await?;
    Ok(Page::of_returned(items))
}
