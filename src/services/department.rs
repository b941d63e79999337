use tracing::info;

use super::{is_all, random_id, require, unique_conflict, ServiceError, ServiceResult};
use crate::database::models::{Department, DepartmentCreate, DepartmentEdit};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

pub async fn create(db: &TenantDb, dto: DepartmentCreate) -> ServiceResult<Department> {
    require("dep_name", &dto.dep_name)?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM department WHERE dep_name = ?")
        .bind(&dto.dep_name)
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        return Err(ServiceError::Conflict(format!("Department '{}' already exists", dto.dep_name)));
    }

    let dep_id = random_id("dep");
    sqlx::query("INSERT INTO department (dep_id, dep_name, dep_describe) VALUES (?, ?, ?)")
        .bind(&dep_id)
        .bind(&dto.dep_name)
        .bind(&dto.dep_describe)
        .execute(db.pool())
        .await
        .map_err(|e| unique_conflict(e, || format!("Department '{}' already exists", dto.dep_name)))?;
    info!("Created department {} in {}", dep_id, db.name());

    get(db, &dep_id).await
}

pub async fn get(db: &TenantDb, dep_id: &str) -> ServiceResult<Department> {
    QueryBuilder::new("SELECT * FROM department")
        .filter("dep_id = ?", dep_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Department {}", dep_id)))
}

pub async fn edit(db: &TenantDb, dto: DepartmentEdit) -> ServiceResult<()> {
    let result = sqlx::query(
        "UPDATE department SET dep_name = COALESCE(?, dep_name), dep_describe = COALESCE(?, dep_describe) WHERE id = ?",
    )
    .bind(dto.dep_name)
    .bind(dto.dep_describe)
    .bind(dto.id)
    .execute(db.pool())
    .await
    .map_err(|e| unique_conflict(e, || "Department name already in use".to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Department #{}", dto.id)));
    }
    Ok(())
}

pub async fn delete(db: &TenantDb, dep_id: &str) -> ServiceResult<()> {
    let result = sqlx::query("DELETE FROM department WHERE dep_id = ?")
        .bind(dep_id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Department {}", dep_id)));
    }
    Ok(())
}

/// `dep_id` of `all` lists every department.
pub async fn query(db: &TenantDb, dep_id: &str, page: PageQuery) -> ServiceResult<Page<Department>> {
    if is_all(dep_id) {
        let items = QueryBuilder::new("SELECT * FROM department")
            .order_by("id")
            .fetch_all(db, page)
            .await?;
        let total = QueryBuilder::new("SELECT COUNT(*) FROM department").count(db).await?;
        return Ok(Page { total, items });
    }

    let items = QueryBuilder::new("SELECT * FROM department")
        .filter("dep_id = ?", dep_id)
        .fetch_all(db, page)
        .await?;
    Ok(Page::of_returned(items))
}
