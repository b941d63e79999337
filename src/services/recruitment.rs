use super::{is_all, random_id, require, ServiceError, ServiceResult};
use crate::database::models::{Recruitment, RecruitmentCreate, RecruitmentEdit};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

pub async fn create(db: &TenantDb, dto: RecruitmentCreate) -> ServiceResult<Recruitment> {
    require("job_name", &dto.job_name)?;

    let recruitment_id = random_id("recruitment");
    sqlx::query(
        "INSERT INTO recruitment (recruitment_id, job_name, job_type, base_location, base_salary, edu_level, experience, describe_info, email) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&recruitment_id)
    .bind(&dto.job_name)
    .bind(&dto.job_type)
    .bind(&dto.base_location)
    .bind(&dto.base_salary)
    .bind(&dto.edu_level)
    .bind(&dto.experience)
    .bind(&dto.describe_info)
    .bind(&dto.email)
    .execute(db.pool())
    .await?;

    QueryBuilder::new("SELECT * FROM recruitment")
        .filter("recruitment_id = ?", recruitment_id.as_str())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Recruitment {}", recruitment_id)))
}

pub async fn delete(db: &TenantDb, recruitment_id: &str) -> ServiceResult<()> {
    let result = sqlx::query("DELETE FROM recruitment WHERE recruitment_id = ?")
        .bind(recruitment_id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Recruitment {}", recruitment_id)));
    }
    Ok(())
}

pub async fn edit(db: &TenantDb, dto: RecruitmentEdit) -> ServiceResult<()> {
    let result = sqlx::query(
        "UPDATE recruitment SET \
         job_name = COALESCE(?, job_name), \
         job_type = COALESCE(?, job_type), \
         base_location = COALESCE(?, base_location), \
         base_salary = COALESCE(?, base_salary), \
         edu_level = COALESCE(?, edu_level), \
         experience = COALESCE(?, experience), \
         describe_info = COALESCE(?, describe_info), \
         email = COALESCE(?, email) \
         WHERE id = ?",
    )
    .bind(dto.job_name)
    .bind(dto.job_type)
    .bind(dto.base_location)
    .bind(dto.base_salary)
    .bind(dto.edu_level)
    .bind(dto.experience)
    .bind(dto.describe_info)
    .bind(dto.email)
    .bind(dto.id)
    .execute(db.pool())
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Recruitment #{}", dto.id)));
    }
    Ok(())
}

pub async fn query(db: &TenantDb, job_name: &str, page: PageQuery) -> ServiceResult<Page<Recruitment>> {
    if is_all(job_name) {
        let items = QueryBuilder::new("SELECT * FROM recruitment")
            .order_by("id DESC")
            .fetch_all(db, page)
            .await?;
        let total = QueryBuilder::new("SELECT COUNT(*) FROM recruitment").count(db).await?;
        return Ok(Page { total, items });
    }

    let items = QueryBuilder::new("SELECT * FROM recruitment")
        .contains("job_name", job_name)
        .order_by("id DESC")
        .fetch_all(db, page)
        .await?;
    Ok(Page::of_returned(items))
}
