use tracing::info;

use super::{is_all, random_id, require, ServiceError, ServiceResult};
use crate::database::models::{Candidate, CandidateCreate, CandidateEdit, CandidateStatus};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

pub async fn create(db: &TenantDb, dto: CandidateCreate) -> ServiceResult<Candidate> {
    require("name", &dto.name)?;

    let candidate_id = random_id("candidate");
    sqlx::query(
        "INSERT INTO candidate (candidate_id, staff_id, name, job_name, edu_level, major, experience, describe_info, email, evaluation, status) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, '', ?)",
    )
    .bind(&candidate_id)
    .bind(&dto.staff_id)
    .bind(&dto.name)
    .bind(&dto.job_name)
    .bind(&dto.edu_level)
    .bind(&dto.major)
    .bind(&dto.experience)
    .bind(&dto.describe_info)
    .bind(&dto.email)
    .bind(CandidateStatus::Interviewing.code())
    .execute(db.pool())
    .await?;

    QueryBuilder::new("SELECT * FROM candidate")
        .filter("candidate_id = ?", candidate_id.as_str())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Candidate {}", candidate_id)))
}

pub async fn delete(db: &TenantDb, candidate_id: &str) -> ServiceResult<()> {
    let result = sqlx::query("DELETE FROM candidate WHERE candidate_id = ?")
        .bind(candidate_id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Candidate {}", candidate_id)));
    }
    Ok(())
}

pub async fn edit(db: &TenantDb, dto: CandidateEdit) -> ServiceResult<()> {
    let result = sqlx::query(
        "UPDATE candidate SET \
         staff_id = COALESCE(?, staff_id), \
         name = COALESCE(?, name), \
         job_name = COALESCE(?, job_name), \
         edu_level = COALESCE(?, edu_level), \
         major = COALESCE(?, major), \
         experience = COALESCE(?, experience), \
         describe_info = COALESCE(?, describe_info), \
         email = COALESCE(?, email), \
         evaluation = COALESCE(?, evaluation) \
         WHERE id = ?",
    )
    .bind(dto.staff_id)
    .bind(dto.name)
    .bind(dto.job_name)
    .bind(dto.edu_level)
    .bind(dto.major)
    .bind(dto.experience)
    .bind(dto.describe_info)
    .bind(dto.email)
    .bind(dto.evaluation)
    .bind(dto.id)
    .execute(db.pool())
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Candidate #{}", dto.id)));
    }
    Ok(())
}

pub async fn query_by_name(db: &TenantDb, name: &str, page: PageQuery) -> ServiceResult<Page<Candidate>> {
    if is_all(name) {
        let items = QueryBuilder::new("SELECT * FROM candidate")
            .order_by("id DESC")
            .fetch_all(db, page)
            .await?;
        let total = QueryBuilder::new("SELECT COUNT(*) FROM candidate").count(db).await?;
        return Ok(Page { total, items });
    }

    let items = QueryBuilder::new("SELECT * FROM candidate")
        .contains("name", name)
        .order_by("id DESC")
        .fetch_all(db, page)
        .await?;
    Ok(Page::of_returned(items))
}

/// Candidates assigned to interviewer `staff_id`.
pub async fn query_by_staff_id(db: &TenantDb, staff_id: &str, page: PageQuery) -> ServiceResult<Page<Candidate>> {
    let items = QueryBuilder::new("SELECT * FROM candidate")
        .filter("staff_id = ?", staff_id)
        .order_by("id DESC")
        .fetch_all(db, page)
        .await?;
    Ok(Page::of_returned(items))
}

async fn set_status(db: &TenantDb, id: i64, status: CandidateStatus) -> ServiceResult<()> {
    let result = sqlx::query("UPDATE candidate SET status = ? WHERE id = ?")
        .bind(status.code())
        .bind(id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Candidate #{}", id)));
    }
    info!("Candidate #{} in {} set to {:?}", id, db.name(), status);
    Ok(())
}

pub async fn reject(db: &TenantDb, id: i64) -> ServiceResult<()> {
    set_status(db, id, CandidateStatus::Rejected).await
}

pub async fn accept(db: &TenantDb, id: i64) -> ServiceResult<()> {
    set_status(db, id, CandidateStatus::Accepted).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    fn applicant(name: &str, interviewer: &str) -> CandidateCreate {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "staff_id": interviewer,
            "job_name": "Backend engineer",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn candidate_status_transitions() {
        let ctx = TestContext::new().await.unwrap();
        let wang = create(ctx.db(), applicant("Wang Wu", "H00001")).await.unwrap();
        let zhao = create(ctx.db(), applicant("Zhao Liu", "H00002")).await.unwrap();
        assert_eq!(wang.status, CandidateStatus::Interviewing.code());

        reject(ctx.db(), wang.id).await.unwrap();
        accept(ctx.db(), zhao.id).await.unwrap();
        assert!(matches!(accept(ctx.db(), 999).await, Err(ServiceError::NotFound(_))));

        let page = query_by_staff_id(ctx.db(), "H00001", PageQuery::all()).await.unwrap();
        assert_eq!(page.items[0].status, CandidateStatus::Rejected.code());

        let page = query_by_name(ctx.db(), "Zhao", PageQuery::all()).await.unwrap();
        assert_eq!(page.items[0].status, CandidateStatus::Accepted.code());
        assert_eq!(query_by_name(ctx.db(), "all", PageQuery::all()).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn edit_records_evaluation() {
        let ctx = TestContext::new().await.unwrap();
        let wang = create(ctx.db(), applicant("Wang Wu", "H00001")).await.unwrap();

        let mut dto: CandidateEdit = serde_json::from_value(serde_json::json!({ "id": wang.id })).unwrap();
        dto.evaluation = Some("Strong system design".to_string());
        edit(ctx.db(), dto).await.unwrap();

        let page = query_by_name(ctx.db(), "Wang", PageQuery::all()).await.unwrap();
        assert_eq!(page.items[0].evaluation, "Strong system design");
        assert_eq!(page.items[0].job_name, "Backend engineer");

        delete(ctx.db(), &wang.candidate_id).await.unwrap();
    }
}
