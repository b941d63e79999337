use super::{is_all, random_id, require, unique_conflict, ServiceError, ServiceResult};
use crate::database::models::{Rank, RankCreate, RankEdit};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

pub async fn create(db: &TenantDb, dto: RankCreate) -> ServiceResult<Rank> {
    require("rank_name", &dto.rank_name)?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM `rank` WHERE rank_name = ?")
        .bind(&dto.rank_name)
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        return Err(ServiceError::Conflict(format!("Rank '{}' already exists", dto.rank_name)));
    }

    let rank_id = random_id("rank");
    sqlx::query("INSERT INTO `rank` (rank_id, rank_name) VALUES (?, ?)")
        .bind(&rank_id)
        .bind(&dto.rank_name)
        .execute(db.pool())
        .await
        .map_err(|e| unique_conflict(e, || format!("Rank '{}' already exists", dto.rank_name)))?;

    QueryBuilder::new("SELECT * FROM `rank`")
        .filter("rank_id = ?", rank_id.as_str())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Rank {}", rank_id)))
}

pub async fn edit(db: &TenantDb, dto: RankEdit) -> ServiceResult<()> {
    require("rank_name", &dto.rank_name)?;
    let result = sqlx::query("UPDATE `rank` SET rank_name = ? WHERE id = ?")
        .bind(&dto.rank_name)
        .bind(dto.id)
        .execute(db.pool())
        .await
        .map_err(|e| unique_conflict(e, || format!("Rank '{}' already exists", dto.rank_name)))?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Rank #{}", dto.id)));
    }
    Ok(())
}

pub async fn delete(db: &TenantDb, rank_id: &str) -> ServiceResult<()> {
    let result = sqlx::query("DELETE FROM `rank` WHERE rank_id = ?")
        .bind(rank_id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Rank {}", rank_id)));
    }
    Ok(())
}

pub async fn query(db: &TenantDb, rank_id: &str, page: PageQuery) -> ServiceResult<Page<Rank>> {
    if is_all(rank_id) {
        let items = QueryBuilder::new("SELECT * FROM `rank`")
            .order_by("id")
            .fetch_all(db, page)
            .await?;
        let total = QueryBuilder::new("SELECT COUNT(*) FROM `rank`").count(db).await?;
        return Ok(Page { total, items });
    }

    let items = QueryBuilder::new("SELECT * FROM `rank`")
        .filter("rank_id = ?", rank_id)
        .fetch_all(db, page)
        .await?;
    Ok(Page::of_returned(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    #[tokio::test]
    async fn rank_lifecycle() {
        let ctx = TestContext::new().await.unwrap();
        let rank = create(ctx.db(), RankCreate { rank_name: "P5".to_string() }).await.unwrap();
        assert!(rank.rank_id.starts_with("rank_"));

        let dup = create(ctx.db(), RankCreate { rank_name: "P5".to_string() }).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        edit(ctx.db(), RankEdit { id: rank.id, rank_name: "P6".to_string() }).await.unwrap();
        let page = query(ctx.db(), &rank.rank_id, PageQuery::all()).await.unwrap();
        assert_eq!(page.items[0].rank_name, "P6");

        delete(ctx.db(), &rank.rank_id).await.unwrap();
        assert_eq!(query(ctx.db(), "all", PageQuery::all()).await.unwrap().total, 0);
    }
}
