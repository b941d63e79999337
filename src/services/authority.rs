use tracing::info;

use super::{require, ServiceError, ServiceResult};
use crate::database::models::{
    AuthorityDetail, AuthorityDetailCreate, AuthorityDetailEdit, AuthorityDetailQuery, UserType,
};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

pub async fn create_detail(db: &TenantDb, dto: AuthorityDetailCreate) -> ServiceResult<()> {
    require("user_type", &dto.user_type)?;
    require("model", &dto.model)?;

    sqlx::query("INSERT INTO authority_detail (user_type, model, name, authority_content) VALUES (?, ?, ?, ?)")
        .bind(&dto.user_type)
        .bind(&dto.model)
        .bind(&dto.name)
        .bind(&dto.authority_content)
        .execute(db.pool())
        .await?;
    Ok(())
}

pub async fn edit_detail(db: &TenantDb, dto: AuthorityDetailEdit) -> ServiceResult<()> {
    let result = sqlx::query(
        "UPDATE authority_detail SET name = COALESCE(?, name), authority_content = COALESCE(?, authority_content) WHERE id = ?",
    )
    .bind(dto.name)
    .bind(dto.authority_content)
    .bind(dto.id)
    .execute(db.pool())
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Authority detail #{}", dto.id)));
    }
    Ok(())
}

pub async fn list_by_user_type(
    db: &TenantDb,
    user_type: &str,
    page: PageQuery,
) -> ServiceResult<Page<AuthorityDetail>> {
    let items = QueryBuilder::new("SELECT * FROM authority_detail")
        .filter("user_type = ?", user_type)
        .order_by("id")
        .fetch_all(db, page)
        .await?;
    let total = QueryBuilder::new("SELECT COUNT(*) FROM authority_detail")
        .filter("user_type = ?", user_type)
        .count(db)
        .await?;
    Ok(Page { total, items })
}

/// Permission document for one module; empty when none is defined.
pub async fn content(db: &TenantDb, query: &AuthorityDetailQuery) -> ServiceResult<String> {
    let content: Option<String> =
        sqlx::query_scalar("SELECT authority_content FROM authority_detail WHERE user_type = ? AND model = ?")
            .bind(&query.user_type)
            .bind(&query.model)
            .fetch_optional(db.pool())
            .await?;
    Ok(content.unwrap_or_default())
}

/// Switch a staff member between `sys` and `normal`. Super administrators are left alone.
pub async fn set_user_type(db: &TenantDb, staff_id: &str, user_type: UserType) -> ServiceResult<()> {
    if user_type == UserType::Supersys {
        return Err(ServiceError::Validation("Super administrators cannot be granted here".to_string()));
    }

    let result = sqlx::query("UPDATE authority SET user_type = ? WHERE staff_id = ? AND user_type <> ?")
        .bind(user_type.as_str())
        .bind(staff_id)
        .bind(UserType::Supersys.as_str())
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Credential for {}", staff_id)));
    }
    info!("Set {} to {} in {}", staff_id, user_type.as_str(), db.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::staff::{self, tests::new_staff};
    use crate::testing::TestContext;

    #[tokio::test]
    async fn details_are_listed_and_read_by_user_type() {
        let ctx = TestContext::new().await.unwrap();
        for model in ["staff", "salary"] {
            create_detail(
                ctx.db(),
                AuthorityDetailCreate {
                    user_type: "sys".to_string(),
                    model: model.to_string(),
                    name: String::new(),
                    authority_content: format!("{model}:rw"),
                },
            )
            .await
            .unwrap();
        }

        let page = list_by_user_type(ctx.db(), "sys", PageQuery::new(1, 1)).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);

        edit_detail(
            ctx.db(),
            AuthorityDetailEdit {
                id: page.items[0].id,
                name: None,
                authority_content: Some("staff:r".to_string()),
            },
        )
        .await
        .unwrap();

        let query = AuthorityDetailQuery {
            user_type: "sys".to_string(),
            model: "staff".to_string(),
        };
        assert_eq!(content(ctx.db(), &query).await.unwrap(), "staff:r");
    }

    #[tokio::test]
    async fn set_user_type_toggles_admin() {
        let ctx = TestContext::new().await.unwrap();
        let li = staff::create(ctx.db(), new_staff("Li Lei", "440106199005011234")).await.unwrap();

        set_user_type(ctx.db(), &li.staff_id, UserType::Sys).await.unwrap();
        let view = staff::query_by_staff_id(ctx.db(), &li.staff_id).await.unwrap();
        assert_eq!(view.items[0].user_type_name, "System administrator");

        set_user_type(ctx.db(), &li.staff_id, UserType::Normal).await.unwrap();
        assert!(matches!(
            set_user_type(ctx.db(), "H00000", UserType::Sys).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
