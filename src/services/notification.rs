use tracing::{info, warn};

use super::sms::SmsSender;
use super::{is_all, now_timestamp, random_id, require, staff, ServiceError, ServiceResult};
use crate::database::models::{Notification, NotificationCreate, NotificationEdit, URGENT_NOTICE_TYPE};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

/// Store the notice. Urgent notices are also texted to every staff phone; delivery failures
/// are logged and do not undo the notice.
pub async fn create(db: &TenantDb, sms: &dyn SmsSender, dto: NotificationCreate) -> ServiceResult<Notification> {
    require("notice_title", &dto.notice_title)?;

    let notice_id = random_id("notice");
    let date = dto.date.filter(|d| !d.is_empty()).unwrap_or_else(now_timestamp);
    sqlx::query(
        "INSERT INTO notification (notice_id, notice_title, notice_content, type, date) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&notice_id)
    .bind(&dto.notice_title)
    .bind(&dto.notice_content)
    .bind(&dto.notice_type)
    .bind(&date)
    .execute(db.pool())
    .await?;

    if dto.notice_type == URGENT_NOTICE_TYPE {
        let phones = staff::phones(db).await?;
        info!("Urgent notice {} in {}: texting {} phone(s)", notice_id, db.name(), phones.len());
        for phone in phones {
            if let Err(e) = sms.send_notice(phone, &dto.notice_title).await {
                warn!("{}", e);
            }
        }
    }

    QueryBuilder::new("SELECT * FROM notification")
        .filter("notice_id = ?", notice_id.as_str())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Notification {}", notice_id)))
}

pub async fn delete(db: &TenantDb, notice_id: &str) -> ServiceResult<()> {
    let result = sqlx::query("DELETE FROM notification WHERE notice_id = ?")
        .bind(notice_id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Notification {}", notice_id)));
    }
    Ok(())
}

pub async fn edit(db: &TenantDb, dto: NotificationEdit) -> ServiceResult<()> {
    let result = sqlx::query(
        "UPDATE notification SET \
         notice_title = COALESCE(?, notice_title), \
         notice_content = COALESCE(?, notice_content), \
         type = COALESCE(?, type), \
         date = COALESCE(?, date) \
         WHERE id = ?",
    )
    .bind(dto.notice_title)
    .bind(dto.notice_content)
    .bind(dto.notice_type)
    .bind(dto.date)
    .bind(dto.id)
    .execute(db.pool())
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Notification #{}", dto.id)));
    }
    Ok(())
}

/// Newest first. `all` lists every notice.
pub async fn query(db: &TenantDb, title: &str, page: PageQuery) -> ServiceResult<Page<Notification>> {
    if is_all(title) {
        let items = QueryBuilder::new("SELECT * FROM notification")
            .order_by("date DESC, id DESC")
            .fetch_all(db, page)
            .await?;
        let total = QueryBuilder::new("SELECT COUNT(*) FROM notification").count(db).await?;
        return Ok(Page { total, items });
    }

    let items = QueryBuilder::new("SELECT * FROM notification")
        .contains("notice_title", title)
        .order_by("date DESC, id DESC")
        .fetch_all(db, page)
        .await?;
    Ok(Page::of_returned(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sms::tests::RecordingSmsSender;
    use crate::services::staff::{self as staff_service, tests::new_staff};
    use crate::testing::TestContext;

    fn notice(title: &str, kind: &str, date: &str) -> NotificationCreate {
        NotificationCreate {
            notice_title: title.to_string(),
            notice_content: "<p>body</p>".to_string(),
            notice_type: kind.to_string(),
            date: Some(date.to_string()),
        }
    }

    #[tokio::test]
    async fn urgent_notice_texts_every_phone() {
        let ctx = TestContext::new().await.unwrap();
        let sms = RecordingSmsSender::default();
        let mut li = new_staff("Li Lei", "440106199005011234");
        li.phone = 13800000001;
        staff_service::create(ctx.db(), li).await.unwrap();
        staff_service::create(ctx.db(), new_staff("No Phone", "440106199005019999")).await.unwrap();

        create(ctx.db(), &sms, notice("Fire drill", URGENT_NOTICE_TYPE, "2024-03-01")).await.unwrap();
        create(ctx.db(), &sms, notice("Picnic", "普通通知", "2024-03-02")).await.unwrap();

        let sent = sms.sent.lock().unwrap().clone();
        assert_eq!(sent, vec![(13800000001, "Fire drill".to_string())]);
    }

    #[tokio::test]
    async fn query_orders_newest_first_and_filters_by_title() {
        let ctx = TestContext::new().await.unwrap();
        let sms = RecordingSmsSender::default();
        create(ctx.db(), &sms, notice("Holiday plan", "", "2024-01-01")).await.unwrap();
        create(ctx.db(), &sms, notice("Audit", "", "2024-02-01")).await.unwrap();

        let all = query(ctx.db(), "all", PageQuery::all()).await.unwrap();
        assert_eq!(all.total, 2);
        assert_eq!(all.items[0].notice_title, "Audit");

        let filtered = query(ctx.db(), "Holiday", PageQuery::all()).await.unwrap();
        assert_eq!(filtered.total, 1);

        delete(ctx.db(), &filtered.items[0].notice_id).await.unwrap();
        assert_eq!(query(ctx.db(), "all", PageQuery::all()).await.unwrap().total, 1);
    }
}
