use tracing::{debug, info};

use super::{
    hash_password, is_all, now_timestamp, random_id, random_staff_id, require, unique_conflict, validate_date,
    ServiceError, ServiceResult,
};
use crate::database::models::{Sex, Staff, StaffCreate, StaffEdit, StaffView, UserType};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

/// Accounts created by provisioning rather than through staff onboarding.
const SYSTEM_ACCOUNTS: &str = "s.staff_id NOT IN ('root', 'admin')";

const VIEW_HEAD: &str = "SELECT s.*, \
    COALESCE(d.dep_name, '') AS dep_name, \
    COALESCE(r.rank_name, '') AS rank_name, \
    COALESCE(a.user_type, '') AS user_type \
    FROM staff s \
    LEFT JOIN department d ON d.dep_id = s.dep_id \
    LEFT JOIN `rank` r ON r.rank_id = s.rank_id \
    LEFT JOIN authority a ON a.staff_id = s.staff_id";

const STAFF_ID_ATTEMPTS: usize = 8;

/// Initial password: the last six characters of the identity number.
fn initial_password(identity_num: &str) -> ServiceResult<String> {
    let chars: Vec<char> = identity_num.trim().chars().collect();
    if chars.len() < 6 {
        return Err(ServiceError::Validation(
            "identity_num must have at least 6 characters".to_string(),
        ));
    }
    Ok(chars[chars.len() - 6..].iter().collect())
}

/// Create the staff row and its login credential in one transaction.
pub async fn create(db: &TenantDb, dto: StaffCreate) -> ServiceResult<Staff> {
    require("staff_name", &dto.staff_name)?;
    let password = initial_password(&dto.identity_num)?;
    validate_date("birthday", &dto.birthday)?;
    validate_date("entry_date", &dto.entry_date)?;

    let mut tx = db.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff WHERE identity_num = ?")
        .bind(dto.identity_num.trim())
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        return Err(ServiceError::Conflict("Staff with this identity number already exists".to_string()));
    }

    let mut staff_id = None;
    for _ in 0..STAFF_ID_ATTEMPTS {
        let candidate = random_staff_id();
        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff WHERE staff_id = ?")
            .bind(&candidate)
            .fetch_one(&mut *tx)
            .await?;
        if taken == 0 {
            staff_id = Some(candidate);
            break;
        }
    }
    let staff_id = staff_id.ok_or_else(|| ServiceError::Conflict("Could not allocate a staff id".to_string()))?;

    let leader_name: Option<String> = sqlx::query_scalar("SELECT staff_name FROM staff WHERE staff_id = ?")
        .bind(&dto.leader_staff_id)
        .fetch_optional(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO staff (staff_id, staff_name, leader_staff_id, leader_name, birthday, identity_num, sex, \
         nation, school, major, edu_level, base_salary, card_num, rank_id, dep_id, email, phone, entry_date) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&staff_id)
    .bind(&dto.staff_name)
    .bind(&dto.leader_staff_id)
    .bind(leader_name.unwrap_or_default())
    .bind(&dto.birthday)
    .bind(dto.identity_num.trim())
    .bind(Sex::from_input(&dto.sex).code())
    .bind(&dto.nation)
    .bind(&dto.school)
    .bind(&dto.major)
    .bind(&dto.edu_level)
    .bind(dto.base_salary)
    .bind(&dto.card_num)
    .bind(&dto.rank_id)
    .bind(&dto.dep_id)
    .bind(&dto.email)
    .bind(dto.phone)
    .bind(&dto.entry_date)
    .execute(&mut *tx)
    .await
    .map_err(|e| unique_conflict(e, || "Staff with this identity number already exists".to_string()))?;

    sqlx::query(
        "INSERT INTO authority (authority_id, staff_id, user_password, user_type, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(random_id("auth"))
    .bind(&staff_id)
    .bind(hash_password(&password))
    .bind(UserType::Normal.as_str())
    .bind(now_timestamp())
    .execute(&mut *tx)
    .await?;

    let staff: Staff = sqlx::query_as("SELECT * FROM staff WHERE staff_id = ?")
        .bind(&staff_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    info!("Created staff {} in {}", staff_id, db.name());
    Ok(staff)
}

pub async fn edit(db: &TenantDb, dto: StaffEdit) -> ServiceResult<()> {
    if let Some(birthday) = &dto.birthday {
        validate_date("birthday", birthday)?;
    }
    if let Some(entry_date) = &dto.entry_date {
        validate_date("entry_date", entry_date)?;
    }

    let leader_name = match &dto.leader_staff_id {
        Some(leader) => Some(
            sqlx::query_scalar::<_, String>("SELECT staff_name FROM staff WHERE staff_id = ?")
                .bind(leader)
                .fetch_optional(db.pool())
                .await?
                .unwrap_or_default(),
        ),
        None => None,
    };

    let result = sqlx::query(
        "UPDATE staff SET \
         staff_name = COALESCE(?, staff_name), \
         leader_staff_id = COALESCE(?, leader_staff_id), \
         leader_name = COALESCE(?, leader_name), \
         birthday = COALESCE(?, birthday), \
         identity_num = COALESCE(?, identity_num), \
         sex = COALESCE(?, sex), \
         nation = COALESCE(?, nation), \
         school = COALESCE(?, school), \
         major = COALESCE(?, major), \
         edu_level = COALESCE(?, edu_level), \
         base_salary = COALESCE(?, base_salary), \
         card_num = COALESCE(?, card_num), \
         rank_id = COALESCE(?, rank_id), \
         dep_id = COALESCE(?, dep_id), \
         email = COALESCE(?, email), \
         phone = COALESCE(?, phone), \
         entry_date = COALESCE(?, entry_date) \
         WHERE staff_id = ?",
    )
    .bind(dto.staff_name)
    .bind(dto.leader_staff_id)
    .bind(leader_name)
    .bind(dto.birthday)
    .bind(dto.identity_num)
    .bind(dto.sex.map(|s| Sex::from_input(&s).code()))
    .bind(dto.nation)
    .bind(dto.school)
    .bind(dto.major)
    .bind(dto.edu_level)
    .bind(dto.base_salary)
    .bind(dto.card_num)
    .bind(dto.rank_id)
    .bind(dto.dep_id)
    .bind(dto.email)
    .bind(dto.phone)
    .bind(dto.entry_date)
    .bind(&dto.staff_id)
    .execute(db.pool())
    .await
    .map_err(|e| unique_conflict(e, || "Staff with this identity number already exists".to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Staff {}", dto.staff_id)));
    }
    Ok(())
}

/// Remove the staff row and its credential together.
pub async fn delete(db: &TenantDb, staff_id: &str) -> ServiceResult<()> {
    let mut tx = db.begin().await?;

    let removed = sqlx::query("DELETE FROM staff WHERE staff_id = ?")
        .bind(staff_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if removed == 0 {
        return Err(ServiceError::NotFound(format!("Staff {}", staff_id)));
    }

    sqlx::query("DELETE FROM authority WHERE staff_id = ?")
        .bind(staff_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!("Deleted staff {} from {}", staff_id, db.name());
    Ok(())
}

pub async fn get(db: &TenantDb, staff_id: &str) -> ServiceResult<Staff> {
    QueryBuilder::new("SELECT * FROM staff")
        .filter("staff_id = ?", staff_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Staff {}", staff_id)))
}

async fn fetch_views(db: &TenantDb, builder: QueryBuilder, page: PageQuery) -> ServiceResult<Vec<StaffView>> {
    let rows: Vec<StaffView> = builder.order_by("s.id").fetch_all(db, page).await?;
    debug!("Fetched {} staff row(s) from {}", rows.len(), db.name());
    Ok(rows.into_iter().map(StaffView::with_names).collect())
}

/// Listing by staff id or `all`. System accounts are never listed here.
pub async fn query(db: &TenantDb, staff_id: &str, page: PageQuery) -> ServiceResult<Page<StaffView>> {
    if is_all(staff_id) {
        let items = fetch_views(db, QueryBuilder::new(VIEW_HEAD).filter_raw(SYSTEM_ACCOUNTS), page).await?;
        let total = QueryBuilder::new("SELECT COUNT(*) FROM staff s")
            .filter_raw(SYSTEM_ACCOUNTS)
            .count(db)
            .await?;
        return Ok(Page { total, items });
    }

    let builder = QueryBuilder::new(VIEW_HEAD)
        .filter("s.staff_id = ?", staff_id)
        .filter_raw(SYSTEM_ACCOUNTS);
    Ok(Page::of_returned(fetch_views(db, builder, page).await?))
}

pub async fn query_by_name(db: &TenantDb, staff_name: &str, page: PageQuery) -> ServiceResult<Page<StaffView>> {
    let builder = QueryBuilder::new(VIEW_HEAD)
        .contains("s.staff_name", staff_name)
        .filter_raw(SYSTEM_ACCOUNTS);
    Ok(Page::of_returned(fetch_views(db, builder, page).await?))
}

pub async fn query_by_dep(db: &TenantDb, dep_name: &str, page: PageQuery) -> ServiceResult<Page<StaffView>> {
    let builder = QueryBuilder::new(VIEW_HEAD)
        .contains("d.dep_name", dep_name)
        .filter_raw(SYSTEM_ACCOUNTS);
    Ok(Page::of_returned(fetch_views(db, builder, page).await?))
}

/// Exact staff id lookup, system accounts included.
pub async fn query_by_staff_id(db: &TenantDb, staff_id: &str) -> ServiceResult<Page<StaffView>> {
    let builder = QueryBuilder::new(VIEW_HEAD).filter("s.staff_id = ?", staff_id);
    Ok(Page::of_returned(fetch_views(db, builder, PageQuery::all()).await?))
}

/// Every non-zero phone number on file.
pub async fn phones(db: &TenantDb) -> ServiceResult<Vec<i64>> {
    Ok(sqlx::query_scalar("SELECT phone FROM staff WHERE phone <> 0")
        .fetch_all(db.pool())
        .await?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::database::models::DepartmentCreate;
    use crate::services::{department, verify_password};
    use crate::testing::TestContext;

    pub(crate) fn new_staff(name: &str, identity_num: &str) -> StaffCreate {
        StaffCreate {
            staff_name: name.to_string(),
            leader_staff_id: String::new(),
            birthday: "1990-05-01".to_string(),
            identity_num: identity_num.to_string(),
            sex: "1".to_string(),
            nation: String::new(),
            school: String::new(),
            major: String::new(),
            edu_level: String::new(),
            base_salary: 9000,
            card_num: String::new(),
            rank_id: String::new(),
            dep_id: String::new(),
            email: String::new(),
            phone: 0,
            entry_date: "2020-01-01".to_string(),
        }
    }

    #[test]
    fn initial_password_is_last_six_characters() {
        assert_eq!(initial_password("44010619900501123X").unwrap(), "01123X");
        assert!(initial_password("12345").is_err());
    }

    #[tokio::test]
    async fn create_writes_staff_and_credential() {
        let ctx = TestContext::new().await.unwrap();
        let staff = create(ctx.db(), new_staff("Li Lei", "440106199005011234")).await.unwrap();
        assert!(staff.staff_id.starts_with('H'));
        assert_eq!(staff.sex, 1);

        let (hash, user_type): (String, String) =
            sqlx::query_as("SELECT user_password, user_type FROM authority WHERE staff_id = ?")
                .bind(&staff.staff_id)
                .fetch_one(ctx.db().pool())
                .await
                .unwrap();
        assert!(verify_password("011234", &hash));
        assert_eq!(user_type, "normal");
    }

    #[tokio::test]
    async fn duplicate_identity_number_leaves_no_partial_rows() {
        let ctx = TestContext::new().await.unwrap();
        create(ctx.db(), new_staff("Li Lei", "440106199005011234")).await.unwrap();

        let err = create(ctx.db(), new_staff("Han Meimei", "440106199005011234")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let staff: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff").fetch_one(ctx.db().pool()).await.unwrap();
        let creds: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authority").fetch_one(ctx.db().pool()).await.unwrap();
        assert_eq!((staff, creds), (1, 1));
    }

    #[tokio::test]
    async fn edit_onto_taken_identity_number_conflicts() {
        let ctx = TestContext::new().await.unwrap();
        create(ctx.db(), new_staff("Li Lei", "440106199005011234")).await.unwrap();
        let han = create(ctx.db(), new_staff("Han Meimei", "440106199005015678")).await.unwrap();

        let dto: StaffEdit = serde_json::from_value(serde_json::json!({
            "staff_id": han.staff_id,
            "identity_num": "440106199005011234",
        }))
        .unwrap();
        assert!(matches!(edit(ctx.db(), dto).await, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn failed_credential_insert_rolls_back_staff_row() {
        let ctx = TestContext::new().await.unwrap();
        sqlx::query("DROP TABLE authority").execute(ctx.db().pool()).await.unwrap();

        assert!(create(ctx.db(), new_staff("Li Lei", "440106199005011234")).await.is_err());

        let staff: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff").fetch_one(ctx.db().pool()).await.unwrap();
        assert_eq!(staff, 0);
    }

    #[tokio::test]
    async fn views_resolve_names_and_hide_system_accounts() {
        let ctx = TestContext::new().await.unwrap();
        let dep = department::create(
            ctx.db(),
            DepartmentCreate {
                dep_name: "Finance".to_string(),
                dep_describe: String::new(),
            },
        )
        .await
        .unwrap();

        let mut dto = new_staff("Li Lei", "440106199005011234");
        dto.dep_id = dep.dep_id.clone();
        let li = create(ctx.db(), dto).await.unwrap();

        sqlx::query("INSERT INTO staff (staff_id, staff_name, identity_num) VALUES ('root', 'root', '000000')")
            .execute(ctx.db().pool())
            .await
            .unwrap();

        let all = query(ctx.db(), "all", PageQuery::all()).await.unwrap();
        assert_eq!(all.total, 1);
        assert_eq!(all.items[0].dep_name, "Finance");
        assert_eq!(all.items[0].user_type_name, "Staff");

        assert_eq!(query(ctx.db(), "root", PageQuery::all()).await.unwrap().total, 0);
        assert_eq!(query_by_staff_id(ctx.db(), "root").await.unwrap().total, 1);
        assert_eq!(query_by_dep(ctx.db(), "Fin", PageQuery::all()).await.unwrap().items[0].staff.staff_id, li.staff_id);
        assert_eq!(query_by_name(ctx.db(), "Lei", PageQuery::all()).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn edit_refreshes_leader_name_and_delete_removes_credential() {
        let ctx = TestContext::new().await.unwrap();
        let boss = create(ctx.db(), new_staff("Boss", "440106198001011111")).await.unwrap();
        let li = create(ctx.db(), new_staff("Li Lei", "440106199005011234")).await.unwrap();

        let mut edit_dto: StaffEdit = serde_json::from_value(serde_json::json!({ "staff_id": li.staff_id })).unwrap();
        edit_dto.leader_staff_id = Some(boss.staff_id.clone());
        edit(ctx.db(), edit_dto).await.unwrap();

        let li = get(ctx.db(), &li.staff_id).await.unwrap();
        assert_eq!(li.leader_name, "Boss");
        assert_eq!(li.staff_name, "Li Lei");

        delete(ctx.db(), &li.staff_id).await.unwrap();
        let creds: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authority WHERE staff_id = ?")
            .bind(&li.staff_id)
            .fetch_one(ctx.db().pool())
            .await
            .unwrap();
        assert_eq!(creds, 0);
    }
}
