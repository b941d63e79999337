//! Per-tenant table layout. Every tenant database carries the same tables; the DDL differs
//! between backends only in the auto-increment identity column.

use tracing::info;

use super::registry::{DbKind, TenantDb};

/// Tables in creation order. Dropped in reverse.
pub const TABLES: &[&str] = &[
    "authority",
    "authority_detail",
    "department",
    "`rank`",
    "staff",
    "attendance_record",
    "notification",
    "branch_company",
    "salary",
    "salary_record",
    "recruitment",
    "candidate",
];

fn id_column(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Sqlite => "id INTEGER PRIMARY KEY AUTOINCREMENT",
        DbKind::MySql => "id BIGINT PRIMARY KEY AUTO_INCREMENT",
    }
}

/// `CREATE TABLE IF NOT EXISTS` statements for `kind`, in [`TABLES`] order.
pub fn create_statements(kind: DbKind) -> Vec<String> {
    let id = id_column(kind);
    vec![
        format!(
            "CREATE TABLE IF NOT EXISTS authority (
                {id},
                authority_id VARCHAR(64) NOT NULL,
                staff_id VARCHAR(64) NOT NULL UNIQUE,
                user_password VARCHAR(128) NOT NULL,
                user_type VARCHAR(32) NOT NULL DEFAULT 'normal',
                created_at VARCHAR(32) NOT NULL DEFAULT ''
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS authority_detail (
                {id},
                user_type VARCHAR(32) NOT NULL,
                model VARCHAR(64) NOT NULL,
                name VARCHAR(128) NOT NULL DEFAULT '',
                authority_content TEXT NOT NULL
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS department (
                {id},
                dep_id VARCHAR(64) NOT NULL UNIQUE,
                dep_name VARCHAR(128) NOT NULL UNIQUE,
                dep_describe VARCHAR(512) NOT NULL DEFAULT ''
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS `rank` (
                {id},
                rank_id VARCHAR(64) NOT NULL UNIQUE,
                rank_name VARCHAR(128) NOT NULL UNIQUE
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS staff (
                {id},
                staff_id VARCHAR(64) NOT NULL UNIQUE,
                staff_name VARCHAR(128) NOT NULL,
                leader_staff_id VARCHAR(64) NOT NULL DEFAULT '',
                leader_name VARCHAR(128) NOT NULL DEFAULT '',
                birthday VARCHAR(32) NOT NULL DEFAULT '',
                identity_num VARCHAR(32) NOT NULL UNIQUE,
                sex BIGINT NOT NULL DEFAULT 0,
                nation VARCHAR(64) NOT NULL DEFAULT '',
                school VARCHAR(128) NOT NULL DEFAULT '',
                major VARCHAR(128) NOT NULL DEFAULT '',
                edu_level VARCHAR(64) NOT NULL DEFAULT '',
                base_salary BIGINT NOT NULL DEFAULT 0,
                card_num VARCHAR(64) NOT NULL DEFAULT '',
                rank_id VARCHAR(64) NOT NULL DEFAULT '',
                dep_id VARCHAR(64) NOT NULL DEFAULT '',
                email VARCHAR(128) NOT NULL DEFAULT '',
                phone BIGINT NOT NULL DEFAULT 0,
                entry_date VARCHAR(32) NOT NULL DEFAULT ''
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS attendance_record (
                {id},
                attendance_id VARCHAR(64) NOT NULL UNIQUE,
                staff_id VARCHAR(64) NOT NULL,
                staff_name VARCHAR(128) NOT NULL DEFAULT '',
                date VARCHAR(16) NOT NULL,
                work_days BIGINT NOT NULL DEFAULT 0,
                leave_days BIGINT NOT NULL DEFAULT 0,
                overtime_days BIGINT NOT NULL DEFAULT 0,
                approve BIGINT NOT NULL DEFAULT 0,
                UNIQUE (staff_id, date)
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS notification (
                {id},
                notice_id VARCHAR(64) NOT NULL UNIQUE,
                notice_title VARCHAR(256) NOT NULL,
                notice_content TEXT NOT NULL,
                type VARCHAR(64) NOT NULL DEFAULT '',
                date VARCHAR(32) NOT NULL DEFAULT ''
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS branch_company (
                {id},
                company_id VARCHAR(64) NOT NULL UNIQUE,
                company_name VARCHAR(128) NOT NULL
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS salary (
                {id},
                salary_id VARCHAR(64) NOT NULL UNIQUE,
                staff_id VARCHAR(64) NOT NULL UNIQUE,
                staff_name VARCHAR(128) NOT NULL DEFAULT '',
                base BIGINT NOT NULL DEFAULT 0,
                subsidy BIGINT NOT NULL DEFAULT 0,
                bonus BIGINT NOT NULL DEFAULT 0
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS salary_record (
                {id},
                salary_record_id VARCHAR(64) NOT NULL UNIQUE,
                staff_id VARCHAR(64) NOT NULL,
                staff_name VARCHAR(128) NOT NULL DEFAULT '',
                base BIGINT NOT NULL DEFAULT 0,
                subsidy BIGINT NOT NULL DEFAULT 0,
                bonus BIGINT NOT NULL DEFAULT 0,
                overtime BIGINT NOT NULL DEFAULT 0,
                deduction BIGINT NOT NULL DEFAULT 0,
                total BIGINT NOT NULL DEFAULT 0,
                salary_date VARCHAR(16) NOT NULL,
                is_pay BIGINT NOT NULL DEFAULT 0
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS recruitment (
                {id},
                recruitment_id VARCHAR(64) NOT NULL UNIQUE,
                job_name VARCHAR(128) NOT NULL,
                job_type VARCHAR(64) NOT NULL DEFAULT '',
                base_location VARCHAR(128) NOT NULL DEFAULT '',
                base_salary VARCHAR(64) NOT NULL DEFAULT '',
                edu_level VARCHAR(64) NOT NULL DEFAULT '',
                experience VARCHAR(64) NOT NULL DEFAULT '',
                describe_info TEXT NOT NULL,
                email VARCHAR(128) NOT NULL DEFAULT ''
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS candidate (
                {id},
                candidate_id VARCHAR(64) NOT NULL UNIQUE,
                staff_id VARCHAR(64) NOT NULL DEFAULT '',
                name VARCHAR(128) NOT NULL,
                job_name VARCHAR(128) NOT NULL DEFAULT '',
                edu_level VARCHAR(64) NOT NULL DEFAULT '',
                major VARCHAR(128) NOT NULL DEFAULT '',
                experience VARCHAR(64) NOT NULL DEFAULT '',
                describe_info TEXT NOT NULL,
                email VARCHAR(128) NOT NULL DEFAULT '',
                evaluation TEXT NOT NULL,
                status BIGINT NOT NULL DEFAULT 0
            )"
        ),
    ]
}

/// Create every table on `db`. Safe to run repeatedly.
pub async fn migrate(db: &TenantDb) -> Result<(), sqlx::Error> {
    info!("Migrating tenant database: {}", db.name());
    let mut tx = db.begin().await?;
    for statement in create_statements(db.kind()) {
        sqlx::query(&statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!("Tenant database migrated: {}", db.name());
    Ok(())
}

/// Drop every table on `db`.
pub async fn reset(db: &TenantDb) -> Result<(), sqlx::Error> {
    info!("Resetting tenant database: {}", db.name());
    for table in TABLES.iter().rev() {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(db.pool())
            .await?;
    }
    Ok(())
}
