//! Monthly attendance sheets and their approval. Accepting a sheet prices the month against
//! the staff member's salary definition.

use serde::Serialize;
use tracing::info;

use super::{
    is_all, random_id, require, salary, unique_conflict, validate_month, ServiceError, ServiceResult, MAX_MONTH_DAYS,
};
use crate::database::models::{ApproveStatus, AttendanceCreate, AttendanceEdit, AttendanceRecord, Salary};
use crate::database::{Page, PageQuery, QueryBuilder, TenantDb};

/// Working days a monthly base salary is spread over.
const DAYS_PER_MONTH: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayBreakdown {
    pub overtime: i64,
    pub deduction: i64,
    pub total: i64,
}

/// `total = base + subsidy + bonus + overtime - deduction`, floored at zero, with both overtime
/// and leave priced at `base / 30` per day. Results outside `i64` are a validation error.
pub fn compute_pay(salary: &Salary, record: &AttendanceRecord) -> ServiceResult<PayBreakdown> {
    let out_of_range = || ServiceError::Validation(format!("Pay for {} in {} is out of range", record.staff_id, record.date));

    let daily = salary.base / DAYS_PER_MONTH;
    let overtime = record.overtime_days.checked_mul(daily).ok_or_else(out_of_range)?;
    let deduction = record.leave_days.checked_mul(daily).ok_or_else(out_of_range)?;
    let total = salary
        .base
        .checked_add(salary.subsidy)
        .and_then(|v| v.checked_add(salary.bonus))
        .and_then(|v| v.checked_add(overtime))
        .and_then(|v| v.checked_sub(deduction))
        .ok_or_else(out_of_range)?
        .max(0);

    Ok(PayBreakdown {
        overtime,
        deduction,
        total,
    })
}

fn check_days(work: i64, leave: i64, overtime: i64) -> ServiceResult<()> {
    if [work, leave, overtime].iter().any(|d| !(0..=MAX_MONTH_DAYS).contains(d)) {
        return Err(ServiceError::Validation(format!(
            "Day counts must be between 0 and {}",
            MAX_MONTH_DAYS
        )));
    }
    Ok(())
}

pub async fn create(db: &TenantDb, dto: AttendanceCreate) -> ServiceResult<AttendanceRecord> {
    require("staff_id", &dto.staff_id)?;
    validate_month(&dto.date)?;
    check_days(dto.work_days, dto.leave_days, dto.overtime_days)?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance_record WHERE staff_id = ? AND date = ?")
        .bind(&dto.staff_id)
        .bind(&dto.date)
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        return Err(ServiceError::Conflict(format!(
            "Attendance for {} in {} already exists",
            dto.staff_id, dto.date
        )));
    }

    let attendance_id = random_id("attend");
    sqlx::query(
        "INSERT INTO attendance_record (attendance_id, staff_id, staff_name, date, work_days, leave_days, overtime_days, approve) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&attendance_id)
    .bind(&dto.staff_id)
    .bind(&dto.staff_name)
    .bind(&dto.date)
    .bind(dto.work_days)
    .bind(dto.leave_days)
    .bind(dto.overtime_days)
    .bind(ApproveStatus::Pending.code())
    .execute(db.pool())
    .await
    .map_err(|e| {
        unique_conflict(e, || {
            format!("Attendance for {} in {} already exists", dto.staff_id, dto.date)
        })
    })?;

    get(db, &attendance_id).await
}

pub async fn get(db: &TenantDb, attendance_id: &str) -> ServiceResult<AttendanceRecord> {
    QueryBuilder::new("SELECT * FROM attendance_record")
        .filter("attendance_id = ?", attendance_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Attendance {}", attendance_id)))
}

/// Only pending sheets can be edited.
pub async fn edit(db: &TenantDb, dto: AttendanceEdit) -> ServiceResult<()> {
    if let Some(date) = &dto.date {
        validate_month(date)?;
    }
    check_days(
        dto.work_days.unwrap_or(0),
        dto.leave_days.unwrap_or(0),
        dto.overtime_days.unwrap_or(0),
    )?;

    let current: AttendanceRecord = sqlx::query_as("SELECT * FROM attendance_record WHERE id = ?")
        .bind(dto.id)
        .fetch_optional(db.pool())
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Attendance #{}", dto.id)))?;
    if current.approve != ApproveStatus::Pending.code() {
        return Err(ServiceError::Conflict("Attendance has already been reviewed".to_string()));
    }

    if let Some(date) = dto.date.as_deref().filter(|d| *d != current.date) {
        let clash: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance_record WHERE staff_id = ? AND date = ?")
            .bind(&current.staff_id)
            .bind(date)
            .fetch_one(db.pool())
            .await?;
        if clash > 0 {
            return Err(ServiceError::Conflict(format!("Attendance for {} already exists", date)));
        }
    }

    sqlx::query(
        "UPDATE attendance_record SET \
         date = COALESCE(?, date), \
         work_days = COALESCE(?, work_days), \
         leave_days = COALESCE(?, leave_days), \
         overtime_days = COALESCE(?, overtime_days) \
         WHERE id = ?",
    )
    .bind(dto.date)
    .bind(dto.work_days)
    .bind(dto.leave_days)
    .bind(dto.overtime_days)
    .bind(dto.id)
    .execute(db.pool())
    .await
    .map_err(|e| unique_conflict(e, || format!("Attendance for {} already exists in that month", current.staff_id)))?;
    Ok(())
}

pub async fn delete(db: &TenantDb, attendance_id: &str) -> ServiceResult<()> {
    let result = sqlx::query("DELETE FROM attendance_record WHERE attendance_id = ?")
        .bind(attendance_id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("Attendance {}", attendance_id)));
    }
    Ok(())
}

/// Pending sheets of `staff_id`, or of everyone for `all`.
pub async fn query(db: &TenantDb, staff_id: &str, page: PageQuery) -> ServiceResult<Page<AttendanceRecord>> {
    let pending = format!("approve = {}", ApproveStatus::Pending.code());
    if is_all(staff_id) {
        let items = QueryBuilder::new("SELECT * FROM attendance_record")
            .filter_raw(&pending)
            .order_by("date DESC, id DESC")
            .fetch_all(db, page)
            .await?;
        let total = QueryBuilder::new("SELECT COUNT(*) FROM attendance_record")
            .filter_raw(&pending)
            .count(db)
            .await?;
        return Ok(Page { total, items });
    }

    let items = QueryBuilder::new("SELECT * FROM attendance_record")
        .filter("staff_id = ?", staff_id)
        .filter_raw(&pending)
        .order_by("date DESC, id DESC")
        .fetch_all(db, page)
        .await?;
    Ok(Page::of_returned(items))
}

/// Every sheet of `staff_id` regardless of review state.
pub async fn history(db: &TenantDb, staff_id: &str, page: PageQuery) -> ServiceResult<Page<AttendanceRecord>> {
    let items = QueryBuilder::new("SELECT * FROM attendance_record")
        .filter("staff_id = ?", staff_id)
        .order_by("date DESC, id DESC")
        .fetch_all(db, page)
        .await?;
    Ok(Page::of_returned(items))
}

/// Pending sheets of the staff reporting to `leader_staff_id`.
pub async fn approval_queue(db: &TenantDb, leader_staff_id: &str) -> ServiceResult<Page<AttendanceRecord>> {
    let items = QueryBuilder::new("SELECT * FROM attendance_record")
        .filter(
            "staff_id IN (SELECT staff_id FROM staff WHERE leader_staff_id = ?)",
            leader_staff_id,
        )
        .filter_raw(&format!("approve = {}", ApproveStatus::Pending.code()))
        .order_by("date DESC, id DESC")
        .fetch_all(db, PageQuery::all())
        .await?;
    Ok(Page::of_returned(items))
}

/// Whether the salary for `staff_id` in month `date` has been paid.
pub async fn is_pay(db: &TenantDb, staff_id: &str, date: &str) -> ServiceResult<bool> {
    let paid: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM salary_record WHERE staff_id = ? AND salary_date = ? AND is_pay = 1")
            .bind(staff_id)
            .bind(date)
            .fetch_one(db.pool())
            .await?;
    Ok(paid > 0)
}

async fn load_for_review(
    tx: &mut sqlx::Transaction<'static, sqlx::Any>,
    attendance_id: &str,
) -> ServiceResult<AttendanceRecord> {
    let record: AttendanceRecord = sqlx::query_as("SELECT * FROM attendance_record WHERE attendance_id = ?")
        .bind(attendance_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Attendance {}", attendance_id)))?;

    let paid: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM salary_record WHERE staff_id = ? AND salary_date = ? AND is_pay = 1")
            .bind(&record.staff_id)
            .bind(&record.date)
            .fetch_one(&mut **tx)
            .await?;
    if paid > 0 {
        return Err(ServiceError::Conflict(format!(
            "Salary for {} in {} has already been paid",
            record.staff_id, record.date
        )));
    }
    Ok(record)
}

/// Accept the sheet and (re)compute that month's salary record, both in one transaction.
pub async fn approve_accept(db: &TenantDb, attendance_id: &str) -> ServiceResult<PayBreakdown> {
    let salary = {
        let record = get(db, attendance_id).await?;
        match salary::get(db, &record.staff_id).await {
            Ok(salary) => salary,
            Err(ServiceError::NotFound(_)) => {
                return Err(ServiceError::Validation(format!(
                    "No salary defined for {}",
                    record.staff_id
                )))
            }
            Err(e) => return Err(e),
        }
    };

    let mut tx = db.begin().await?;
    let record = load_for_review(&mut tx, attendance_id).await?;
    let pay = compute_pay(&salary, &record)?;

    sqlx::query("DELETE FROM salary_record WHERE staff_id = ? AND salary_date = ? AND is_pay = 0")
        .bind(&record.staff_id)
        .bind(&record.date)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO salary_record (salary_record_id, staff_id, staff_name, base, subsidy, bonus, overtime, deduction, total, salary_date, is_pay) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)",
    )
    .bind(random_id("salary_record"))
    .bind(&record.staff_id)
    .bind(&record.staff_name)
    .bind(salary.base)
    .bind(salary.subsidy)
    .bind(salary.bonus)
    .bind(pay.overtime)
    .bind(pay.deduction)
    .bind(pay.total)
    .bind(&record.date)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE attendance_record SET approve = ? WHERE attendance_id = ?")
        .bind(ApproveStatus::Accepted.code())
        .bind(attendance_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(
        "Accepted attendance {} in {}: total {}",
        attendance_id,
        db.name(),
        pay.total
    );
    Ok(pay)
}

/// Reject the sheet and drop any unpaid salary record computed from it.
pub async fn approve_reject(db: &TenantDb, attendance_id: &str) -> ServiceResult<()> {
    let mut tx = db.begin().await?;
    let record = load_for_review(&mut tx, attendance_id).await?;

    sqlx::query("DELETE FROM salary_record WHERE staff_id = ? AND salary_date = ? AND is_pay = 0")
        .bind(&record.staff_id)
        .bind(&record.date)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE attendance_record SET approve = ? WHERE attendance_id = ?")
        .bind(ApproveStatus::Rejected.code())
        .bind(attendance_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}
