//! Feature services. Every operation takes the request's resolved tenant handle as its first
//! argument and never selects a database on its own.

pub mod account;
pub mod attendance;
pub mod authority;
pub mod candidate;
pub mod company;
pub mod department;
pub mod notification;
pub mod password;
pub mod rank;
pub mod recruitment;
pub mod salary;
pub mod salary_record;
pub mod sms;
pub mod staff;

use chrono::{NaiveDate, Utc};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Largest money amount a salary field may hold.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Largest day count on a monthly attendance sheet.
pub const MAX_MONTH_DAYS: i64 = 31;

/// Map a unique-key violation to a conflict with `message`; any other error stays a database error.
pub(crate) fn unique_conflict(err: sqlx::Error, message: impl FnOnce() -> String) -> ServiceError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => ServiceError::Conflict(message()),
        _ => ServiceError::Database(err),
    }
}

/// Every amount must lie in `0..=MAX_AMOUNT`.
pub(crate) fn check_amounts(amounts: &[i64]) -> ServiceResult<()> {
    if amounts.iter().any(|v| !(0..=MAX_AMOUNT).contains(v)) {
        return Err(ServiceError::Validation(format!(
            "Salary amounts must be between 0 and {}",
            MAX_AMOUNT
        )));
    }
    Ok(())
}

/// `{prefix}_{32 hex chars}`
pub fn random_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// `H` followed by five digits. Callers check for collisions.
pub fn random_staff_id() -> String {
    format!("H{:05}", Uuid::new_v4().as_u128() % 100_000)
}

/// Hex SHA-256 of the password.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

/// `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Accepts `YYYY-MM`; attendance and salary records are keyed by month.
pub fn validate_month(raw: &str) -> ServiceResult<()> {
    NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ServiceError::Validation(format!("'{}' is not a month (YYYY-MM)", raw)))
}

/// Accepts an empty string or `YYYY-MM-DD`.
pub fn validate_date(field: &str, raw: &str) -> ServiceResult<()> {
    if raw.is_empty() {
        return Ok(());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ServiceError::Validation(format!("{} must be YYYY-MM-DD", field)))
}

pub(crate) fn require(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Path value meaning "no filter".
pub(crate) fn is_all(value: &str) -> bool {
    value == "all"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_bounded() {
        assert!(check_amounts(&[0, MAX_AMOUNT]).is_ok());
        assert!(matches!(check_amounts(&[-1]), Err(ServiceError::Validation(_))));
        assert!(matches!(check_amounts(&[i64::MAX / 2]), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn non_unique_errors_stay_database_errors() {
        let err = unique_conflict(sqlx::Error::RowNotFound, || "dup".to_string());
        assert!(matches!(err, ServiceError::Database(_)));
    }

    #[test]
    fn ids_carry_prefix() {
        let id = random_id("dep");
        assert!(id.starts_with("dep_"));
        assert_eq!(id.len(), "dep_".len() + 32);

        let staff = random_staff_id();
        assert_eq!(staff.len(), 6);
        assert!(staff.starts_with('H'));
        assert!(staff[1..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("123456");
        assert_eq!(hash.len(), 64);
        assert!(verify_password("123456", &hash));
        assert!(!verify_password("654321", &hash));
    }

    #[test]
    fn month_and_date_validation() {
        assert!(validate_month("2024-02").is_ok());
        assert!(validate_month("2024-13").is_err());
        assert!(validate_month("2024/02").is_err());
        assert!(validate_date("birthday", "").is_ok());
        assert!(validate_date("birthday", "1990-07-01").is_ok());
        assert!(validate_date("birthday", "1990-7").is_err());
    }
}
