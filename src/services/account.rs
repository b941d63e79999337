//! Login against a branch company's credential table. The issued token is what every
//! protected route resolves on later requests.

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use super::{hash_password, now_timestamp, random_id, require, verify_password, ServiceResult};
use crate::database::models::UserType;
use crate::database::{TenantDb, TenantRegistry};
use crate::tenant::{tenant_database_name, IdentityToken};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub branch_id: String,
    pub staff_id: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown branch, unknown staff id, wrong password or an unencodable id. Callers must
    /// not be told which.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Check the credential on the branch's own database and build the token to hand back.
pub async fn login(registry: &TenantRegistry, req: &LoginRequest) -> Result<IdentityToken, LoginError> {
    let db = registry
        .lookup(&tenant_database_name(&req.branch_id))
        .ok_or(LoginError::InvalidCredentials)?;

    let row: Option<(String, String)> =
        sqlx::query_as("SELECT user_password, user_type FROM authority WHERE staff_id = ?")
            .bind(&req.staff_id)
            .fetch_optional(db.pool())
            .await?;

    let (stored_hash, user_type) = row.ok_or(LoginError::InvalidCredentials)?;
    if !verify_password(&req.password, &stored_hash) {
        warn!("Login rejected on {}", db.name());
        return Err(LoginError::InvalidCredentials);
    }

    let token = IdentityToken::new(user_type, req.staff_id.clone(), req.branch_id.clone())
        .map_err(|_| LoginError::InvalidCredentials)?;
    info!("Login accepted on {}", db.name());
    Ok(token)
}

/// Staff id of the built-in super administrator.
pub const ROOT_STAFF_ID: &str = "root";

/// Create the `root` credential if the branch has none. Returns whether a row was written.
pub async fn seed_root(db: &TenantDb, password: &str) -> ServiceResult<bool> {
    require("password", password)?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authority WHERE staff_id = ?")
        .bind(ROOT_STAFF_ID)
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    sqlx::query(
        "INSERT INTO authority (authority_id, staff_id, user_password, user_type, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(random_id("auth"))
    .bind(ROOT_STAFF_ID)
    .bind(hash_password(password))
    .bind(UserType::Supersys.as_str())
    .bind(now_timestamp())
    .execute(db.pool())
    .await?;
    info!("Seeded root credential in {}", db.name());
    Ok(true)
}
