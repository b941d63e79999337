use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BranchCompany {
    pub id: i64,
    pub company_id: String,
    pub company_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchCompanyCreate {
    pub company_id: String,
    pub company_name: String,
}
