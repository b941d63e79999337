use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Monthly pay definition; at most one per staff member.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Salary {
    pub id: i64,
    pub salary_id: String,
    pub staff_id: String,
    pub staff_name: String,
    pub base: i64,
    pub subsidy: i64,
    pub bonus: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalaryCreate {
    pub staff_id: String,
    #[serde(default)]
    pub staff_name: String,
    pub base: i64,
    #[serde(default)]
    pub subsidy: i64,
    #[serde(default)]
    pub bonus: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalaryEdit {
    pub id: i64,
    pub staff_name: Option<String>,
    pub base: Option<i64>,
    pub subsidy: Option<i64>,
    pub bonus: Option<i64>,
}
