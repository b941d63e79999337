use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One month's computed pay. Created when that month's attendance is approved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SalaryRecord {
    pub id: i64,
    pub salary_record_id: String,
    pub staff_id: String,
    pub staff_name: String,
    pub base: i64,
    pub subsidy: i64,
    pub bonus: i64,
    pub overtime: i64,
    pub deduction: i64,
    pub total: i64,
    /// `YYYY-MM`
    pub salary_date: String,
    /// 0 unpaid, 1 paid.
    pub is_pay: i64,
}

impl SalaryRecord {
    pub fn paid(&self) -> bool {
        self.is_pay != 0
    }
}
