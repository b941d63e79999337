use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Monthly attendance sheet of one staff member. `date` is `YYYY-MM`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub attendance_id: String,
    pub staff_id: String,
    pub staff_name: String,
    pub date: String,
    pub work_days: i64,
    pub leave_days: i64,
    pub overtime_days: i64,
    pub approve: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproveStatus {
    Pending = 0,
    Accepted = 1,
    Rejected = 2,
}

impl ApproveStatus {
    pub fn code(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceCreate {
    pub staff_id: String,
    #[serde(default)]
    pub staff_name: String,
    pub date: String,
    #[serde(default)]
    pub work_days: i64,
    #[serde(default)]
    pub leave_days: i64,
    #[serde(default)]
    pub overtime_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceEdit {
    pub id: i64,
    pub date: Option<String>,
    pub work_days: Option<i64>,
    pub leave_days: Option<i64>,
    pub overtime_days: Option<i64>,
}
