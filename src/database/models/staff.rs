use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Staff {
    pub id: i64,
    pub staff_id: String,
    pub staff_name: String,
    pub leader_staff_id: String,
    pub leader_name: String,
    /// `YYYY-MM-DD`
    pub birthday: String,
    pub identity_num: String,
    pub sex: i64,
    pub nation: String,
    pub school: String,
    pub major: String,
    pub edu_level: String,
    pub base_salary: i64,
    pub card_num: String,
    pub rank_id: String,
    pub dep_id: String,
    pub email: String,
    pub phone: i64,
    /// `YYYY-MM-DD`
    pub entry_date: String,
}

/// Staff row as listed to clients: department, rank and account type resolved to names.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StaffView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub staff: Staff,
    pub dep_name: String,
    pub rank_name: String,
    #[serde(skip_serializing)]
    pub user_type: String,
    #[sqlx(skip)]
    pub user_type_name: String,
    #[sqlx(skip)]
    pub sex_name: String,
}

impl StaffView {
    pub(crate) fn with_names(mut self) -> Self {
        self.user_type_name = super::UserType::display_name(&self.user_type).to_string();
        self.sex_name = Sex::from_code(self.staff.sex).label().to_string();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Unknown = 0,
    Male = 1,
    Female = 2,
}

impl Sex {
    /// Accepts the numeric code, the Chinese character, or the English word.
    pub fn from_input(raw: &str) -> Self {
        match raw.trim() {
            "1" | "男" => Sex::Male,
            "2" | "女" => Sex::Female,
            other if other.eq_ignore_ascii_case("male") => Sex::Male,
            other if other.eq_ignore_ascii_case("female") => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Sex::Male,
            2 => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "男",
            Sex::Female => "女",
            Sex::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaffCreate {
    pub staff_name: String,
    #[serde(default)]
    pub leader_staff_id: String,
    #[serde(default)]
    pub birthday: String,
    pub identity_num: String,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub nation: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub edu_level: String,
    #[serde(default)]
    pub base_salary: i64,
    #[serde(default)]
    pub card_num: String,
    #[serde(default)]
    pub rank_id: String,
    #[serde(default)]
    pub dep_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: i64,
    #[serde(default)]
    pub entry_date: String,
}

/// Edit by `staff_id`; fields left out keep their stored value.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffEdit {
    pub staff_id: String,
    pub staff_name: Option<String>,
    pub leader_staff_id: Option<String>,
    pub birthday: Option<String>,
    pub identity_num: Option<String>,
    pub sex: Option<String>,
    pub nation: Option<String>,
    pub school: Option<String>,
    pub major: Option<String>,
    pub edu_level: Option<String>,
    pub base_salary: Option<i64>,
    pub card_num: Option<String>,
    pub rank_id: Option<String>,
    pub dep_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<i64>,
    pub entry_date: Option<String>,
}
