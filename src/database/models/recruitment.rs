use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recruitment {
    pub id: i64,
    pub recruitment_id: String,
    pub job_name: String,
    pub job_type: String,
    pub base_location: String,
    pub base_salary: String,
    pub edu_level: String,
    pub experience: String,
    pub describe_info: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecruitmentCreate {
    pub job_name: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub base_location: String,
    #[serde(default)]
    pub base_salary: String,
    #[serde(default)]
    pub edu_level: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub describe_info: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecruitmentEdit {
    pub id: i64,
    pub job_name: Option<String>,
    pub job_type: Option<String>,
    pub base_location: Option<String>,
    pub base_salary: Option<String>,
    pub edu_level: Option<String>,
    pub experience: Option<String>,
    pub describe_info: Option<String>,
    pub email: Option<String>,
}
