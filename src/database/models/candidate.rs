use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Applicant for a posted job. `staff_id` is the interviewer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub candidate_id: String,
    pub staff_id: String,
    pub name: String,
    pub job_name: String,
    pub edu_level: String,
    pub major: String,
    pub experience: String,
    pub describe_info: String,
    pub email: String,
    pub evaluation: String,
    pub status: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStatus {
    Interviewing = 0,
    Rejected = 1,
    Accepted = 2,
}

impl CandidateStatus {
    pub fn code(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateCreate {
    #[serde(default)]
    pub staff_id: String,
    pub name: String,
    #[serde(default)]
    pub job_name: String,
    #[serde(default)]
    pub edu_level: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub describe_info: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateEdit {
    pub id: i64,
    pub staff_id: Option<String>,
    pub name: Option<String>,
    pub job_name: Option<String>,
    pub edu_level: Option<String>,
    pub major: Option<String>,
    pub experience: Option<String>,
    pub describe_info: Option<String>,
    pub email: Option<String>,
    pub evaluation: Option<String>,
}
