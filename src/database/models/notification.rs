use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Notices of this type are also pushed to every staff phone.
pub const URGENT_NOTICE_TYPE: &str = "紧急通知";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub notice_id: String,
    pub notice_title: String,
    pub notice_content: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub notice_type: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationCreate {
    pub notice_title: String,
    pub notice_content: String,
    #[serde(rename = "type", default)]
    pub notice_type: String,
    /// Defaults to the creation time.
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationEdit {
    pub id: i64,
    pub notice_title: Option<String>,
    pub notice_content: Option<String>,
    #[serde(rename = "type")]
    pub notice_type: Option<String>,
    pub date: Option<String>,
}
