use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    pub id: i64,
    pub dep_id: String,
    pub dep_name: String,
    pub dep_describe: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentCreate {
    pub dep_name: String,
    #[serde(default)]
    pub dep_describe: String,
}

/// Fields left out keep their stored value.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentEdit {
    pub id: i64,
    pub dep_name: Option<String>,
    pub dep_describe: Option<String>,
}
