use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rank {
    pub id: i64,
    pub rank_id: String,
    pub rank_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankCreate {
    pub rank_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankEdit {
    pub id: i64,
    pub rank_name: String,
}
