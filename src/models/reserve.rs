use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reserve {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub day: String,
    pub time: String,
    pub teacher_id: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReserveRequest {
    pub name: String,
    pub phone: String,
    pub day: String,
    pub time: String,
    pub teacher_id: i64,
}
