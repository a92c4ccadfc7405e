use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Selection {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub goal: String,
    pub time_learning: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSelectionRequest {
    pub name: String,
    pub phone: String,
    pub goal: String,
    pub time_learning: String,
}
