use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub about: String,
    pub rating: f64,
    pub picture: String,
    pub price: i64,
    /// JSON-encoded [`FreeSlots`].
    pub free: String,
}

impl Teacher {
    pub fn free_slots(&self) -> Result<FreeSlots, AppError> {
        FreeSlots::decode(&self.free)
    }
}

/// Bookable slot identifiers per weekday code, in the order they were seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FreeSlots(pub BTreeMap<String, Vec<String>>);

impl FreeSlots {
    pub fn encode(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn slots(&self, day: &str) -> &[String] {
        self.0.get(day).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// What listings show for a teacher; the raw schedule stays out of it.
#[derive(Debug, Clone, Serialize)]
pub struct TeacherCard {
    pub id: i64,
    pub name: String,
    pub about: String,
    pub rating: f64,
    pub picture: String,
    pub price: i64,
}

impl From<Teacher> for TeacherCard {
    fn from(t: Teacher) -> Self {
        Self {
            id: t.id,
            name: t.name,
            about: t.about,
            rating: t.rating,
            picture: t.picture,
            price: t.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeacherRequest {
    pub name: String,
    pub about: String,
    pub rating: f64,
    pub picture: String,
    pub price: i64,
    pub goals: Vec<String>,
    #[serde(default)]
    pub free: FreeSlots,
}
