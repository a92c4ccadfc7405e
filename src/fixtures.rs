//! One-shot population of goals and teachers from JSON fixtures.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::repository;
use crate::error::AppError;
use crate::models::NewTeacherRequest;

#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    /// Goal key to display label.
    pub goals: BTreeMap<String, String>,
    pub teachers: Vec<NewTeacherRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedStats {
    pub goals: usize,
    pub teachers: usize,
}

impl Fixtures {
    pub fn from_json(goals: &str, teachers: &str) -> Result<Self, AppError> {
        Ok(Self {
            goals: serde_json::from_str(goals)?,
            teachers: serde_json::from_str(teachers)?,
        })
    }

    pub async fn from_files(goals: &Path, teachers: &Path) -> Result<Self, AppError> {
        let goals_raw = tokio::fs::read_to_string(goals).await?;
        let teachers_raw = tokio::fs::read_to_string(teachers).await?;
        Self::from_json(&goals_raw, &teachers_raw)
    }

    /// Writes everything in one transaction. Does nothing when the store already has teachers.
    pub async fn seed(&self, db: &SqlitePool) -> Result<Option<SeedStats>, AppError> {
        let existing = repository::count_teachers(db).await?;
        if existing > 0 {
            info!("Store already has {} teachers, skipping seed", existing);
            return Ok(None);
        }

        let mut tx = db.begin().await?;

        let mut goal_ids = HashMap::with_capacity(self.goals.len());
        for (aim, value) in &self.goals {
            let id = repository::insert_goal(&mut tx, aim, value).await?;
            goal_ids.insert(aim.as_str(), id);
        }

        for teacher in &self.teachers {
            let free = teacher.free.encode()?;
            let teacher_id = repository::insert_teacher(&mut tx, teacher, &free).await?;
            for aim in &teacher.goals {
                let goal_id = goal_ids.get(aim.as_str()).ok_or_else(|| {
                    AppError::Fixture(format!("teacher {:?} refers to unknown goal {:?}", teacher.name, aim))
                })?;
                repository::link_goal(&mut tx, *goal_id, teacher_id).await?;
            }
            if teacher.goals.is_empty() {
                warn!("Teacher {:?} has no goals and will only show up in full listings", teacher.name);
            }
        }

        tx.commit().await?;

        let stats = SeedStats {
            goals: self.goals.len(),
            teachers: self.teachers.len(),
        };
        info!("Seeded {} goals and {} teachers", stats.goals, stats.teachers);
        Ok(Some(stats))
    }
}
