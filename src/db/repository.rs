use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{
    Goal, NewReserveRequest, NewSelectionRequest, NewTeacherRequest, Reserve, Selection, Teacher,
};

pub async fn fetch_random_teachers(db: &SqlitePool, limit: i64) -> Result<Vec<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(
        "SELECT id, name, about, rating, picture, price, free FROM teachers ORDER BY RANDOM() LIMIT ?"
    )
    .bind(limit)
    .fetch_all(db)
    .await
}

/// Teachers linked to the goal whose `aim` equals `aim` exactly, lowest rating first.
pub async fn fetch_teachers_by_goal(db: &SqlitePool, aim: &str) -> Result<Vec<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(
        r#"
        SELECT t.id, t.name, t.about, t.rating, t.picture, t.price, t.free
        FROM teachers t
        JOIN goals_teachers gt ON gt.teacher_id = t.id
        JOIN goals g ON g.id = gt.goal_id
        WHERE g.aim = ?
        ORDER BY t.rating ASC, t.id ASC
        "#,
    )
    .bind(aim)
    .fetch_all(db)
    .await
}

pub async fn find_teacher_by_id(db: &SqlitePool, id: i64) -> Result<Option<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(
        "SELECT id, name, about, rating, picture, price, free FROM teachers WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn fetch_all_teachers(db: &SqlitePool) -> Result<Vec<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>("SELECT id, name, about, rating, picture, price, free FROM teachers")
        .fetch_all(db)
        .await
}

pub async fn count_teachers(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM teachers")
        .fetch_one(db)
        .await?;
    Ok(count)
}

pub async fn fetch_goals(db: &SqlitePool) -> Result<Vec<Goal>, sqlx::Error> {
    sqlx::query_as::<_, Goal>("SELECT id, aim, value FROM goals ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn find_goal_by_aim(db: &SqlitePool, aim: &str) -> Result<Option<Goal>, sqlx::Error> {
    sqlx::query_as::<_, Goal>("SELECT id, aim, value FROM goals WHERE aim = ?")
        .bind(aim)
        .fetch_optional(db)
        .await
}

pub async fn fetch_goals_for_teacher(db: &SqlitePool, teacher_id: i64) -> Result<Vec<Goal>, sqlx::Error> {
    sqlx::query_as::<_, Goal>(
        r#"
        SELECT g.id, g.aim, g.value
        FROM goals g
        JOIN goals_teachers gt ON gt.goal_id = g.id
        WHERE gt.teacher_id = ?
        ORDER BY g.id
        "#,
    )
    .bind(teacher_id)
    .fetch_all(db)
    .await
}

pub async fn insert_reserve(db: &SqlitePool, req: NewReserveRequest) -> Result<Reserve, sqlx::Error> {
    let now = Utc::now().to_rfc3339();
    let mut tx = db.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO reserves (name, phone, day, time, teacher_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&req.name)
    .bind(&req.phone)
    .bind(&req.day)
    .bind(&req.time)
    .bind(req.teacher_id)
    .bind(&now)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    Ok(Reserve {
        id,
        name: req.name,
        phone: req.phone,
        day: req.day,
        time: req.time,
        teacher_id: req.teacher_id,
        created_at: now,
    })
}

pub async fn fetch_reserves_for_teacher(db: &SqlitePool, teacher_id: i64) -> Result<Vec<Reserve>, sqlx::Error> {
    sqlx::query_as::<_, Reserve>(
        "SELECT id, name, phone, day, time, teacher_id, created_at FROM reserves WHERE teacher_id = ? ORDER BY id"
    )
    .bind(teacher_id)
    .fetch_all(db)
    .await
}

pub async fn insert_selection(db: &SqlitePool, req: NewSelectionRequest) -> Result<Selection, sqlx::Error> {
    let now = Utc::now().to_rfc3339();
    let mut tx = db.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO selections (name, phone, goal, time_learning, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&req.name)
    .bind(&req.phone)
    .bind(&req.goal)
    .bind(&req.time_learning)
    .bind(&now)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    Ok(Selection {
        id,
        name: req.name,
        phone: req.phone,
        goal: req.goal,
        time_learning: req.time_learning,
        created_at: now,
    })
}

pub async fn find_selection_by_id(db: &SqlitePool, id: i64) -> Result<Option<Selection>, sqlx::Error> {
    sqlx::query_as::<_, Selection>(
        "SELECT id, name, phone, goal, time_learning, created_at FROM selections WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

// Seeding primitives. They take a connection so the caller can run them inside one transaction.

/// Inserts the goal unless one with the same `aim` exists; returns its id either way.
pub async fn insert_goal(conn: &mut SqliteConnection, aim: &str, value: &str) -> Result<i64, sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO goals (aim, value) VALUES (?, ?)")
        .bind(aim)
        .bind(value)
        .execute(&mut *conn)
        .await?;

    let (id,) = sqlx::query_as::<_, (i64,)>("SELECT id FROM goals WHERE aim = ?")
        .bind(aim)
        .fetch_one(&mut *conn)
        .await?;
    Ok(id)
}

/// `free` is the already encoded schedule.
pub async fn insert_teacher(
    conn: &mut SqliteConnection,
    teacher: &NewTeacherRequest,
    free: &str,
) -> Result<i64, sqlx::Error> {
    let id = sqlx::query(
        r#"
        INSERT INTO teachers (name, about, rating, picture, price, free)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&teacher.name)
    .bind(&teacher.about)
    .bind(teacher.rating)
    .bind(&teacher.picture)
    .bind(teacher.price)
    .bind(free)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();
    Ok(id)
}

pub async fn link_goal(conn: &mut SqliteConnection, goal_id: i64, teacher_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO goals_teachers (goal_id, teacher_id) VALUES (?, ?)")
        .bind(goal_id)
        .bind(teacher_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
