#![allow(dead_code)]

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tutors::db;
use tutors::fixtures::Fixtures;

pub const GOALS_JSON: &str = r#"{
    "art": "Для искусства",
    "relocate": "Для переезда",
    "start": "Для старта",
    "study": "Для учебы",
    "travel": "Для путешествий",
    "work": "Для работы"
}"#;

// Seeded in order, so ids are 1..=5.
pub const TEACHERS_JSON: &str = r#"[
    {
        "name": "Anna Petrova",
        "about": "Business English",
        "rating": 4.8,
        "picture": "https://example.com/anna.png",
        "price": 1500,
        "goals": ["work", "travel"],
        "free": {"mon": ["8:00", "10:00"], "tue": []}
    },
    {
        "name": "Boris Lee",
        "about": "Conversation practice",
        "rating": 4.1,
        "picture": "https://example.com/boris.png",
        "price": 900,
        "goals": ["work", "start"],
        "free": {"wed": ["12:00"]}
    },
    {
        "name": "Clara Ortiz",
        "about": "Art history and exam prep",
        "rating": 4.5,
        "picture": "https://example.com/clara.png",
        "price": 1200,
        "goals": ["art", "study"],
        "free": {"mon": ["time_1", "time_2"], "fri": ["time_4", "time_3"]}
    },
    {
        "name": "Dmitri Novak",
        "about": "Absolute beginners",
        "rating": 4.1,
        "picture": "https://example.com/dmitri.png",
        "price": 700,
        "goals": ["start"],
        "free": {}
    },
    {
        "name": "Eva Stone",
        "about": "Interview coaching",
        "rating": 3.9,
        "picture": "https://example.com/eva.png",
        "price": 1100,
        "goals": ["work"],
        "free": {"sun": ["18:00"]}
    }
]"#;

pub async fn empty_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Failed to parse database url")
        .foreign_keys(true);

    // one connection: every connection to :memory: is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to create database");

    db::run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

pub fn fixtures() -> Fixtures {
    Fixtures::from_json(GOALS_JSON, TEACHERS_JSON).expect("Failed to parse fixtures")
}

pub async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;
    fixtures().seed(&pool).await.expect("Failed to seed fixtures");
    pool
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let (count,) = sqlx::query_as::<_, (i64,)>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows");
    count
}
