use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub goals_fixture: PathBuf,
    pub teachers_fixture: PathBuf,
    pub seed_on_start: bool,
}

impl Config {
    /// Reads the process environment; call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn new_from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://tutors.db".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is not a socket address: {}", e)))?;

        let goals_fixture: PathBuf = env::var("GOALS_FIXTURE")
            .unwrap_or_else(|_| "./static/goals.json".to_string())
            .into();
        let teachers_fixture: PathBuf = env::var("TEACHERS_FIXTURE")
            .unwrap_or_else(|_| "./static/teachers.json".to_string())
            .into();

        let seed_on_start = match env::var("SEED_ON_START") {
            Ok(value) => parse_flag(&value)
                .ok_or_else(|| AppError::Config(format!("SEED_ON_START must be true or false, got {:?}", value)))?,
            Err(_) => true,
        };

        Ok(Self {
            database_url,
            bind_addr,
            goals_fixture,
            teachers_fixture,
            seed_on_start,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
