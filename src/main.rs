use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tutors::api::router;
use tutors::config::Config;
use tutors::db;
use tutors::fixtures::Fixtures;
use tutors::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tutors=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::new_from_env()?;

    let pool = db::connect(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    if config.seed_on_start {
        if config.goals_fixture.exists() && config.teachers_fixture.exists() {
            let fixtures = Fixtures::from_files(&config.goals_fixture, &config.teachers_fixture).await?;
            fixtures.seed(&pool).await?;
        } else {
            warn!(
                "Fixtures {} / {} not found, starting without seed data",
                config.goals_fixture.display(),
                config.teachers_fixture.display()
            );
        }
    }

    let state = AppState { db: pool.clone() };

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
