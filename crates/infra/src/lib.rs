mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{Repos, UpdateResult};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct StewardContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl StewardContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> StewardContext {
    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(postgres_connection_string) => {
            info!("{} env var was provided. Going to use postgres.", PSQL_CONNECTION_STRING);
            StewardContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        Err(_) => {
            warn!(
                "{} env var was not provided. Going to use inmemory infra, nothing will be persisted.",
                PSQL_CONNECTION_STRING
            );
            StewardContext::create_inmemory()
        }
    }
}

/// Runs the embedded migrations, does nothing when postgres is not used
pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => connection_string,
        Err(_) => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}

/// Contexts the repository tests run against: always the inmemory one,
/// and postgres as well when `DATABASE_URL` is set
#[cfg(test)]
pub(crate) async fn create_test_contexts() -> Vec<StewardContext> {
    let mut contexts = vec![StewardContext::create_inmemory()];
    if let Ok(postgres_connection_string) = std::env::var(PSQL_CONNECTION_STRING) {
        run_migration().await.expect("To run migrations");
        contexts.push(
            StewardContext::create(ContextParams {
                postgres_connection_string,
            })
            .await,
        );
    }
    contexts
}
