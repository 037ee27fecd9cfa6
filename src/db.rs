use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{config::Config, error::AppResult};

#[derive(Clone, Copy, Debug)]
pub struct PoolSettings {
    /// Also bounds the idle connections the pool keeps around.
    pub max_connections: u32,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self { max_connections: 10, max_lifetime: Duration::from_secs(3 * 60) }
    }
}

pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    tracing::info!(url = %config.redacted_database_url(), "connecting to database");
    let db = connect_with(&config.database_url(), PoolSettings::default()).await?;
    tracing::info!("database connected");
    Ok(db)
}

/// Opens the pool and pings it once. There is no retry.
pub async fn connect_with(database_url: &str, settings: PoolSettings) -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(settings.max_connections)
        .max_lifetime(settings.max_lifetime);

    let db = Database::connect(opts).await?;
    db.ping().await?;
    Ok(db)
}
