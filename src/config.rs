use crate::utils::MigrationError;
use sqlx::postgres::PgSslMode;
use std::env;

const DEFAULT_PG_HOST: &str = "localhost";
const DEFAULT_PG_PORT: u16 = 5432;
const DEFAULT_MONGODB_DATABASE: &str = "db_imc";
const DEFAULT_BATCH_SIZE: usize = 1;
/// MongoDB's `maxWriteBatchSize`
pub const MAX_BATCH_SIZE: usize = 100_000;

/// Connection settings for the source PostgreSQL database
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub ssl_mode: PgSslMode,
}

/// Connection settings for the destination MongoDB database
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub postgres: PostgresConfig,
    pub mongo: MongoConfig,
    /// Documents per insert call; `1` means one `insert_one` per row.
    pub batch_size: usize,
}

impl MigrationConfig {
    /// Reads the configuration from the process environment.
    /// Call `dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, MigrationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, MigrationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| MigrationError::Config(format!("{} must be set", key)))
        };

        let port = match lookup("PG_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| MigrationError::Config(format!("Invalid PG_PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PG_PORT,
        };

        let ssl_mode = match lookup("PG_SSL_MODE") {
            Some(raw) => raw.trim().parse::<PgSslMode>().map_err(|e| {
                MigrationError::Config(format!("Invalid PG_SSL_MODE '{}': {}", raw, e))
            })?,
            None => PgSslMode::Prefer,
        };

        let batch_size = match lookup("MIGRATION_BATCH_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if (1..=MAX_BATCH_SIZE).contains(&size) => size,
                _ => {
                    return Err(MigrationError::Config(format!(
                        "Invalid MIGRATION_BATCH_SIZE '{}': expected an integer between 1 and {}",
                        raw, MAX_BATCH_SIZE
                    )))
                }
            },
            None => DEFAULT_BATCH_SIZE,
        };

        let postgres = PostgresConfig {
            host: lookup("PG_HOST").unwrap_or_else(|| DEFAULT_PG_HOST.to_string()),
            port,
            database: required("PG_DATABASE")?,
            user: required("PG_USER")?,
            password: required("PG_PASSWORD")?,
            ssl_mode,
        };

        let mongo = MongoConfig {
            uri: required("MONGODB_URI")?,
            database: lookup("MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_MONGODB_DATABASE.to_string()),
        };

        Ok(Self {
            postgres,
            mongo,
            batch_size,
        })
    }
}
