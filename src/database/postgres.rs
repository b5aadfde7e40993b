use super::SourceStore;
use crate::config::PostgresConfig;
use crate::models::{ImcRow, UserRow};
use crate::utils::MigrationError;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

pub const USERS_QUERY: &str = "SELECT id, email, password FROM users";
pub const IMC_QUERY: &str = "SELECT id, peso, altura, imc, categoria, fecha, user_id FROM imc";

/// Single read-only connection to the source database
pub struct PostgresSource {
    conn: PgConnection,
}

impl PostgresSource {
    pub async fn connect(config: &PostgresConfig) -> Result<Self, MigrationError> {
        log::info!(
            "🐘 Connecting to PostgreSQL at {}:{} (database: {})",
            config.host,
            config.port,
            config.database
        );

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password)
            .ssl_mode(config.ssl_mode);

        let conn = PgConnection::connect_with(&options).await?;

        Ok(Self { conn })
    }

    pub async fn close(self) -> Result<(), MigrationError> {
        self.conn.close().await?;
        log::info!("🔌 PostgreSQL connection closed");
        Ok(())
    }
}

#[async_trait]
impl SourceStore for PostgresSource {
    async fn fetch_users(&mut self) -> Result<Vec<UserRow>, MigrationError> {
        let rows = sqlx::query_as::<_, UserRow>(USERS_QUERY)
            .fetch_all(&mut self.conn)
            .await?;

        log::debug!("Fetched {} rows from users", rows.len());
        Ok(rows)
    }

    async fn fetch_imc(&mut self) -> Result<Vec<ImcRow>, MigrationError> {
        let rows = sqlx::query_as::<_, ImcRow>(IMC_QUERY)
            .fetch_all(&mut self.conn)
            .await?;

        log::debug!("Fetched {} rows from imc", rows.len());
        Ok(rows)
    }
}
