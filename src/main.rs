mod config;
mod database;
mod models;
mod services;
mod utils;

use config::MigrationConfig;
use database::{MongoDB, PostgresSource};
use dotenv::dotenv;
use services::MigrationReport;
use utils::MigrationError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Progress goes to stdout
    env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    log::info!("🚀 Starting PostgreSQL → MongoDB migration...");

    match run().await {
        Ok(report) => {
            log::info!(
                "📊 users: {} cleared, {} inserted | imc: {} cleared, {} inserted",
                report.users.cleared,
                report.users.inserted,
                report.imc.cleared,
                report.imc.inserted
            );
            log::info!("🚀 Migration complete");
        }
        Err(e) => {
            log::error!("❌ Migration failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<MigrationReport, MigrationError> {
    let config = MigrationConfig::from_env()?;

    let mut source = PostgresSource::connect(&config.postgres).await?;
    log::info!("✅ PostgreSQL connected successfully");

    let target = match MongoDB::new(&config.mongo).await {
        Ok(target) => target,
        Err(e) => {
            if let Err(close_err) = source.close().await {
                log::warn!("⚠️  Failed to close PostgreSQL connection: {}", close_err);
            }
            return Err(e);
        }
    };
    log::info!("✅ MongoDB connected successfully");

    let result = services::run_migration(&mut source, &target, config.batch_size).await;

    // Connections are released whether or not the migration succeeded
    let closed = source.close().await;
    target.close().await;

    finish(result, closed)
}

/// The migration error wins over a close error; the latter is only logged.
fn finish(
    result: Result<MigrationReport, MigrationError>,
    closed: Result<(), MigrationError>,
) -> Result<MigrationReport, MigrationError> {
    match result {
        Ok(report) => {
            closed?;
            Ok(report)
        }
        Err(e) => {
            if let Err(close_err) = closed {
                log::warn!("⚠️  Failed to close PostgreSQL connection: {}", close_err);
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_error_is_kept_when_close_also_fails() {
        let result = finish(
            Err(MigrationError::Config("boom".to_string())),
            Err(MigrationError::Source(sqlx::Error::PoolClosed)),
        );

        assert!(matches!(result, Err(MigrationError::Config(msg)) if msg == "boom"));
    }

    #[test]
    fn test_close_error_fails_successful_run() {
        let result = finish(
            Ok(MigrationReport::default()),
            Err(MigrationError::Source(sqlx::Error::PoolClosed)),
        );

        assert!(matches!(result, Err(MigrationError::Source(_))));
    }

    #[test]
    fn test_clean_run_returns_report() {
        let result = finish(Ok(MigrationReport::default()), Ok(()));
        assert_eq!(result.unwrap(), MigrationReport::default());
    }
}
