pub mod mongo;
pub mod postgres;

pub use mongo::MongoDB;
pub use postgres::PostgresSource;

use crate::models::{ImcRow, UserRow};
use crate::utils::MigrationError;
use async_trait::async_trait;
use mongodb::bson::Document;

pub const USERS_COLLECTION: &str = "users";
pub const IMC_COLLECTION: &str = "imc";

/// Read side of the migration: the relational tables
#[async_trait]
pub trait SourceStore: Send {
    async fn fetch_users(&mut self) -> Result<Vec<UserRow>, MigrationError>;
    async fn fetch_imc(&mut self) -> Result<Vec<ImcRow>, MigrationError>;
}

/// Write side of the migration: named document collections
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Deletes every document in `collection`, returning how many were removed.
    async fn clear(&self, collection: &str) -> Result<u64, MigrationError>;

    /// Inserts `documents` in order, returning how many were written.
    async fn insert(&self, collection: &str, documents: Vec<Document>) -> Result<usize, MigrationError>;
}
