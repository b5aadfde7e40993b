// ==================== POSTGRES → MONGODB MIGRATION ====================
// Full replace: both collections are emptied, then refilled row by row
// (or in batches) from the two source tables.

use crate::{
    database::{SourceStore, TargetStore, IMC_COLLECTION, USERS_COLLECTION},
    models::{ImcDocument, UserDocument},
    utils::MigrationError,
};
use mongodb::bson::{self, Document};
use serde::Serialize;

/// Counts for one destination collection
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectionReport {
    pub cleared: u64,
    pub inserted: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub users: CollectionReport,
    pub imc: CollectionReport,
}

/// Runs the migration: clear `users` and `imc`, then copy both tables.
///
/// The first failure aborts the run. Collections cleared before the failure
/// stay empty or partially filled.
pub async fn run_migration<S, T>(
    source: &mut S,
    target: &T,
    batch_size: usize,
) -> Result<MigrationReport, MigrationError>
where
    S: SourceStore + ?Sized,
    T: TargetStore + ?Sized,
{
    let batch_size = batch_size.max(1);
    let mut report = MigrationReport::default();

    // 1. Limpar coleções destino
    report.users.cleared = target.clear(USERS_COLLECTION).await?;
    report.imc.cleared = target.clear(IMC_COLLECTION).await?;
    log::info!(
        "🗑️  Cleared destination collections (users: {}, imc: {})",
        report.users.cleared,
        report.imc.cleared
    );

    // 2. Migrar users
    let users = source.fetch_users().await?;
    let documents = users.into_iter().map(UserDocument::from);
    report.users.inserted = insert_in_batches(target, USERS_COLLECTION, documents, batch_size).await?;
    log::info!("✅ Users migrated ({} documents)", report.users.inserted);

    // 3. Migrar imc
    let rows = source.fetch_imc().await?;
    let documents = rows.into_iter().map(ImcDocument::from);
    report.imc.inserted = insert_in_batches(target, IMC_COLLECTION, documents, batch_size).await?;
    log::info!("✅ IMC records migrated ({} documents)", report.imc.inserted);

    Ok(report)
}

async fn insert_in_batches<T, D, I>(
    target: &T,
    collection: &str,
    documents: I,
    batch_size: usize,
) -> Result<usize, MigrationError>
where
    T: TargetStore + ?Sized,
    D: Serialize,
    I: IntoIterator<Item = D>,
{
    let mut inserted = 0;
    // capacity is capped, batch_size can be large
    let mut batch: Vec<Document> = Vec::with_capacity(batch_size.min(1024));

    for document in documents {
        batch.push(bson::to_document(&document)?);

        if batch.len() == batch_size {
            inserted += target.insert(collection, std::mem::take(&mut batch)).await?;
        }
    }

    if !batch.is_empty() {
        inserted += target.insert(collection, batch).await?;
    }

    log::debug!("Inserted {} documents into {}", inserted, collection);
    Ok(inserted)
}
