use super::TargetStore;
use crate::config::MongoConfig;
use crate::utils::MigrationError;
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;

pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(config: &MongoConfig) -> Result<Self, MigrationError> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;

        // One sequential writer, no need for a pool
        client_options.max_pool_size = Some(1);
        client_options.app_name = Some("imc-migrator".to_string());

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let hosts = client_options
            .hosts
            .iter()
            .map(|host| host.to_string())
            .collect::<Vec<_>>()
            .join(",");

        log::info!("🍃 Connecting to MongoDB at {} (database: {})", hosts, config.database);

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);

        // Test connection before anything gets deleted
        db.list_collection_names().await?;

        Ok(Self { client, db })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub async fn close(self) {
        self.client.shutdown().await;
        log::info!("🔌 MongoDB client closed");
    }
}

#[async_trait]
impl TargetStore for MongoDB {
    async fn clear(&self, collection: &str) -> Result<u64, MigrationError> {
        let result = self
            .collection::<Document>(collection)
            .delete_many(doc! {})
            .await?;

        Ok(result.deleted_count)
    }

    async fn insert(&self, collection: &str, documents: Vec<Document>) -> Result<usize, MigrationError> {
        let collection = self.collection::<Document>(collection);

        match documents.as_slice() {
            [] => Ok(0),
            [document] => {
                collection.insert_one(document).await?;
                Ok(1)
            }
            _ => {
                let result = collection.insert_many(&documents).await?;
                Ok(result.inserted_ids.len())
            }
        }
    }
}
