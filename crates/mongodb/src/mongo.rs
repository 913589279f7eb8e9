//! MongoDB-backed work order store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bson::{doc, Document};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use std::time::Duration;
use workorder_types::InternalWorkOrder;

use crate::connect::Connector;
use crate::store::{UpsertOutcome, WorkOrderStore};

/// MongoDB connection options
#[derive(Clone, Debug)]
pub struct MongoOpts {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub server_selection_timeout: Duration,
}

/// Opens [`MongoStore`] handles, one ping-verified client per attempt.
pub struct MongoConnector {
    opts: MongoOpts,
}

impl MongoConnector {
    pub fn new(opts: MongoOpts) -> Self {
        Self { opts }
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = MongoStore;

    fn describe(&self) -> String {
        format!(
            "MongoDB collection '{}.{}'",
            self.opts.database, self.opts.collection
        )
    }

    async fn connect(&self) -> Result<MongoStore> {
        let mut options = ClientOptions::parse(&self.opts.uri)
            .await
            .context("Failed to parse MongoDB connection string")?;
        options.connect_timeout = Some(self.opts.server_selection_timeout);
        options.server_selection_timeout = Some(self.opts.server_selection_timeout);

        let client = Client::with_options(options)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;
        tracing::debug!("MongoDB ping succeeded");

        let collection = client
            .database(&self.opts.database)
            .collection::<Document>(&self.opts.collection);
        let store = MongoStore { client, collection };

        // A duplicate `number` already in the collection blocks the index but
        // not the sync itself.
        if let Err(e) = store.ensure_indexes().await {
            tracing::warn!("Could not ensure unique index on work order number: {e:#}");
        }

        Ok(store)
    }

    async fn disconnect(&self, handle: MongoStore) {
        handle.shutdown().await;
    }
}

/// A work order collection on a connected MongoDB client.
pub struct MongoStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoStore {
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }

    /// Enforce uniqueness of the `number` join key.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "number": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl WorkOrderStore for MongoStore {
    async fn upsert(&self, order: &InternalWorkOrder) -> Result<UpsertOutcome> {
        let replacement = order
            .to_document()
            .with_context(|| format!("Failed to encode work order #{}", order.number))?;

        let result = self
            .collection
            .replace_one(doc! { "number": order.number }, replacement)
            .upsert(true)
            .await
            .with_context(|| format!("Failed to upsert work order #{}", order.number))?;

        Ok(if result.upserted_id.is_some() {
            UpsertOutcome::Inserted
        } else if result.modified_count == 0 {
            UpsertOutcome::Unchanged
        } else {
            UpsertOutcome::Replaced
        })
    }

    async fn find_unsynced(&self) -> Result<Vec<Document>> {
        let cursor = self
            .collection
            .find(doc! { "isSynced": false })
            .await
            .context("Failed to query unsynced work orders")?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        tracing::debug!("Found {} unsynced work orders", documents.len());
        Ok(documents)
    }

    async fn mark_synced(&self, number: i64, synced_at: DateTime<Utc>) -> Result<()> {
        let result = self
            .collection
            .update_one(
                doc! { "number": number },
                doc! {
                    "$set": {
                        "isSynced": true,
                        "syncedAt": bson::DateTime::from_chrono(synced_at),
                    }
                },
            )
            .await
            .with_context(|| format!("Failed to mark work order #{number} as synced"))?;

        if result.matched_count == 0 {
            anyhow::bail!("Work order #{number} no longer exists in the store");
        }
        Ok(())
    }
}
