use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use mongodb::{
    bson::{doc, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Client, IndexModel,
};
use tokio::sync::RwLock;

use crate::config::{Settings, StorageKind};

// single id sequence shared by every collection
const SEQUENCE_ID: &str = "sequenceGenerator";

#[derive(Clone)]
pub enum Database {
    Mongo(mongodb::Database),
    Memory(MemoryDb),
}

/// In-process storage: one ordered map of JSON documents per collection.
#[derive(Clone, Default)]
pub struct MemoryDb {
    pub(crate) collections: Arc<RwLock<HashMap<String, BTreeMap<i64, serde_json::Value>>>>,
    sequence: Arc<AtomicI64>,
}

impl Database {
    pub fn memory() -> Self {
        Database::Memory(MemoryDb::default())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Database::Mongo(_) => "mongodb",
            Database::Memory(_) => "memory",
        }
    }

    pub async fn next_id(&self) -> Result<i64, String> {
        match self {
            Database::Memory(mem) => Ok(mem.sequence.fetch_add(1, Ordering::SeqCst) + 1),
            Database::Mongo(db) => {
                let counters = db.collection::<Document>("counters");
                let opts = FindOneAndUpdateOptions::builder()
                    .upsert(true)
                    .return_document(ReturnDocument::After)
                    .build();

                let counter = counters
                    .find_one_and_update(
                        doc! { "_id": SEQUENCE_ID },
                        doc! { "$inc": { "seq": 1_i64 } },
                        opts,
                    )
                    .await
                    .map_err(|e| e.to_string())?
                    .ok_or_else(|| "id sequence missing after upsert".to_string())?;

                counter.get_i64("seq").map_err(|e| e.to_string())
            }
        }
    }

    pub async fn ping(&self) -> Result<(), String> {
        match self {
            Database::Memory(_) => Ok(()),
            Database::Mongo(db) => db
                .run_command(doc! { "ping": 1 }, None)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string()),
        }
    }
}

pub async fn connect(settings: &Settings) -> Result<Database, String> {
    match settings.storage {
        StorageKind::Memory => Ok(Database::memory()),
        StorageKind::MongoDb => {
            let client = Client::with_uri_str(&settings.mongodb_uri)
                .await
                .map_err(|e| e.to_string())?;
            let db = Database::Mongo(client.database(&settings.mongodb_db));
            ensure_indexes(&db).await?;
            Ok(db)
        }
    }
}

pub async fn ensure_indexes(db: &Database) -> Result<(), String> {
    let Database::Mongo(db) = db else {
        return Ok(());
    };

    // purchases: looked up by referenced security
    let col = db.collection::<Document>("purchase");
    let model = IndexModel::builder().keys(doc! { "security.id": 1 }).build();

    col.create_index(model, None)
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
