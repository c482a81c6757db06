//! Storage access shared by every [`Entity`].
//!
//! Documents are stored under the entity's numeric id (`_id` in MongoDB, the
//! map key in memory) and decoded through serde, so both backends accept any
//! entity type.

use futures_util::StreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::options::FindOptions;

use crate::models::Entity;

use super::db::Database;

pub async fn find_all<E: Entity>(db: &Database) -> Result<Vec<E>, String> {
    match db {
        Database::Memory(mem) => {
            let collections = mem.collections.read().await;
            let Some(docs) = collections.get(E::COLLECTION) else {
                return Ok(Vec::new());
            };
            docs.values()
                .map(|v| serde_json::from_value::<E>(v.clone()).map_err(|e| e.to_string()))
                .collect()
        }
        Database::Mongo(db) => {
            let col = db.collection::<Document>(E::COLLECTION);
            let find_opts = FindOptions::builder().sort(doc! { "_id": 1 }).build();

            let mut cursor = col.find(None, find_opts).await.map_err(|e| e.to_string())?;

            let mut items: Vec<E> = Vec::new();
            while let Some(res) = cursor.next().await {
                let document = res.map_err(|e| e.to_string())?;
                items.push(bson::from_document(document).map_err(|e| e.to_string())?);
            }
            Ok(items)
        }
    }
}

pub async fn find_by_id<E: Entity>(db: &Database, id: i64) -> Result<Option<E>, String> {
    match db {
        Database::Memory(mem) => {
            let collections = mem.collections.read().await;
            collections
                .get(E::COLLECTION)
                .and_then(|docs| docs.get(&id))
                .map(|v| serde_json::from_value::<E>(v.clone()).map_err(|e| e.to_string()))
                .transpose()
        }
        Database::Mongo(db) => {
            let col = db.collection::<Document>(E::COLLECTION);
            let found = col
                .find_one(doc! { "_id": id }, None)
                .await
                .map_err(|e| e.to_string())?;

            found
                .map(|document| bson::from_document::<E>(document).map_err(|e| e.to_string()))
                .transpose()
        }
    }
}

pub async fn exists_by_id<E: Entity>(db: &Database, id: i64) -> Result<bool, String> {
    match db {
        Database::Memory(mem) => {
            let collections = mem.collections.read().await;
            Ok(collections
                .get(E::COLLECTION)
                .is_some_and(|docs| docs.contains_key(&id)))
        }
        Database::Mongo(db) => {
            let col = db.collection::<Document>(E::COLLECTION);
            let n = col
                .count_documents(doc! { "_id": id }, None)
                .await
                .map_err(|e| e.to_string())?;
            Ok(n > 0)
        }
    }
}

/// Assigns the next id and stores the entity. Returns the stored shape.
pub async fn insert<E: Entity>(db: &Database, entity: &E) -> Result<E, String> {
    let id = db.next_id().await?;
    let mut stored = entity.for_storage();
    stored.set_id(Some(id));

    write(db, id, &stored, true).await?;
    Ok(stored)
}

/// Full replacement of an entity that already carries its id. Returns `None`
/// when no record with that id is stored; nothing is written then.
pub async fn replace<E: Entity>(db: &Database, entity: &E) -> Result<Option<E>, String> {
    let id = entity
        .id()
        .ok_or_else(|| format!("cannot store {} without id", E::ENTITY_NAME))?;
    let stored = entity.for_storage();

    let written = write(db, id, &stored, false).await?;
    Ok(written.then_some(stored))
}

pub async fn delete_by_id<E: Entity>(db: &Database, id: i64) -> Result<(), String> {
    match db {
        Database::Memory(mem) => {
            let mut collections = mem.collections.write().await;
            if let Some(docs) = collections.get_mut(E::COLLECTION) {
                docs.remove(&id);
            }
            Ok(())
        }
        Database::Mongo(db) => {
            let col = db.collection::<Document>(E::COLLECTION);
            col.delete_one(doc! { "_id": id }, None)
                .await
                .map_err(|e| e.to_string())?;
            Ok(())
        }
    }
}

// Memory checks and writes under one lock; MongoDB reports the match count.
async fn write<E: Entity>(db: &Database, id: i64, entity: &E, is_new: bool) -> Result<bool, String> {
    match db {
        Database::Memory(mem) => {
            let value = serde_json::to_value(entity).map_err(|e| e.to_string())?;
            let mut collections = mem.collections.write().await;
            let docs = collections.entry(E::COLLECTION.to_string()).or_default();
            if !is_new && !docs.contains_key(&id) {
                return Ok(false);
            }
            docs.insert(id, value);
            Ok(true)
        }
        Database::Mongo(db) => {
            let col = db.collection::<Document>(E::COLLECTION);
            let mut document = bson::to_document(entity).map_err(|e| e.to_string())?;
            document.insert("_id", id);

            if is_new {
                col.insert_one(document, None)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(true)
            } else {
                let res = col
                    .replace_one(doc! { "_id": id }, document, None)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(res.matched_count > 0)
            }
        }
    }
}
