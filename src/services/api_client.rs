use chrono::Utc;
use reqwest::{header, Client, Response};
use serde::Serialize;

use crate::models::Entity;

pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// HTTP client for the REST API. Every call reports failures as the message
/// the views show to the user.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url<E: Entity>(&self) -> String {
        format!("{}/{}", self.base_url, E::API_PATH)
    }

    fn item_url<E: Entity>(&self, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, E::API_PATH, id)
    }

    pub async fn get_all<E: Entity>(&self) -> Result<Vec<E>, String> {
        let cache_buster = Utc::now().timestamp_millis().to_string();
        let res = self
            .http
            .get(self.collection_url::<E>())
            .query(&[("cacheBuster", cache_buster.as_str())])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        ok_or_message(res).await?.json::<Vec<E>>().await.map_err(|e| e.to_string())
    }

    pub async fn get<E: Entity>(&self, id: i64) -> Result<E, String> {
        let res = self
            .http
            .get(self.item_url::<E>(id))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        ok_or_message(res).await?.json::<E>().await.map_err(|e| e.to_string())
    }

    pub async fn create<E: Entity>(&self, entity: &E) -> Result<E, String> {
        let res = self
            .http
            .post(self.collection_url::<E>())
            .json(&clean_entity(entity)?)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        ok_or_message(res).await?.json::<E>().await.map_err(|e| e.to_string())
    }

    pub async fn update<E: Entity>(&self, entity: &E) -> Result<E, String> {
        let id = require_id(entity)?;
        let res = self
            .http
            .put(self.item_url::<E>(id))
            .json(&clean_entity(entity)?)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        ok_or_message(res).await?.json::<E>().await.map_err(|e| e.to_string())
    }

    pub async fn partial_update<E: Entity>(&self, entity: &E) -> Result<E, String> {
        let id = require_id(entity)?;
        let body = serde_json::to_vec(&clean_entity(entity)?).map_err(|e| e.to_string())?;
        let res = self
            .http
            .patch(self.item_url::<E>(id))
            .header(header::CONTENT_TYPE, MERGE_PATCH_JSON)
            .body(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        ok_or_message(res).await?.json::<E>().await.map_err(|e| e.to_string())
    }

    pub async fn delete<E: Entity>(&self, id: i64) -> Result<(), String> {
        let res = self
            .http
            .delete(self.item_url::<E>(id))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        ok_or_message(res).await.map(|_| ())
    }
}

fn require_id<E: Entity>(entity: &E) -> Result<i64, String> {
    entity
        .id()
        .ok_or_else(|| format!("Cannot update a {} without an id", E::ENTITY_NAME))
}

async fn ok_or_message(res: Response) -> Result<Response, String> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let title = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("title").and_then(|t| t.as_str()).map(str::to_string));

    Err(match title {
        Some(t) => format!("Request failed with status code {}: {t}", status.as_u16()),
        None => format!("Request failed with status code {}", status.as_u16()),
    })
}

/// Serialize an outgoing payload without null fields, and without references
/// that carry no id.
pub fn clean_entity<T: Serialize>(entity: &T) -> Result<serde_json::Value, String> {
    let value = serde_json::to_value(entity).map_err(|e| e.to_string())?;
    let serde_json::Value::Object(map) = value else {
        return Ok(value);
    };

    let cleaned = map
        .into_iter()
        .filter(|(_, v)| match v {
            serde_json::Value::Null => false,
            serde_json::Value::Object(inner) => {
                inner.get("id").is_some_and(|id| !id.is_null())
            }
            _ => true,
        })
        .collect();

    Ok(serde_json::Value::Object(cleaned))
}
