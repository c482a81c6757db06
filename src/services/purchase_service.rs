use std::collections::HashMap;

use crate::models::{Purchase, Security};

use super::{db::Database, repository};

/// Replace the stored `{id}` reference with the full Security, when it exists.
pub async fn resolve_security(db: &Database, mut purchase: Purchase) -> Result<Purchase, String> {
    if let Some(id) = purchase.security_id() {
        if let Some(security) = repository::find_by_id::<Security>(db, id).await? {
            purchase.security = Some(security);
        }
    }
    Ok(purchase)
}

pub async fn resolve_securities(db: &Database, purchases: Vec<Purchase>) -> Result<Vec<Purchase>, String> {
    if purchases.iter().all(|p| p.security_id().is_none()) {
        return Ok(purchases);
    }

    let by_id: HashMap<i64, Security> = repository::find_all::<Security>(db)
        .await?
        .into_iter()
        .filter_map(|s| s.id.map(|id| (id, s)))
        .collect();

    Ok(purchases
        .into_iter()
        .map(|mut p| {
            if let Some(found) = p.security_id().and_then(|id| by_id.get(&id)) {
                p.security = Some(found.clone());
            }
            p
        })
        .collect())
}
