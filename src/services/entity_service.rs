use crate::{errors::ApiError, models::Entity};

use super::{db::Database, repository};

pub async fn create<E: Entity>(db: &Database, entity: E) -> Result<E, ApiError> {
    tracing::debug!("REST request to save {} : {:?}", E::LABEL, entity);
    if entity.id().is_some() {
        return Err(ApiError::bad_request(
            format!("A new {} cannot already have an ID", E::ENTITY_NAME),
            E::ENTITY_NAME,
            "idexists",
        ));
    }

    Ok(repository::insert(db, &entity).await?)
}

pub async fn update<E: Entity>(db: &Database, path_id: i64, entity: E) -> Result<E, ApiError> {
    tracing::debug!("REST request to update {} : {}, {:?}", E::LABEL, path_id, entity);
    check_ids::<E>(db, path_id, entity.id()).await?;

    replace_existing(db, &entity).await
}

/// Merge-patch: only the non-null fields of `patch` are written.
pub async fn partial_update<E: Entity>(db: &Database, path_id: i64, patch: E) -> Result<E, ApiError> {
    tracing::debug!("REST request to partial update {} : {}, {:?}", E::LABEL, path_id, patch);
    check_ids::<E>(db, path_id, patch.id()).await?;

    let Some(mut existing) = repository::find_by_id::<E>(db, path_id).await? else {
        return Err(ApiError::NotFound);
    };
    existing.merge_patch(patch);

    replace_existing(db, &existing).await
}

pub async fn find_all<E: Entity>(db: &Database) -> Result<Vec<E>, ApiError> {
    tracing::debug!("REST request to get all {}", E::API_PATH);
    Ok(repository::find_all::<E>(db).await?)
}

pub async fn find_one<E: Entity>(db: &Database, id: i64) -> Result<E, ApiError> {
    tracing::debug!("REST request to get {} : {}", E::LABEL, id);
    repository::find_by_id::<E>(db, id)
        .await?
        .ok_or(ApiError::NotFound)
}

pub async fn delete<E: Entity>(db: &Database, id: i64) -> Result<(), ApiError> {
    tracing::debug!("REST request to delete {} : {}", E::LABEL, id);
    Ok(repository::delete_by_id::<E>(db, id).await?)
}

// a delete landing after check_ids must not bring the record back
async fn replace_existing<E: Entity>(db: &Database, entity: &E) -> Result<E, ApiError> {
    repository::replace(db, entity)
        .await?
        .ok_or_else(|| ApiError::bad_request("Entity not found", E::ENTITY_NAME, "idnotfound"))
}

async fn check_ids<E: Entity>(db: &Database, path_id: i64, body_id: Option<i64>) -> Result<(), ApiError> {
    let Some(body_id) = body_id else {
        return Err(ApiError::bad_request("Invalid id", E::ENTITY_NAME, "idnull"));
    };
    if body_id != path_id {
        return Err(ApiError::bad_request("Invalid ID", E::ENTITY_NAME, "idinvalid"));
    }
    if !repository::exists_by_id::<E>(db, path_id).await? {
        return Err(ApiError::bad_request("Entity not found", E::ENTITY_NAME, "idnotfound"));
    }
    Ok(())
}
