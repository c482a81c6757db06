use std::sync::Arc;

use tokio::sync::watch;

use crate::{models::Entity, services::api_client::ApiClient};

use super::state::{reduce, Action, EntityState, Operation};

/// Handle on one entity type's state. Cloning shares the same state.
///
/// Action creators take the [`ApiClient`] explicitly, run one request, and
/// return the state right after their own success or failure transition.
#[derive(Clone)]
pub struct EntityStore<E: Entity> {
    tx: Arc<watch::Sender<EntityState<E>>>,
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(EntityState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn dispatch(&self, action: Action<E>) {
        if let Action::Failure(op, message) = &action {
            tracing::warn!("{}/{} failed: {}", E::ENTITY_NAME, op.as_str(), message);
        }
        self.tx
            .send_modify(|state| *state = reduce(std::mem::take(state), action));
    }

    pub fn snapshot(&self) -> EntityState<E> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<EntityState<E>> {
        self.tx.subscribe()
    }

    pub async fn get_entities(&self, api: &ApiClient) -> EntityState<E> {
        self.dispatch(Action::Request(Operation::FetchList));
        match api.get_all::<E>().await {
            Ok(list) => self.dispatch(Action::ListLoaded(list)),
            Err(e) => self.dispatch(Action::Failure(Operation::FetchList, e)),
        }
        self.snapshot()
    }

    pub async fn get_entity(&self, api: &ApiClient, id: i64) -> EntityState<E> {
        self.dispatch(Action::Request(Operation::Fetch));
        match api.get::<E>(id).await {
            Ok(entity) => self.dispatch(Action::EntityLoaded(entity)),
            Err(e) => self.dispatch(Action::Failure(Operation::Fetch, e)),
        }
        self.snapshot()
    }

    /// Creates the entity, then refreshes the list when the create succeeded.
    pub async fn create_entity(&self, api: &ApiClient, entity: E) -> EntityState<E> {
        let saved = self.save(api, Operation::Create, entity).await;
        if saved.update_success {
            self.get_entities(api).await;
        }
        saved
    }

    pub async fn update_entity(&self, api: &ApiClient, entity: E) -> EntityState<E> {
        self.save(api, Operation::Update, entity).await
    }

    pub async fn partial_update(&self, api: &ApiClient, entity: E) -> EntityState<E> {
        self.save(api, Operation::PartialUpdate, entity).await
    }

    /// Deletes by id, then refreshes the list when the delete succeeded.
    pub async fn delete_entity(&self, api: &ApiClient, id: i64) -> EntityState<E> {
        self.dispatch(Action::Request(Operation::Delete));
        match api.delete::<E>(id).await {
            Ok(()) => self.dispatch(Action::Deleted),
            Err(e) => self.dispatch(Action::Failure(Operation::Delete, e)),
        }
        let deleted = self.snapshot();
        if deleted.update_success {
            self.get_entities(api).await;
        }
        deleted
    }

    pub fn reset(&self) -> EntityState<E> {
        self.dispatch(Action::Reset);
        self.snapshot()
    }

    async fn save(&self, api: &ApiClient, op: Operation, entity: E) -> EntityState<E> {
        self.dispatch(Action::Request(op));
        let res = match op {
            Operation::Create => api.create(&entity).await,
            Operation::PartialUpdate => api.partial_update(&entity).await,
            _ => api.update(&entity).await,
        };
        match res {
            Ok(saved) => self.dispatch(Action::Saved(saved)),
            Err(e) => self.dispatch(Action::Failure(op, e)),
        }
        self.snapshot()
    }
}
