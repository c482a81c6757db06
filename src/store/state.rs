//! Request-lifecycle state of one entity type and the pure transition
//! function that drives it.

use crate::models::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchList,
    Fetch,
    Create,
    Update,
    PartialUpdate,
    Delete,
}

impl Operation {
    /// Reads toggle `loading`, writes toggle `updating`.
    pub fn is_read(&self) -> bool {
        matches!(self, Operation::FetchList | Operation::Fetch)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::FetchList => "FETCH_LIST",
            Operation::Fetch => "FETCH",
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::PartialUpdate => "PARTIAL_UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action<E> {
    Request(Operation),
    Failure(Operation, String),
    ListLoaded(Vec<E>),
    EntityLoaded(E),
    /// Create, update and partial update all answer with the stored entity.
    Saved(E),
    Deleted,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityState<E> {
    pub loading: bool,
    pub updating: bool,
    pub update_success: bool,
    pub error_message: Option<String>,
    pub entities: Vec<E>,
    pub entity: E,
    // set once a list request has succeeded
    pub list_loaded: bool,
}

impl<E: Default> Default for EntityState<E> {
    fn default() -> Self {
        Self {
            loading: false,
            updating: false,
            update_success: false,
            error_message: None,
            entities: Vec::new(),
            entity: E::default(),
            list_loaded: false,
        }
    }
}

pub fn reduce<E: Entity>(state: EntityState<E>, action: Action<E>) -> EntityState<E> {
    match action {
        Action::Request(op) if op.is_read() => EntityState {
            error_message: None,
            update_success: false,
            loading: true,
            ..state
        },
        Action::Request(_) => EntityState {
            error_message: None,
            update_success: false,
            updating: true,
            ..state
        },
        Action::Failure(_, message) => EntityState {
            loading: false,
            updating: false,
            update_success: false,
            error_message: Some(message),
            ..state
        },
        Action::ListLoaded(entities) => EntityState {
            loading: false,
            entities,
            list_loaded: true,
            ..state
        },
        Action::EntityLoaded(entity) => EntityState {
            loading: false,
            entity,
            ..state
        },
        Action::Saved(entity) => EntityState {
            updating: false,
            update_success: true,
            entity,
            ..state
        },
        Action::Deleted => EntityState {
            updating: false,
            update_success: true,
            entity: E::default(),
            ..state
        },
        Action::Reset => EntityState::default(),
    }
}

/// Result of resolving a reference id against a loaded list.
#[derive(Debug, PartialEq)]
pub enum Lookup<'a, E> {
    NotLoaded,
    Missing(i64),
    Found(&'a E),
}

impl<E: Entity> EntityState<E> {
    pub fn lookup(&self, id: i64) -> Lookup<'_, E> {
        if !self.list_loaded {
            return Lookup::NotLoaded;
        }
        match self.entities.iter().find(|e| e.id() == Some(id)) {
            Some(e) => Lookup::Found(e),
            None => Lookup::Missing(id),
        }
    }
}
