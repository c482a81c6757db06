pub mod state;
pub mod entity_store;

pub use entity_store::EntityStore;
pub use state::{reduce, Action, EntityState, Lookup, Operation};

use crate::models::{Purchase, Security};

pub type SecurityStore = EntityStore<Security>;
pub type PurchaseStore = EntityStore<Purchase>;
