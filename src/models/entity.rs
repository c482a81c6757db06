use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// A record type managed through the REST API, the client store and the views.
///
/// Everything generic in the crate (repository, API client, entity store,
/// delete dialog) is keyed by this trait, so adding a record type means one
/// impl plus its form and templates.
pub trait Entity:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Lower-case singular name used in alert headers and error payloads.
    const ENTITY_NAME: &'static str;
    /// Human label for headings.
    const LABEL: &'static str;
    /// REST collection path relative to the API base, e.g. `api/securities`.
    const API_PATH: &'static str;
    /// Storage collection name.
    const COLLECTION: &'static str;
    /// Navigation root of the views, e.g. `/security`.
    const ROUTE: &'static str;

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: Option<i64>);

    /// Copy every non-null field of `patch` onto `self` (merge-patch semantics).
    fn merge_patch(&mut self, patch: Self);

    /// The shape written to storage. References to other records keep only their id.
    fn for_storage(&self) -> Self {
        self.clone()
    }
}
