//! Trait abstraction for the back-office store to enable mocking in tests

use crate::entities::EntityKind;
use crate::state::forms::{FormValues, RelationOption};
use crate::state::Record;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for back-office data operations, enabling mocking in tests.
///
/// The form pages never talk to persistence directly; everything goes
/// through this boundary, and the relation pickers' fetch functions are
/// `list_options` partially applied to a target kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Check if the backing store is reachable
    async fn check_connection(&self) -> bool;

    /// List all records of one entity kind
    async fn list(&self, kind: EntityKind) -> Result<Vec<Record>>;

    /// Fetch a single record by id
    async fn get(&self, kind: EntityKind, id: &str) -> Result<Record>;

    /// Create a record, returning its new id
    async fn create(&self, kind: EntityKind, values: FormValues) -> Result<String>;

    /// Replace an existing record's values
    async fn update(&self, kind: EntityKind, id: &str, values: FormValues) -> Result<()>;

    /// Delete a record
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()>;

    /// Full candidate set for a relation field targeting `kind`
    async fn list_options(&self, kind: EntityKind) -> Result<Vec<RelationOption>>;
}
