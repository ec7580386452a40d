//! Driven port for Person persistence: the entity-store adapter interface.
//!
//! The store offers point lookups, filtered scans, create-with-validation,
//! atomic field-level updates, set-insert/set-remove on the reference
//! arrays, and deletes. Multi-document procedures are composed by the
//! services; no method here spans more than one document except the
//! store-wide friend-reference prune and the reverse owner lookup, which map
//! to single filtered updates/scans on a document store.

use async_trait::async_trait;

use crate::domain::ident::EntityId;
use crate::domain::person::{Person, PersonDraft, PersonPatch};
use crate::domain::validation::FieldViolation;

use super::define_port_error;

define_port_error! {
    /// Failures raised by Person store adapters.
    pub enum PersonStoreError {
        /// The store could not be reached.
        Connection { message: String } => "person store connection failed: {message}",
        /// A query or update failed during execution.
        Query { message: String } => "person store query failed: {message}",
        /// The document violated the store's field constraints.
        Validation { violations: Vec<FieldViolation> } => "person document failed validation: {violations:?}",
        /// The unique index on handle/address rejected the document.
        DuplicateIdentity { fields: Vec<&'static str> } => "unique identity index violated on {fields:?}",
    }
}

/// Port for Person document storage.
///
/// Mutating methods that target a single document return `Ok(None)` when no
/// document matches the identifier, mirroring find-and-modify semantics;
/// callers decide whether that is a not-found failure or an idempotent
/// no-op.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Scan every Person document.
    async fn list(&self) -> Result<Vec<Person>, PersonStoreError>;

    /// Point lookup by identifier.
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Person>, PersonStoreError>;

    /// Filtered scan for any Person whose handle or address matches either
    /// candidate value (the duplicate-identity pre-check).
    async fn find_by_identity(
        &self,
        handle: &str,
        address: &str,
    ) -> Result<Option<Person>, PersonStoreError>;

    /// Reverse lookup: the Person whose post set contains the given post.
    async fn find_post_owner(&self, post_id: &EntityId)
        -> Result<Option<Person>, PersonStoreError>;

    /// Create a Person, running field constraints and the unique identity
    /// index. The store assigns the identifier.
    async fn create(&self, draft: PersonDraft) -> Result<Person, PersonStoreError>;

    /// Atomic field-level update, re-running constraints over the patched
    /// fields and the unique index over identity fields.
    async fn update(
        &self,
        id: &EntityId,
        patch: PersonPatch,
    ) -> Result<Option<Person>, PersonStoreError>;

    /// Delete one Person, returning the removed document.
    async fn delete(&self, id: &EntityId) -> Result<Option<Person>, PersonStoreError>;

    /// Set-insert a friend reference (no duplicate entries), returning the
    /// updated document.
    async fn insert_friend_ref(
        &self,
        id: &EntityId,
        friend_id: &EntityId,
    ) -> Result<Option<Person>, PersonStoreError>;

    /// Set-remove a friend reference; removing an absent entry is a no-op.
    async fn remove_friend_ref(
        &self,
        id: &EntityId,
        friend_id: &EntityId,
    ) -> Result<Option<Person>, PersonStoreError>;

    /// Store-wide removal of a friend reference from every Person, returning
    /// how many documents changed.
    async fn remove_friend_ref_from_all(
        &self,
        friend_id: &EntityId,
    ) -> Result<usize, PersonStoreError>;

    /// Set-insert a post reference, returning the updated document.
    async fn insert_post_ref(
        &self,
        id: &EntityId,
        post_id: &EntityId,
    ) -> Result<Option<Person>, PersonStoreError>;

    /// Set-remove a post reference; removing an absent entry is a no-op.
    async fn remove_post_ref(
        &self,
        id: &EntityId,
        post_id: &EntityId,
    ) -> Result<Option<Person>, PersonStoreError>;
}
