//! Driven port for Post persistence, including the embedded reaction
//! sequence.

use async_trait::async_trait;

use crate::domain::ident::EntityId;
use crate::domain::post::{Post, PostDraft, PostPatch, Reaction, ReactionRemoval};
use crate::domain::validation::FieldViolation;

use super::define_port_error;

define_port_error! {
    /// Failures raised by Post store adapters.
    pub enum PostStoreError {
        /// The store could not be reached.
        Connection { message: String } => "post store connection failed: {message}",
        /// A query or update failed during execution.
        Query { message: String } => "post store query failed: {message}",
        /// The document violated the store's field constraints.
        Validation { violations: Vec<FieldViolation> } => "post document failed validation: {violations:?}",
    }
}

/// Port for Post document storage.
///
/// As with the Person port, single-document mutations return `Ok(None)` when
/// nothing matches the identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Scan every Post document.
    async fn list(&self) -> Result<Vec<Post>, PostStoreError>;

    /// Point lookup by identifier.
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Post>, PostStoreError>;

    /// Create a Post, running field constraints. The store assigns the
    /// identifier and creation timestamp.
    async fn create(&self, draft: PostDraft) -> Result<Post, PostStoreError>;

    /// Atomic field-level update, re-running constraints over the patched
    /// fields.
    async fn update(
        &self,
        id: &EntityId,
        patch: PostPatch,
    ) -> Result<Option<Post>, PostStoreError>;

    /// Delete one Post, returning the removed document.
    async fn delete(&self, id: &EntityId) -> Result<Option<Post>, PostStoreError>;

    /// Bulk delete by identifier predicate, returning how many documents
    /// were removed.
    async fn delete_many(&self, ids: &[EntityId]) -> Result<usize, PostStoreError>;

    /// Append a reaction to a post's sequence with set semantics on the
    /// reaction identifier, returning the updated document.
    async fn push_reaction(
        &self,
        id: &EntityId,
        reaction: Reaction,
    ) -> Result<Option<Post>, PostStoreError>;

    /// Remove any reaction whose identifier matches, reporting whether one
    /// did. `Ok(None)` means the post itself does not exist.
    async fn pull_reaction(
        &self,
        id: &EntityId,
        reaction_id: &EntityId,
    ) -> Result<Option<ReactionRemoval>, PostStoreError>;
}
