//! Driving port for Post mutations and the reaction subdocument manager.

use async_trait::async_trait;

use crate::domain::ident::EntityId;
use crate::domain::post::{Post, PostDeletion, PostPatch, ReactionDraft};
use crate::domain::DomainResult;

/// Request payload for creating a Post on behalf of an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Identifier of the authoring Person; must exist.
    pub author_id: EntityId,
    /// Handle supplied by the caller; must match the author's current
    /// handle.
    pub author_handle: String,
    /// Body text, 1-280 characters.
    pub body: String,
}

/// Write-side use cases for Posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a Post and link it into the author's post-reference set.
    async fn create_post(&self, new_post: NewPost) -> DomainResult<Post>;

    /// Apply a field-level update to a Post.
    async fn update_post(&self, id: &EntityId, patch: PostPatch) -> DomainResult<Post>;

    /// Delete a Post and unlink it from its owning Person, flagging a
    /// missing owner instead of claiming full success.
    async fn delete_post(&self, id: &EntityId) -> DomainResult<PostDeletion>;

    /// Append a reaction with a freshly generated identifier, returning the
    /// updated Post.
    async fn add_reaction(&self, post_id: &EntityId, draft: ReactionDraft) -> DomainResult<Post>;

    /// Remove a reaction by identifier, distinguishing "post exists but
    /// nothing was removed" from a successful removal.
    async fn remove_reaction(
        &self,
        post_id: &EntityId,
        reaction_id: &EntityId,
    ) -> DomainResult<Post>;
}
