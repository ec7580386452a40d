//! Post domain services: post lifecycle, the post half of cascade deletion,
//! and the reaction subdocument manager.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ident::EntityId;
use crate::domain::people::{map_person_store_error, map_post_store_error, person_not_found};
use crate::domain::ports::{NewPost, PersonStore, PostStore, PostsCommand, PostsQuery};
use crate::domain::post::{Post, PostDeletion, PostDraft, PostPatch, Reaction, ReactionDraft};
use crate::domain::validation::validation_error;
use crate::domain::{DomainResult, Error};

/// Post service implementing the driving ports.
pub struct PostsService<P, T> {
    people: Arc<P>,
    posts: Arc<T>,
}

impl<P, T> PostsService<P, T> {
    /// Create a new service over the given store adapters.
    pub fn new(people: Arc<P>, posts: Arc<T>) -> Self {
        Self { people, posts }
    }
}

// A derive would demand `P: Clone` and `T: Clone`; only the handles are
// cloned.
impl<P, T> Clone for PostsService<P, T> {
    fn clone(&self) -> Self {
        Self {
            people: Arc::clone(&self.people),
            posts: Arc::clone(&self.posts),
        }
    }
}

fn post_not_found(id: &EntityId) -> Error {
    Error::not_found("no post with that identifier")
        .with_details(json!({ "postId": id.to_string() }))
}

fn handle_mismatch_error(supplied: &str) -> Error {
    Error::invalid_request("author handle does not match that person's current handle")
        .with_details(json!({
            "field": "authorHandle",
            "value": supplied,
            "code": "handle_mismatch",
        }))
}

#[async_trait]
impl<P, T> PostsQuery for PostsService<P, T>
where
    P: PersonStore,
    T: PostStore,
{
    async fn list_posts(&self) -> DomainResult<Vec<Post>> {
        self.posts.list().await.map_err(map_post_store_error)
    }

    async fn get_post(&self, id: &EntityId) -> DomainResult<Post> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(map_post_store_error)?
            .ok_or_else(|| post_not_found(id))
    }
}

#[async_trait]
impl<P, T> PostsCommand for PostsService<P, T>
where
    P: PersonStore,
    T: PostStore,
{
    async fn create_post(&self, new_post: NewPost) -> DomainResult<Post> {
        let author = self
            .people
            .find_by_id(&new_post.author_id)
            .await
            .map_err(map_person_store_error)?
            .ok_or_else(|| person_not_found(&new_post.author_id))?;

        if new_post.author_handle.trim() != author.handle {
            return Err(handle_mismatch_error(&new_post.author_handle));
        }

        let post = self
            .posts
            .create(PostDraft {
                body: new_post.body,
                author_handle: new_post.author_handle,
            })
            .await
            .map_err(map_post_store_error)?;

        match self.people.insert_post_ref(&author.id, &post.id).await {
            Ok(Some(_)) => Ok(post),
            Ok(None) => {
                warn!(post = %post.id, author = %author.id, "author vanished before the post was linked");
                Err(
                    Error::partial_failure("post created but not linked to its author")
                        .with_details(json!({
                            "completed": ["post_record"],
                            "failed": "author_link",
                            "postId": post.id.to_string(),
                            "authorId": author.id.to_string(),
                        })),
                )
            }
            Err(error) => {
                warn!(post = %post.id, author = %author.id, error = %error, "author link failed");
                Err(
                    Error::partial_failure("post created but not linked to its author")
                        .with_details(json!({
                            "completed": ["post_record"],
                            "failed": "author_link",
                            "source": error.to_string(),
                        })),
                )
            }
        }
    }

    async fn update_post(&self, id: &EntityId, patch: PostPatch) -> DomainResult<Post> {
        if patch.is_empty() {
            return Err(Error::invalid_request("no fields to update")
                .with_details(json!({ "code": "empty_patch" })));
        }
        self.posts
            .update(id, patch)
            .await
            .map_err(map_post_store_error)?
            .ok_or_else(|| post_not_found(id))
    }

    async fn delete_post(&self, id: &EntityId) -> DomainResult<PostDeletion> {
        self.posts
            .delete(id)
            .await
            .map_err(map_post_store_error)?
            .ok_or_else(|| post_not_found(id))?;

        // The author handle on the post is a snapshot, so the owner is found
        // by reverse lookup over the post-reference sets.
        let owner = self.people.find_post_owner(id).await.map_err(|error| {
            warn!(post = %id, error = %error, "owner lookup failed after post deletion");
            Error::partial_failure("post deleted but its owner could not be unlinked")
                .with_details(json!({
                    "completed": ["post_record"],
                    "failed": "owner_link",
                    "source": error.to_string(),
                }))
        })?;

        let Some(owner) = owner else {
            warn!(post = %id, "post deleted but no owning person references it");
            return Ok(PostDeletion {
                post_id: *id,
                owner_unlinked: false,
            });
        };

        self.people
            .remove_post_ref(&owner.id, id)
            .await
            .map_err(|error| {
                warn!(post = %id, owner = %owner.id, error = %error, "owner unlink failed after post deletion");
                Error::partial_failure("post deleted but its owner could not be unlinked")
                    .with_details(json!({
                        "completed": ["post_record"],
                        "failed": "owner_link",
                        "source": error.to_string(),
                    }))
            })?;

        info!(post = %id, owner = %owner.id, "post deleted and unlinked");
        Ok(PostDeletion {
            post_id: *id,
            owner_unlinked: true,
        })
    }

    async fn add_reaction(&self, post_id: &EntityId, draft: ReactionDraft) -> DomainResult<Post> {
        let reaction = Reaction::new(draft).map_err(|violations| validation_error(&violations))?;
        self.posts
            .push_reaction(post_id, reaction)
            .await
            .map_err(map_post_store_error)?
            .ok_or_else(|| post_not_found(post_id))
    }

    async fn remove_reaction(
        &self,
        post_id: &EntityId,
        reaction_id: &EntityId,
    ) -> DomainResult<Post> {
        let removal = self
            .posts
            .pull_reaction(post_id, reaction_id)
            .await
            .map_err(map_post_store_error)?
            .ok_or_else(|| post_not_found(post_id))?;

        if removal.removed {
            Ok(removal.post)
        } else {
            // The post exists and is untouched; the caller must be able to
            // tell this apart from a removal.
            Err(Error::not_found("no reaction with that identifier in this post")
                .with_details(json!({
                    "postId": post_id.to_string(),
                    "reactionId": reaction_id.to_string(),
                    "code": "reaction_not_found",
                })))
        }
    }
}
