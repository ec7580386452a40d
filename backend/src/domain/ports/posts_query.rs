//! Driving port for Post reads.

use async_trait::async_trait;

use crate::domain::ident::EntityId;
use crate::domain::post::Post;
use crate::domain::DomainResult;

/// Read-side use cases for Posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// List every Post.
    async fn list_posts(&self) -> DomainResult<Vec<Post>>;

    /// Fetch one Post, embedded reactions included.
    async fn get_post(&self, id: &EntityId) -> DomainResult<Post>;
}
