//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PeopleCommand, PeopleQuery, PostsCommand, PostsQuery};
use crate::domain::{PeopleService, PostsService};
use crate::outbound::memory::MemoryStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub people_query: Arc<dyn PeopleQuery>,
    pub people: Arc<dyn PeopleCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub posts: Arc<dyn PostsCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        people_query: Arc<dyn PeopleQuery>,
        people: Arc<dyn PeopleCommand>,
        posts_query: Arc<dyn PostsQuery>,
        posts: Arc<dyn PostsCommand>,
    ) -> Self {
        Self {
            people_query,
            people,
            posts_query,
            posts,
        }
    }

    /// Wire both services over a single shared in-process store.
    ///
    /// Both services must see the same collections, otherwise cross-entity
    /// references (author links, cascades) would silently diverge.
    pub fn with_memory_store() -> Self {
        let store = Arc::new(MemoryStore::new());
        let people_service = PeopleService::new(Arc::clone(&store), Arc::clone(&store));
        let posts_service = PostsService::new(Arc::clone(&store), store);
        Self {
            people_query: Arc::new(people_service.clone()),
            people: Arc::new(people_service),
            posts_query: Arc::new(posts_service.clone()),
            posts: Arc::new(posts_service),
        }
    }
}
