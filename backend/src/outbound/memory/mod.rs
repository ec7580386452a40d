//! In-process document store adapter.
//!
//! Stands in for the external document database behind [`PersonStore`] and
//! [`PostStore`]. Collections are guarded by async `RwLock`s; each port
//! method holds a lock for exactly one atomic step, so multi-step domain
//! procedures interleave under concurrency just as they would against a
//! remote store. Create-with-validation and the unique identity index live
//! here, the way the production store would enforce them.

use chrono::Utc;
use tokio::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{PersonStore, PersonStoreError, PostStore, PostStoreError};
use crate::domain::{
    EntityId, Person, PersonDraft, PersonPatch, Post, PostDraft, PostPatch, Reaction,
    ReactionRemoval,
};

/// Document collections for the whole graph. One instance implements both
/// store ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    people: RwLock<Vec<Person>>,
    posts: RwLock<Vec<Post>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique index check over handle and address, excluding one document
    /// (the one being updated).
    fn identity_index_violation(
        people: &[Person],
        handle: &str,
        address: &str,
        exclude: Option<&EntityId>,
    ) -> Option<PersonStoreError> {
        let mut fields = Vec::new();
        for person in people {
            if exclude == Some(&person.id) {
                continue;
            }
            if person.handle == handle && !fields.contains(&"handle") {
                fields.push("handle");
            }
            if person.address == address && !fields.contains(&"address") {
                fields.push("address");
            }
        }
        if fields.is_empty() {
            None
        } else {
            Some(PersonStoreError::duplicate_identity(fields))
        }
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Person>, PersonStoreError> {
        Ok(self.people.read().await.clone())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Person>, PersonStoreError> {
        let people = self.people.read().await;
        Ok(people.iter().find(|person| person.id == *id).cloned())
    }

    async fn find_by_identity(
        &self,
        handle: &str,
        address: &str,
    ) -> Result<Option<Person>, PersonStoreError> {
        let handle = handle.trim();
        let address = address.trim();
        let people = self.people.read().await;
        Ok(people
            .iter()
            .find(|person| person.handle == handle || person.address == address)
            .cloned())
    }

    async fn find_post_owner(
        &self,
        post_id: &EntityId,
    ) -> Result<Option<Person>, PersonStoreError> {
        let people = self.people.read().await;
        Ok(people.iter().find(|person| person.has_post(post_id)).cloned())
    }

    async fn create(&self, draft: PersonDraft) -> Result<Person, PersonStoreError> {
        let draft = draft.normalized().map_err(PersonStoreError::validation)?;
        let mut people = self.people.write().await;
        if let Some(violation) =
            Self::identity_index_violation(&people, &draft.handle, &draft.address, None)
        {
            return Err(violation);
        }
        let person = Person {
            id: EntityId::generate(),
            handle: draft.handle,
            address: draft.address,
            posts: Vec::new(),
            friends: Vec::new(),
        };
        people.push(person.clone());
        Ok(person)
    }

    async fn update(
        &self,
        id: &EntityId,
        patch: PersonPatch,
    ) -> Result<Option<Person>, PersonStoreError> {
        let patch = patch.normalized().map_err(PersonStoreError::validation)?;
        let mut people = self.people.write().await;
        let Some(position) = people.iter().position(|person| person.id == *id) else {
            return Ok(None);
        };
        let mut updated = people[position].clone();
        if let Some(handle) = patch.handle {
            updated.handle = handle;
        }
        if let Some(address) = patch.address {
            updated.address = address;
        }
        if let Some(violation) =
            Self::identity_index_violation(&people, &updated.handle, &updated.address, Some(id))
        {
            return Err(violation);
        }
        people[position] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &EntityId) -> Result<Option<Person>, PersonStoreError> {
        let mut people = self.people.write().await;
        let Some(position) = people.iter().position(|person| person.id == *id) else {
            return Ok(None);
        };
        Ok(Some(people.remove(position)))
    }

    async fn insert_friend_ref(
        &self,
        id: &EntityId,
        friend_id: &EntityId,
    ) -> Result<Option<Person>, PersonStoreError> {
        let mut people = self.people.write().await;
        let Some(person) = people.iter_mut().find(|person| person.id == *id) else {
            return Ok(None);
        };
        // Set semantics; a person never appears in its own friend set.
        if friend_id != id && !person.friends.contains(friend_id) {
            person.friends.push(*friend_id);
        }
        Ok(Some(person.clone()))
    }

    async fn remove_friend_ref(
        &self,
        id: &EntityId,
        friend_id: &EntityId,
    ) -> Result<Option<Person>, PersonStoreError> {
        let mut people = self.people.write().await;
        let Some(person) = people.iter_mut().find(|person| person.id == *id) else {
            return Ok(None);
        };
        person.friends.retain(|entry| entry != friend_id);
        Ok(Some(person.clone()))
    }

    async fn remove_friend_ref_from_all(
        &self,
        friend_id: &EntityId,
    ) -> Result<usize, PersonStoreError> {
        let mut people = self.people.write().await;
        let mut changed = 0;
        for person in people.iter_mut() {
            let before = person.friends.len();
            person.friends.retain(|entry| entry != friend_id);
            if person.friends.len() != before {
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn insert_post_ref(
        &self,
        id: &EntityId,
        post_id: &EntityId,
    ) -> Result<Option<Person>, PersonStoreError> {
        let mut people = self.people.write().await;
        let Some(person) = people.iter_mut().find(|person| person.id == *id) else {
            return Ok(None);
        };
        if !person.posts.contains(post_id) {
            person.posts.push(*post_id);
        }
        Ok(Some(person.clone()))
    }

    async fn remove_post_ref(
        &self,
        id: &EntityId,
        post_id: &EntityId,
    ) -> Result<Option<Person>, PersonStoreError> {
        let mut people = self.people.write().await;
        let Some(person) = people.iter_mut().find(|person| person.id == *id) else {
            return Ok(None);
        };
        person.posts.retain(|entry| entry != post_id);
        Ok(Some(person.clone()))
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Post>, PostStoreError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Post>, PostStoreError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == *id).cloned())
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, PostStoreError> {
        let draft = draft.normalized().map_err(PostStoreError::validation)?;
        let post = Post {
            id: EntityId::generate(),
            body: draft.body,
            author_handle: draft.author_handle,
            created_at: Utc::now(),
            reactions: Vec::new(),
        };
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: &EntityId,
        patch: PostPatch,
    ) -> Result<Option<Post>, PostStoreError> {
        let patch = patch.normalized().map_err(PostStoreError::validation)?;
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|post| post.id == *id) else {
            return Ok(None);
        };
        if let Some(body) = patch.body {
            post.body = body;
        }
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: &EntityId) -> Result<Option<Post>, PostStoreError> {
        let mut posts = self.posts.write().await;
        let Some(position) = posts.iter().position(|post| post.id == *id) else {
            return Ok(None);
        };
        Ok(Some(posts.remove(position)))
    }

    async fn delete_many(&self, ids: &[EntityId]) -> Result<usize, PostStoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|post| !ids.contains(&post.id));
        Ok(before - posts.len())
    }

    async fn push_reaction(
        &self,
        id: &EntityId,
        reaction: Reaction,
    ) -> Result<Option<Post>, PostStoreError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|post| post.id == *id) else {
            return Ok(None);
        };
        // Set semantics on the reaction identifier keep the sequence free of
        // duplicate ids.
        if post.reaction(&reaction.id).is_none() {
            post.reactions.push(reaction);
        }
        Ok(Some(post.clone()))
    }

    async fn pull_reaction(
        &self,
        id: &EntityId,
        reaction_id: &EntityId,
    ) -> Result<Option<ReactionRemoval>, PostStoreError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|post| post.id == *id) else {
            return Ok(None);
        };
        let before = post.reactions.len();
        post.reactions.retain(|reaction| reaction.id != *reaction_id);
        let removed = post.reactions.len() != before;
        Ok(Some(ReactionRemoval {
            post: post.clone(),
            removed,
        }))
    }
}
