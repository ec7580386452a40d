//! Person domain services: the duplicate-identity guard, the friendship
//! consistency engine, and the person half of cascade deletion.
//!
//! The service is stateless between requests; all shared state lives behind
//! the store ports. Multi-step procedures are deliberately not wrapped in a
//! store transaction: each step's failure mode is explicit, and a step that
//! completes is reported as completed even when a later step fails.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ident::EntityId;
use crate::domain::person::{Person, PersonDeletion, PersonDraft, PersonPatch, PersonProfile};
use crate::domain::ports::{
    PeopleCommand, PeopleQuery, PersonStore, PersonStoreError, PostStore, PostStoreError,
};
use crate::domain::validation::validation_error;
use crate::domain::{DomainResult, Error};

/// Person service implementing the driving ports.
pub struct PeopleService<P, T> {
    people: Arc<P>,
    posts: Arc<T>,
}

impl<P, T> PeopleService<P, T> {
    /// Create a new service over the given store adapters.
    pub fn new(people: Arc<P>, posts: Arc<T>) -> Self {
        Self { people, posts }
    }
}

// A derive would demand `P: Clone` and `T: Clone`; only the handles are
// cloned.
impl<P, T> Clone for PeopleService<P, T> {
    fn clone(&self) -> Self {
        Self {
            people: Arc::clone(&self.people),
            posts: Arc::clone(&self.posts),
        }
    }
}

/// Classify a Person store failure. Store failures are never swallowed and
/// never retried here; connection loss surfaces as unavailability, anything
/// else as an internal failure, and the store's own uniqueness constraint as
/// the same conflict the pre-check raises.
pub(crate) fn map_person_store_error(error: PersonStoreError) -> Error {
    match error {
        PersonStoreError::Connection { message } => {
            Error::service_unavailable(format!("person store unavailable: {message}"))
        }
        PersonStoreError::Query { message } => {
            Error::internal(format!("person store error: {message}"))
        }
        PersonStoreError::Validation { violations } => validation_error(&violations),
        PersonStoreError::DuplicateIdentity { fields } => duplicate_identity_error(&fields),
    }
}

pub(crate) fn map_post_store_error(error: PostStoreError) -> Error {
    match error {
        PostStoreError::Connection { message } => {
            Error::service_unavailable(format!("post store unavailable: {message}"))
        }
        PostStoreError::Query { message } => Error::internal(format!("post store error: {message}")),
        PostStoreError::Validation { violations } => validation_error(&violations),
    }
}

pub(crate) fn person_not_found(id: &EntityId) -> Error {
    Error::not_found("no person with that identifier")
        .with_details(json!({ "personId": id.to_string() }))
}

fn duplicate_identity_error(fields: &[&str]) -> Error {
    Error::conflict("handle or contact address already in use").with_details(json!({
        "fields": fields,
        "code": "duplicate_identity",
    }))
}

fn self_friendship_error(id: &EntityId) -> Error {
    Error::invalid_request("a person cannot befriend themselves").with_details(json!({
        "personId": id.to_string(),
        "code": "self_friendship",
    }))
}

fn cascade_failure(
    message: &str,
    completed: &[&str],
    failed: &str,
    source: &dyn std::fmt::Display,
) -> Error {
    Error::partial_failure(message).with_details(json!({
        "completed": completed,
        "failed": failed,
        "source": source.to_string(),
    }))
}

#[async_trait]
impl<P, T> PeopleQuery for PeopleService<P, T>
where
    P: PersonStore,
    T: PostStore,
{
    async fn list_people(&self) -> DomainResult<Vec<Person>> {
        self.people.list().await.map_err(map_person_store_error)
    }

    async fn get_person(&self, id: &EntityId) -> DomainResult<PersonProfile> {
        let person = self
            .people
            .find_by_id(id)
            .await
            .map_err(map_person_store_error)?
            .ok_or_else(|| person_not_found(id))?;

        let mut friends = Vec::with_capacity(person.friends.len());
        for friend_id in &person.friends {
            match self
                .people
                .find_by_id(friend_id)
                .await
                .map_err(map_person_store_error)?
            {
                Some(friend) => friends.push(friend),
                None => debug!(friend = %friend_id, "skipping dangling friend reference"),
            }
        }

        let mut posts = Vec::with_capacity(person.posts.len());
        for post_id in &person.posts {
            match self
                .posts
                .find_by_id(post_id)
                .await
                .map_err(map_post_store_error)?
            {
                Some(post) => posts.push(post),
                None => debug!(post = %post_id, "skipping dangling post reference"),
            }
        }

        Ok(PersonProfile {
            person,
            friends,
            posts,
        })
    }
}

#[async_trait]
impl<P, T> PeopleCommand for PeopleService<P, T>
where
    P: PersonStore,
    T: PostStore,
{
    async fn create_person(&self, draft: PersonDraft) -> DomainResult<Person> {
        let handle = draft.handle.trim();
        let address = draft.address.trim();
        if let Some(existing) = self
            .people
            .find_by_identity(handle, address)
            .await
            .map_err(map_person_store_error)?
        {
            let mut fields = Vec::new();
            if existing.handle == handle {
                fields.push("handle");
            }
            if existing.address == address {
                fields.push("address");
            }
            return Err(duplicate_identity_error(&fields));
        }

        // The check above races against concurrent creators; the store's
        // unique index is the final backstop and maps to the same conflict.
        self.people
            .create(draft)
            .await
            .map_err(map_person_store_error)
    }

    async fn update_person(&self, id: &EntityId, patch: PersonPatch) -> DomainResult<Person> {
        if patch.is_empty() {
            return Err(Error::invalid_request("no fields to update")
                .with_details(json!({ "code": "empty_patch" })));
        }
        self.people
            .update(id, patch)
            .await
            .map_err(map_person_store_error)?
            .ok_or_else(|| person_not_found(id))
    }

    async fn delete_person(&self, id: &EntityId) -> DomainResult<PersonDeletion> {
        let person = self
            .people
            .delete(id)
            .await
            .map_err(map_person_store_error)?
            .ok_or_else(|| person_not_found(id))?;

        let posts_deleted = self.posts.delete_many(&person.posts).await.map_err(|error| {
            warn!(person = %id, error = %error, "person cascade failed while deleting posts");
            cascade_failure(
                "person removed but owned posts were not deleted",
                &["person_record"],
                "posts",
                &error,
            )
        })?;

        let friend_references_removed = self
            .people
            .remove_friend_ref_from_all(id)
            .await
            .map_err(|error| {
                warn!(person = %id, error = %error, "person cascade failed while pruning friend references");
                cascade_failure(
                    "person and posts removed but friend references remain",
                    &["person_record", "posts"],
                    "friend_references",
                    &error,
                )
            })?;

        info!(
            person = %id,
            posts_deleted,
            friend_references_removed,
            "person cascade complete"
        );
        Ok(PersonDeletion {
            person_id: *id,
            posts_deleted,
            friend_references_removed,
        })
    }

    async fn add_friend(&self, person_id: &EntityId, friend_id: &EntityId) -> DomainResult<Person> {
        if person_id == friend_id {
            return Err(self_friendship_error(person_id));
        }

        if self
            .people
            .find_by_id(friend_id)
            .await
            .map_err(map_person_store_error)?
            .is_none()
        {
            return Err(person_not_found(friend_id));
        }

        let person = self
            .people
            .insert_friend_ref(person_id, friend_id)
            .await
            .map_err(map_person_store_error)?
            .ok_or_else(|| person_not_found(person_id))?;

        // The forward edge is in; the reverse edge must follow or the
        // asymmetry has to be reported, never left silent.
        match self.people.insert_friend_ref(friend_id, person_id).await {
            Ok(Some(_)) => Ok(person),
            Ok(None) => {
                warn!(person = %person_id, friend = %friend_id, "friend vanished after forward edge was recorded");
                Err(Error::partial_failure("friendship recorded in one direction only")
                    .with_details(json!({
                        "completed": ["forward_edge"],
                        "failed": "reverse_edge",
                        "personId": person_id.to_string(),
                        "friendId": friend_id.to_string(),
                        "code": "asymmetric_friendship",
                    })))
            }
            Err(error) => {
                warn!(person = %person_id, friend = %friend_id, error = %error, "reverse friend edge failed");
                Err(cascade_failure(
                    "friendship recorded in one direction only",
                    &["forward_edge"],
                    "reverse_edge",
                    &error,
                ))
            }
        }
    }

    async fn remove_friend(
        &self,
        person_id: &EntityId,
        friend_id: &EntityId,
    ) -> DomainResult<Person> {
        let person = self
            .people
            .remove_friend_ref(person_id, friend_id)
            .await
            .map_err(map_person_store_error)?
            .ok_or_else(|| person_not_found(person_id))?;

        // A friend document that no longer exists carries no edge, so the
        // removal is already complete on that side.
        match self.people.remove_friend_ref(friend_id, person_id).await {
            Ok(_) => Ok(person),
            Err(error) => {
                warn!(person = %person_id, friend = %friend_id, error = %error, "reverse friend edge removal failed");
                Err(cascade_failure(
                    "friendship removed in one direction only",
                    &["forward_edge"],
                    "reverse_edge",
                    &error,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests;
