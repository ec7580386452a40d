//! Driving port for Person mutations: creation behind the duplicate-identity
//! guard, field updates, the person cascade, and the friendship engine.

use async_trait::async_trait;

use crate::domain::ident::EntityId;
use crate::domain::person::{Person, PersonDeletion, PersonDraft, PersonPatch};
use crate::domain::DomainResult;

/// Write-side use cases for Persons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeopleCommand: Send + Sync {
    /// Create a Person, failing with a conflict when the handle or contact
    /// address is already taken.
    async fn create_person(&self, draft: PersonDraft) -> DomainResult<Person>;

    /// Apply a field-level update to a Person.
    async fn update_person(&self, id: &EntityId, patch: PersonPatch) -> DomainResult<Person>;

    /// Delete a Person together with every Post it owns and every friend
    /// reference pointing at it.
    async fn delete_person(&self, id: &EntityId) -> DomainResult<PersonDeletion>;

    /// Record a symmetric friendship between two Persons, returning the
    /// first Person's updated record.
    async fn add_friend(&self, person_id: &EntityId, friend_id: &EntityId)
        -> DomainResult<Person>;

    /// Remove a friendship from both sides; removing an absent edge is an
    /// idempotent success.
    async fn remove_friend(
        &self,
        person_id: &EntityId,
        friend_id: &EntityId,
    ) -> DomainResult<Person>;
}
