//! Driving port for Person reads.

use async_trait::async_trait;

use crate::domain::ident::EntityId;
use crate::domain::person::{Person, PersonProfile};
use crate::domain::DomainResult;

/// Read-side use cases for Persons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeopleQuery: Send + Sync {
    /// List every Person.
    async fn list_people(&self) -> DomainResult<Vec<Person>>;

    /// Fetch one Person with its friend and post references resolved.
    async fn get_person(&self, id: &EntityId) -> DomainResult<PersonProfile>;
}
