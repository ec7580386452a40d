//! Person aggregate: unique identity plus post and friend reference sets.
//!
//! ## Invariants
//! - `handle` and `address` are globally unique across all Persons.
//! - `friends` behaves as an ordered set: no duplicates, never contains the
//!   person's own identifier, and every entry is mirrored on the other side
//!   (friendship is symmetric).
//! - `posts` behaves as an ordered set of identifiers of Posts this person
//!   authored.

use serde::{Deserialize, Serialize};

use crate::domain::ident::EntityId;
use crate::domain::post::Post;
use crate::domain::validation::{validate_address, validate_handle, FieldViolation};

/// An account in the social graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: EntityId,
    pub handle: String,
    pub address: String,
    pub posts: Vec<EntityId>,
    pub friends: Vec<EntityId>,
}

impl Person {
    /// Derived attribute: the size of the friend-reference set.
    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    /// Whether the friend-reference set contains the given identifier.
    pub fn has_friend(&self, id: &EntityId) -> bool {
        self.friends.contains(id)
    }

    /// Whether the post-reference set contains the given identifier.
    pub fn has_post(&self, id: &EntityId) -> bool {
        self.posts.contains(id)
    }
}

/// Input payload for creating a Person. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDraft {
    pub handle: String,
    pub address: String,
}

impl PersonDraft {
    /// Run the store's field constraints, collecting every violation and
    /// trimming the fields on success.
    pub fn normalized(self) -> Result<Self, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let handle = validate_handle(&self.handle)
            .map_err(|violation| violations.push(violation))
            .ok();
        let address = validate_address(&self.address)
            .map_err(|violation| violations.push(violation))
            .ok();
        match (handle, address) {
            (Some(handle), Some(address)) => Ok(Self { handle, address }),
            _ => Err(violations),
        }
    }
}

/// Atomic field-level update for a Person. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    pub handle: Option<String>,
    pub address: Option<String>,
}

impl PersonPatch {
    /// Whether the patch changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.handle.is_none() && self.address.is_none()
    }

    /// Run the store's field constraints over the fields present in the
    /// patch, collecting every violation.
    pub fn normalized(self) -> Result<Self, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let handle = match self.handle {
            Some(handle) => validate_handle(&handle)
                .map_err(|violation| violations.push(violation))
                .ok()
                .map(Some),
            None => Some(None),
        };
        let address = match self.address {
            Some(address) => validate_address(&address)
                .map_err(|violation| violations.push(violation))
                .ok()
                .map(Some),
            None => Some(None),
        };
        match (handle, address) {
            (Some(handle), Some(address)) => Ok(Self { handle, address }),
            _ => Err(violations),
        }
    }
}

/// A Person with its friend and post references resolved into full records.
///
/// Dangling references (targets removed while a cascade is in progress) are
/// skipped during resolution rather than surfaced as failures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    pub person: Person,
    pub friends: Vec<Person>,
    pub posts: Vec<Post>,
}

/// Outcome of a successful person cascade deletion, naming what each
/// sub-step removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDeletion {
    pub person_id: EntityId,
    pub posts_deleted: usize,
    pub friend_references_removed: usize,
}
