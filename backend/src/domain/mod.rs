//! Domain entities, services, and ports for the social graph.
//!
//! The types here are transport agnostic: inbound adapters translate them to
//! HTTP payloads, outbound adapters persist them behind the store ports. Each
//! aggregate documents its invariants in its own module.

pub mod error;
pub mod ident;
pub mod people;
pub mod person;
pub mod ports;
pub mod post;
pub mod posts;
pub mod validation;

pub use self::error::{Error, ErrorCode};
pub use self::ident::{EntityId, MalformedIdentifier};
pub use self::people::PeopleService;
pub use self::person::{Person, PersonDeletion, PersonDraft, PersonPatch, PersonProfile};
pub use self::post::{
    Post, PostDeletion, PostDraft, PostPatch, Reaction, ReactionDraft, ReactionRemoval,
};
pub use self::posts::PostsService;
pub use self::validation::FieldViolation;

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
