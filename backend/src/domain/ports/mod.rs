//! Domain ports for the hexagonal boundary.
//!
//! Driven ports ([`PersonStore`], [`PostStore`]) describe the entity-store
//! adapter the services consume; driving ports ([`PeopleQuery`],
//! [`PeopleCommand`], [`PostsQuery`], [`PostsCommand`]) describe the use
//! cases the inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod people_command;
mod people_query;
mod person_store;
mod post_store;
mod posts_command;
mod posts_query;

#[cfg(test)]
pub use people_command::MockPeopleCommand;
pub use people_command::PeopleCommand;
#[cfg(test)]
pub use people_query::MockPeopleQuery;
pub use people_query::PeopleQuery;
#[cfg(test)]
pub use person_store::MockPersonStore;
pub use person_store::{PersonStore, PersonStoreError};
#[cfg(test)]
pub use post_store::MockPostStore;
pub use post_store::{PostStore, PostStoreError};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::{NewPost, PostsCommand};
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::PostsQuery;
