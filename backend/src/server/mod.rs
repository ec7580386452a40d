//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use actix_web::{web, Scope};

use crate::inbound::http::people::{
    add_friend, create_person, delete_person, get_person, list_people, remove_friend,
    update_person,
};
use crate::inbound::http::posts::{
    add_reaction, create_post, delete_post, get_post, list_posts, remove_reaction, update_post,
};

/// Build the `/api` scope with every graph endpoint registered.
///
/// Handlers expect an [`crate::inbound::http::state::HttpState`] in app data;
/// registration is shared between the binary and the integration tests.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(list_people)
        .service(create_person)
        .service(get_person)
        .service(update_person)
        .service(delete_person)
        .service(add_friend)
        .service(remove_friend)
        .service(list_posts)
        .service(create_post)
        .service(get_post)
        .service(update_post)
        .service(delete_post)
        .service(add_reaction)
        .service(remove_reaction)
}
