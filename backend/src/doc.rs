//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (people, posts,
//!   health)
//! - **Schemas**: Request and response payloads plus the domain error
//!   wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]) that provide OpenAPI
//!   definitions without coupling domain types to the utoipa framework
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::people::{
    CreatePersonRequest, PersonDeletionResponse, PersonProfileResponse, PersonResponse,
    UpdatePersonRequest,
};
use crate::inbound::http::posts::{
    CreatePostRequest, PostDeletionResponse, PostResponse, ReactionRequest, ReactionResponse,
    UpdatePostRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social graph API",
        description = "Referential-integrity engine over people, posts, and reactions.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::people::list_people,
        crate::inbound::http::people::create_person,
        crate::inbound::http::people::get_person,
        crate::inbound::http::people::update_person,
        crate::inbound::http::people::delete_person,
        crate::inbound::http::people::add_friend,
        crate::inbound::http::people::remove_friend,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::posts::add_reaction,
        crate::inbound::http::posts::remove_reaction,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreatePersonRequest,
        UpdatePersonRequest,
        PersonResponse,
        PersonProfileResponse,
        PersonDeletionResponse,
        CreatePostRequest,
        UpdatePostRequest,
        ReactionRequest,
        PostResponse,
        ReactionResponse,
        PostDeletionResponse,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "people", description = "Person records and the friendship engine"),
        (name = "posts", description = "Posts and embedded reactions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_registers_every_path() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/people",
            "/api/people/{person_id}",
            "/api/people/{person_id}/friends/{friend_id}",
            "/api/posts",
            "/api/posts/{post_id}",
            "/api/posts/{post_id}/reactions",
            "/api/posts/{post_id}/reactions/{reaction_id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn openapi_document_registers_the_error_schema() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        // utoipa replaces :: with . in schema names
        assert!(schemas.contains_key("crate.domain.Error"));
        assert!(schemas.contains_key("crate.domain.ErrorCode"));
    }
}
