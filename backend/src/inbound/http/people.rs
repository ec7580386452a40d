//! Person API handlers.
//!
//! ```text
//! GET    /api/people
//! POST   /api/people
//! GET    /api/people/{person_id}
//! PUT    /api/people/{person_id}
//! DELETE /api/people/{person_id}
//! POST   /api/people/{person_id}/friends/{friend_id}
//! DELETE /api/people/{person_id}/friends/{friend_id}
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Person, PersonDeletion, PersonDraft, PersonPatch, PersonProfile};
use crate::inbound::http::posts::PostResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_entity_id, FieldName};
use crate::inbound::http::ApiResult;

const PERSON_ID: FieldName = FieldName::new("personId");
const FRIEND_ID: FieldName = FieldName::new("friendId");

#[derive(Debug, Deserialize)]
struct PersonPath {
    person_id: String,
}

#[derive(Debug, Deserialize)]
struct FriendPath {
    person_id: String,
    friend_id: String,
}

/// Request payload for creating a Person.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    pub handle: Option<String>,
    pub address: Option<String>,
}

/// Request payload for updating a Person's fields.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    pub handle: Option<String>,
    pub address: Option<String>,
}

/// Response payload for a Person record; references stay unresolved.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: String,
    pub handle: String,
    pub address: String,
    pub posts: Vec<String>,
    pub friends: Vec<String>,
}

/// Response payload for a single Person with references resolved.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfileResponse {
    pub id: String,
    pub handle: String,
    pub address: String,
    pub friends: Vec<PersonResponse>,
    pub posts: Vec<PostResponse>,
}

/// Response payload summarising a person cascade.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDeletionResponse {
    pub person_id: String,
    pub posts_deleted: usize,
    pub friend_references_removed: usize,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id.to_string(),
            handle: person.handle,
            address: person.address,
            posts: person.posts.iter().map(ToString::to_string).collect(),
            friends: person.friends.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<PersonProfile> for PersonProfileResponse {
    fn from(profile: PersonProfile) -> Self {
        Self {
            id: profile.person.id.to_string(),
            handle: profile.person.handle,
            address: profile.person.address,
            friends: profile
                .friends
                .into_iter()
                .map(PersonResponse::from)
                .collect(),
            posts: profile.posts.into_iter().map(PostResponse::from).collect(),
        }
    }
}

impl From<PersonDeletion> for PersonDeletionResponse {
    fn from(deletion: PersonDeletion) -> Self {
        Self {
            person_id: deletion.person_id.to_string(),
            posts_deleted: deletion.posts_deleted,
            friend_references_removed: deletion.friend_references_removed,
        }
    }
}

fn parse_create_request(payload: CreatePersonRequest) -> Result<PersonDraft, Error> {
    let handle = payload.handle.ok_or_else(|| missing_field_error(FieldName::new("handle")))?;
    let address = payload
        .address
        .ok_or_else(|| missing_field_error(FieldName::new("address")))?;
    Ok(PersonDraft { handle, address })
}

/// List every Person.
#[utoipa::path(
    get,
    path = "/api/people",
    responses(
        (status = 200, description = "All people", body = [PersonResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["people"],
    operation_id = "listPeople"
)]
#[get("/people")]
pub async fn list_people(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PersonResponse>>> {
    let people = state.people_query.list_people().await?;
    Ok(web::Json(
        people.into_iter().map(PersonResponse::from).collect(),
    ))
}

/// Create a Person behind the duplicate-identity guard.
#[utoipa::path(
    post,
    path = "/api/people",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Handle or address already in use", body = ErrorSchema)
    ),
    tags = ["people"],
    operation_id = "createPerson"
)]
#[post("/people")]
pub async fn create_person(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePersonRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create_request(payload.into_inner())?;
    let person = state.people.create_person(draft).await?;
    Ok(HttpResponse::Created().json(PersonResponse::from(person)))
}

/// Fetch one Person with friends and posts resolved.
#[utoipa::path(
    get,
    path = "/api/people/{person_id}",
    params(("person_id" = String, Path, description = "Person identifier")),
    responses(
        (status = 200, description = "Person profile", body = PersonProfileResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such person", body = ErrorSchema)
    ),
    tags = ["people"],
    operation_id = "getPerson"
)]
#[get("/people/{person_id}")]
pub async fn get_person(
    state: web::Data<HttpState>,
    path: web::Path<PersonPath>,
) -> ApiResult<web::Json<PersonProfileResponse>> {
    let id = parse_entity_id(&path.person_id, PERSON_ID)?;
    let profile = state.people_query.get_person(&id).await?;
    Ok(web::Json(PersonProfileResponse::from(profile)))
}

/// Update a Person's handle or contact address.
#[utoipa::path(
    put,
    path = "/api/people/{person_id}",
    params(("person_id" = String, Path, description = "Person identifier")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such person", body = ErrorSchema),
        (status = 409, description = "Handle or address already in use", body = ErrorSchema)
    ),
    tags = ["people"],
    operation_id = "updatePerson"
)]
#[put("/people/{person_id}")]
pub async fn update_person(
    state: web::Data<HttpState>,
    path: web::Path<PersonPath>,
    payload: web::Json<UpdatePersonRequest>,
) -> ApiResult<web::Json<PersonResponse>> {
    let id = parse_entity_id(&path.person_id, PERSON_ID)?;
    let payload = payload.into_inner();
    let patch = PersonPatch {
        handle: payload.handle,
        address: payload.address,
    };
    let person = state.people.update_person(&id, patch).await?;
    Ok(web::Json(PersonResponse::from(person)))
}

/// Delete a Person together with its posts and every friend reference
/// pointing at it.
#[utoipa::path(
    delete,
    path = "/api/people/{person_id}",
    params(("person_id" = String, Path, description = "Person identifier")),
    responses(
        (status = 200, description = "Cascade complete", body = PersonDeletionResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such person", body = ErrorSchema),
        (status = 500, description = "Cascade partially applied", body = ErrorSchema)
    ),
    tags = ["people"],
    operation_id = "deletePerson"
)]
#[delete("/people/{person_id}")]
pub async fn delete_person(
    state: web::Data<HttpState>,
    path: web::Path<PersonPath>,
) -> ApiResult<web::Json<PersonDeletionResponse>> {
    let id = parse_entity_id(&path.person_id, PERSON_ID)?;
    let deletion = state.people.delete_person(&id).await?;
    Ok(web::Json(PersonDeletionResponse::from(deletion)))
}

/// Record a symmetric friendship between two people.
#[utoipa::path(
    post,
    path = "/api/people/{person_id}/friends/{friend_id}",
    params(
        ("person_id" = String, Path, description = "Person identifier"),
        ("friend_id" = String, Path, description = "Friend identifier")
    ),
    responses(
        (status = 200, description = "Friendship recorded", body = PersonResponse),
        (status = 400, description = "Malformed identifier or self friendship", body = ErrorSchema),
        (status = 404, description = "No such person", body = ErrorSchema),
        (status = 500, description = "Friendship recorded in one direction only", body = ErrorSchema)
    ),
    tags = ["people"],
    operation_id = "addFriend"
)]
#[post("/people/{person_id}/friends/{friend_id}")]
pub async fn add_friend(
    state: web::Data<HttpState>,
    path: web::Path<FriendPath>,
) -> ApiResult<web::Json<PersonResponse>> {
    let person_id = parse_entity_id(&path.person_id, PERSON_ID)?;
    let friend_id = parse_entity_id(&path.friend_id, FRIEND_ID)?;
    let person = state.people.add_friend(&person_id, &friend_id).await?;
    Ok(web::Json(PersonResponse::from(person)))
}

/// Remove a friendship from both sides.
#[utoipa::path(
    delete,
    path = "/api/people/{person_id}/friends/{friend_id}",
    params(
        ("person_id" = String, Path, description = "Person identifier"),
        ("friend_id" = String, Path, description = "Friend identifier")
    ),
    responses(
        (status = 200, description = "Friendship removed", body = PersonResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such person", body = ErrorSchema)
    ),
    tags = ["people"],
    operation_id = "removeFriend"
)]
#[delete("/people/{person_id}/friends/{friend_id}")]
pub async fn remove_friend(
    state: web::Data<HttpState>,
    path: web::Path<FriendPath>,
) -> ApiResult<web::Json<PersonResponse>> {
    let person_id = parse_entity_id(&path.person_id, PERSON_ID)?;
    let friend_id = parse_entity_id(&path.friend_id, FRIEND_ID)?;
    let person = state.people.remove_friend(&person_id, &friend_id).await?;
    Ok(web::Json(PersonResponse::from(person)))
}
