//! Post API handlers, including the reaction subdocument endpoints.
//!
//! ```text
//! GET    /api/posts
//! POST   /api/posts
//! GET    /api/posts/{post_id}
//! PUT    /api/posts/{post_id}
//! DELETE /api/posts/{post_id}
//! POST   /api/posts/{post_id}/reactions
//! DELETE /api/posts/{post_id}/reactions/{reaction_id}
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::NewPost;
use crate::domain::{Error, Post, PostDeletion, PostPatch, Reaction, ReactionDraft};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_entity_id, FieldName};
use crate::inbound::http::ApiResult;

const POST_ID: FieldName = FieldName::new("postId");
const REACTION_ID: FieldName = FieldName::new("reactionId");

#[derive(Debug, Deserialize)]
struct PostPath {
    post_id: String,
}

#[derive(Debug, Deserialize)]
struct ReactionPath {
    post_id: String,
    reaction_id: String,
}

/// Request payload for creating a Post.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub author_id: Option<String>,
    pub author_handle: Option<String>,
    pub body: Option<String>,
}

/// Request payload for updating a Post's body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub body: Option<String>,
}

/// Request payload for appending a reaction.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    pub body: Option<String>,
    pub author_handle: Option<String>,
}

/// Response payload for an embedded reaction.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub id: String,
    pub body: String,
    pub author_handle: String,
    pub created_at: String,
}

/// Response payload for a Post with its reaction sequence.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub body: String,
    pub author_handle: String,
    pub created_at: String,
    pub reactions: Vec<ReactionResponse>,
}

/// Response payload for a Post deletion, flagging whether the owning Person
/// was unlinked.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDeletionResponse {
    pub post_id: String,
    pub owner_unlinked: bool,
}

impl From<Reaction> for ReactionResponse {
    fn from(reaction: Reaction) -> Self {
        Self {
            id: reaction.id.to_string(),
            body: reaction.body,
            author_handle: reaction.author_handle,
            created_at: reaction.created_at.to_rfc3339(),
        }
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            body: post.body,
            author_handle: post.author_handle,
            created_at: post.created_at.to_rfc3339(),
            reactions: post
                .reactions
                .into_iter()
                .map(ReactionResponse::from)
                .collect(),
        }
    }
}

impl From<PostDeletion> for PostDeletionResponse {
    fn from(deletion: PostDeletion) -> Self {
        Self {
            post_id: deletion.post_id.to_string(),
            owner_unlinked: deletion.owner_unlinked,
        }
    }
}

fn parse_create_request(payload: CreatePostRequest) -> Result<NewPost, Error> {
    let author_id = payload
        .author_id
        .ok_or_else(|| missing_field_error(FieldName::new("authorId")))?;
    let author_handle = payload
        .author_handle
        .ok_or_else(|| missing_field_error(FieldName::new("authorHandle")))?;
    let body = payload
        .body
        .ok_or_else(|| missing_field_error(FieldName::new("body")))?;
    Ok(NewPost {
        author_id: parse_entity_id(&author_id, FieldName::new("authorId"))?,
        author_handle,
        body,
    })
}

fn parse_reaction_request(payload: ReactionRequest) -> Result<ReactionDraft, Error> {
    let body = payload
        .body
        .ok_or_else(|| missing_field_error(FieldName::new("body")))?;
    let author_handle = payload
        .author_handle
        .ok_or_else(|| missing_field_error(FieldName::new("authorHandle")))?;
    Ok(ReactionDraft {
        body,
        author_handle,
    })
}

/// List every Post.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "All posts", body = [PostResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let posts = state.posts_query.list_posts().await?;
    Ok(web::Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Create a Post on behalf of an author and link it to them.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid request or stale author handle", body = ErrorSchema),
        (status = 404, description = "No such author", body = ErrorSchema),
        (status = 500, description = "Post created but not linked", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let new_post = parse_create_request(payload.into_inner())?;
    let post = state.posts.create_post(new_post).await?;
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// Fetch one Post, embedded reactions included.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{post_id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
) -> ApiResult<web::Json<PostResponse>> {
    let id = parse_entity_id(&path.post_id, POST_ID)?;
    let post = state.posts_query.get_post(&id).await?;
    Ok(web::Json(PostResponse::from(post)))
}

/// Update a Post's body. The author handle snapshot and reactions are not
/// patchable.
#[utoipa::path(
    put,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/posts/{post_id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
    payload: web::Json<UpdatePostRequest>,
) -> ApiResult<web::Json<PostResponse>> {
    let id = parse_entity_id(&path.post_id, POST_ID)?;
    let patch = PostPatch {
        body: payload.into_inner().body,
    };
    let post = state.posts.update_post(&id, patch).await?;
    Ok(web::Json(PostResponse::from(post)))
}

/// Delete a Post and unlink it from its owning Person.
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = PostDeletionResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema),
        (status = 500, description = "Post deleted but owner not unlinked", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{post_id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
) -> ApiResult<web::Json<PostDeletionResponse>> {
    let id = parse_entity_id(&path.post_id, POST_ID)?;
    let deletion = state.posts.delete_post(&id).await?;
    Ok(web::Json(PostDeletionResponse::from(deletion)))
}

/// Append a reaction to a Post.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/reactions",
    params(("post_id" = String, Path, description = "Post identifier")),
    request_body = ReactionRequest,
    responses(
        (status = 201, description = "Reaction appended", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "addReaction"
)]
#[post("/posts/{post_id}/reactions")]
pub async fn add_reaction(
    state: web::Data<HttpState>,
    path: web::Path<PostPath>,
    payload: web::Json<ReactionRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_entity_id(&path.post_id, POST_ID)?;
    let draft = parse_reaction_request(payload.into_inner())?;
    let post = state.posts.add_reaction(&id, draft).await?;
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// Remove a reaction from a Post by identifier.
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/reactions/{reaction_id}",
    params(
        ("post_id" = String, Path, description = "Post identifier"),
        ("reaction_id" = String, Path, description = "Reaction identifier")
    ),
    responses(
        (status = 200, description = "Reaction removed", body = PostResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such post or reaction", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "removeReaction"
)]
#[delete("/posts/{post_id}/reactions/{reaction_id}")]
pub async fn remove_reaction(
    state: web::Data<HttpState>,
    path: web::Path<ReactionPath>,
) -> ApiResult<web::Json<PostResponse>> {
    let post_id = parse_entity_id(&path.post_id, POST_ID)?;
    let reaction_id = parse_entity_id(&path.reaction_id, REACTION_ID)?;
    let post = state.posts.remove_reaction(&post_id, &reaction_id).await?;
    Ok(web::Json(PostResponse::from(post)))
}
