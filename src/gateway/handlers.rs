//! HTTP handlers: thin adapters between the wire and the resolver layer

use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::state::AppState;
use super::types::{
    FeedQuery, HealthResponse, ImageUploadResponse, LoginRequest, PostInput, SignupRequest,
    StatusUpdateRequest,
};
use crate::auth::gate::AuthContext;
use crate::content::models::{AuthPayload, FeedPage, PostDto, UserDto};
use crate::error::{ApiError, FieldError};
use crate::images::content_type_for;

/// Health check, including database reachability
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses((status = 200, description = "Service health report", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.db.health_check().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "database health check failed");
            "down"
        }
    };
    Json(HealthResponse {
        status: if database == "up" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 422, description = "Invalid input or e-mail already registered")
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let user = state
        .resolvers
        .create_user(&req.email, &req.password, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthPayload),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "No user for this e-mail")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthPayload>, ApiError> {
    let payload = state.resolvers.login(&req.email, &req.password).await?;
    Ok(Json(payload))
}

/// One page of the feed
#[utoipa::path(
    get,
    path = "/api/v1/feed/posts",
    params(("page" = Option<i64>, Query, description = "Page number, defaults to 1")),
    responses(
        (status = 200, description = "Page of posts plus total count", body = FeedPage),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Feed"
)]
pub async fn get_posts(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedPage>, ApiError> {
    let page = state.resolvers.get_posts(&ctx, query.page).await?;
    Ok(Json(page))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/api/v1/feed/posts",
    request_body = PostInput,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Feed"
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<PostInput>,
) -> Result<(StatusCode, Json<PostDto>), ApiError> {
    let post = state
        .resolvers
        .create_post(&ctx, &req.title, &req.content, &req.image_url)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Fetch a single post
#[utoipa::path(
    get,
    path = "/api/v1/feed/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post with its creator", body = PostDto),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Post not found")
    ),
    tag = "Feed"
)]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<PostDto>, ApiError> {
    let post = state.resolvers.post(&ctx, id).await?;
    Ok(Json(post))
}

/// Update a post (creator only)
#[utoipa::path(
    put,
    path = "/api/v1/feed/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    request_body = PostInput,
    responses(
        (status = 200, description = "Updated post", body = PostDto),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the creator"),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Invalid input")
    ),
    tag = "Feed"
)]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<PostInput>,
) -> Result<Json<PostDto>, ApiError> {
    let post = state
        .resolvers
        .update_post(&ctx, id, &req.title, &req.content, &req.image_url)
        .await?;
    Ok(Json(post))
}

/// Delete a post (creator only)
#[utoipa::path(
    delete,
    path = "/api/v1/feed/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the creator"),
        (status = 404, description = "Post not found")
    ),
    tag = "Feed"
)]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.resolvers.delete_post(&ctx, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// The acting user's own record
#[utoipa::path(
    get,
    path = "/api/v1/user",
    responses(
        (status = 200, description = "Acting user's record", body = UserDto),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Account no longer exists")
    ),
    tag = "User"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.resolvers.user(&ctx).await?;
    Ok(Json(user))
}

/// Overwrite the acting user's status
#[utoipa::path(
    put,
    path = "/api/v1/user/status",
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated user record", body = UserDto),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Account no longer exists")
    ),
    tag = "User"
)]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.resolvers.update_status(&ctx, &req.status).await?;
    Ok(Json(user))
}

/// Upload an image (multipart field `image`). Non-PNG/JPEG payloads are
/// dropped silently and `imageUrl` comes back null.
#[utoipa::path(
    post,
    path = "/api/v1/images",
    responses(
        (status = 200, description = "Stored image URL, or null if rejected", body = ImageUploadResponse),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Images"
)]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
    mut multipart: Multipart,
) -> Result<Json<ImageUploadResponse>, ApiError> {
    ctx.require()?;

    let mut image_url = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::InvalidInput(vec![FieldError::new("malformed multipart body")]))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let suggested = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| ApiError::InvalidInput(vec![FieldError::new("unreadable image field")]))?;
        image_url = state.images.store(&bytes, &suggested).await?;
        break;
    }

    Ok(Json(ImageUploadResponse { image_url }))
}

/// Serve a stored image
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    match state.images.load(&name).await? {
        Some(bytes) => {
            let headers = [(header::CONTENT_TYPE, content_type_for(&name))];
            Ok((headers, bytes).into_response())
        }
        None => Err(ApiError::NotFound("image not found")),
    }
}
