//! OpenAPI document for Swagger UI

use utoipa::OpenApi;

use super::handlers;
use super::types::{
    HealthResponse, ImageUploadResponse, LoginRequest, PostInput, SignupRequest,
    StatusUpdateRequest,
};
use crate::content::models::{AuthPayload, CreatorDto, FeedPage, PostDto, UserDto};
use crate::error::FieldError;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "inkfeed API",
        description = "Content-management backend: bearer-token auth and CRUD over posts"
    ),
    paths(
        handlers::health_check,
        handlers::signup,
        handlers::login,
        handlers::get_posts,
        handlers::create_post,
        handlers::get_post,
        handlers::update_post,
        handlers::delete_post,
        handlers::get_user,
        handlers::update_status,
        handlers::upload_image,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        PostInput,
        StatusUpdateRequest,
        ImageUploadResponse,
        HealthResponse,
        AuthPayload,
        CreatorDto,
        FeedPage,
        PostDto,
        UserDto,
        FieldError,
    )),
    tags(
        (name = "Auth", description = "Signup and login"),
        (name = "Feed", description = "Post CRUD and pagination"),
        (name = "User", description = "Acting user's record"),
        (name = "Images", description = "Image upload"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;
