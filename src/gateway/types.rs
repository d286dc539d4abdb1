//! Request DTOs for the HTTP surface

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "hunter2!")]
    pub password: String,
    #[schema(example = "Ada")]
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "hunter2!")]
    pub password: String,
}

/// Body for creating or updating a post. On update, an `imageUrl` of
/// `"undefined"` keeps the stored image.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    #[schema(example = "My first post")]
    pub title: String,
    #[schema(example = "Something worth reading")]
    pub content: String,
    #[serde(default)]
    #[schema(example = "/images/abc-photo.png")]
    pub image_url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    #[schema(example = "Shipping a new post soon")]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub page: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    /// URL of the stored image, or null when the payload was rejected
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
    pub version: &'static str,
    /// Database reachability: "up" or "down"
    #[schema(example = "up")]
    pub database: &'static str,
}
