//! Data models for users and posts

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// User account as stored. The password digest never leaves this type; all
/// outward payloads go through [`UserDto`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A post row. `creator_id` is assigned at creation and immutable.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post joined with its materialized creator.
#[derive(Debug, Clone)]
pub struct PostWithCreator {
    pub post: Post,
    pub creator: User,
}

/// Fields for creating a user; `status` comes from the store default.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator_id: i64,
}

// ============================================================================
// Outward payloads (shaped by the resolver layer)
// ============================================================================

/// Creator reference embedded in a post payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatorDto {
    pub id: i64,
    #[schema(example = "Ada")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator: CreatorDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostDto {
    pub fn from_record(record: PostWithCreator) -> Self {
        let PostWithCreator { post, creator } = record;
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            creator: CreatorDto {
                id: creator.id,
                name: creator.name,
            },
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Public user payload. Deliberately has no password field.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub name: String,
    #[schema(example = "I am new!")]
    pub status: String,
    pub posts: Vec<PostDto>,
}

impl UserDto {
    /// Shape a user payload; `posts` are the user's own, so each one's
    /// creator is the user itself.
    pub fn new(user: &User, posts: Vec<Post>) -> Self {
        let creator = CreatorDto {
            id: user.id,
            name: user.name.clone(),
        };
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            status: user.status.clone(),
            posts: posts
                .into_iter()
                .map(|post| PostDto {
                    id: post.id,
                    title: post.title,
                    content: post.content,
                    image_url: post.image_url,
                    creator: creator.clone(),
                    created_at: post.created_at,
                    updated_at: post.updated_at,
                })
                .collect(),
        }
    }
}

/// Login result: the bearer token and the authenticated user's id
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,
    pub user_id: i64,
}

/// One page of the feed plus the total post count
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub posts: Vec<PostDto>,
    #[schema(example = 5)]
    pub total_posts: i64,
}
