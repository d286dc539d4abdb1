//! Resolver layer
//!
//! Orchestrates every operation: authentication check, then validation, then
//! store calls, then payload shaping. The authentication precondition is
//! enforced before any input validation or store access.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::models::{AuthPayload, FeedPage, NewPost, NewUser, PostDto, UserDto};
use super::repository::{PostStore, UserStore};
use crate::auth::gate::AuthContext;
use crate::auth::token::TokenService;
use crate::error::ApiError;
use crate::images::ImageStore;
use crate::validation::{validate_post_input, validate_user_input};

/// Fixed feed page size
pub const POSTS_PER_PAGE: i64 = 2;

/// Sentinel the client sends for "leave the stored image in place"
pub const UNCHANGED_IMAGE: &str = "undefined";

pub struct Resolvers {
    users: Arc<dyn UserStore>,
    posts: Arc<dyn PostStore>,
    images: Arc<dyn ImageStore>,
    tokens: TokenService,
}

impl Resolvers {
    pub fn new(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        images: Arc<dyn ImageStore>,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            posts,
            images,
            tokens,
        }
    }

    /// Create a user account. Public.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserDto, ApiError> {
        let errors = validate_user_input(email, password);
        if !errors.is_empty() {
            return Err(ApiError::InvalidInput(errors));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(ApiError::AlreadyExists("user already exists"));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create(NewUser {
                email: email.to_string(),
                password_hash,
                name: name.to_string(),
            })
            .await?;

        tracing::info!(user_id = user.id, "user created");
        Ok(UserDto::new(&user, Vec::new()))
    }

    /// Authenticate by email/password and mint a bearer token. Public.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ApiError::NotFound("user not found"))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(ApiError::Unauthorized("wrong password"));
        }

        let token = self
            .tokens
            .sign(&user.email, user.id)
            .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))?;

        Ok(AuthPayload {
            token,
            user_id: user.id,
        })
    }

    /// Create a post attributed to the authenticated user.
    pub async fn create_post(
        &self,
        ctx: &AuthContext,
        title: &str,
        content: &str,
        image_url: &str,
    ) -> Result<PostDto, ApiError> {
        let user_id = ctx.require()?;

        let errors = validate_post_input(title, content);
        if !errors.is_empty() {
            return Err(ApiError::InvalidInput(errors));
        }

        // The account may have vanished between token issue and now.
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::Unauthorized("invalid user"))?;

        let record = self
            .posts
            .create(NewPost {
                title: title.to_string(),
                content: content.to_string(),
                image_url: image_url.to_string(),
                creator_id: user.id,
            })
            .await?;

        tracing::info!(post_id = record.post.id, creator = user.id, "post created");
        Ok(PostDto::from_record(record))
    }

    /// One page of the feed, newest first. Pages below 1 clamp to 1.
    pub async fn get_posts(
        &self,
        ctx: &AuthContext,
        page: Option<i64>,
    ) -> Result<FeedPage, ApiError> {
        ctx.require()?;

        let page = page.unwrap_or(1).max(1);
        // Saturate: a page near i64::MAX must yield an empty page, not overflow
        let skip = page.saturating_sub(1).saturating_mul(POSTS_PER_PAGE);
        let (records, total_posts) = self.posts.page(skip, POSTS_PER_PAGE).await?;

        Ok(FeedPage {
            posts: records.into_iter().map(PostDto::from_record).collect(),
            total_posts,
        })
    }

    /// Fetch a single post with its creator resolved.
    pub async fn post(&self, ctx: &AuthContext, id: i64) -> Result<PostDto, ApiError> {
        ctx.require()?;

        let record = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("post not found"))?;

        Ok(PostDto::from_record(record))
    }

    /// Update a post. Only the creator may; `image_url` equal to the
    /// unchanged sentinel keeps the stored value.
    pub async fn update_post(
        &self,
        ctx: &AuthContext,
        id: i64,
        title: &str,
        content: &str,
        image_url: &str,
    ) -> Result<PostDto, ApiError> {
        let user_id = ctx.require()?;

        let errors = validate_post_input(title, content);
        if !errors.is_empty() {
            return Err(ApiError::InvalidInput(errors));
        }

        let existing = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("post not found"))?;

        if existing.creator.id != user_id {
            return Err(ApiError::NotOwner);
        }

        let new_image = (image_url != UNCHANGED_IMAGE).then_some(image_url);
        let record = self
            .posts
            .update(id, title, content, new_image)
            .await?
            .ok_or(ApiError::NotFound("post not found"))?;

        Ok(PostDto::from_record(record))
    }

    /// Delete a post. Only the creator may; releases the stored image.
    pub async fn delete_post(&self, ctx: &AuthContext, id: i64) -> Result<(), ApiError> {
        let user_id = ctx.require()?;

        let existing = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("post not found"))?;

        if existing.creator.id != user_id {
            return Err(ApiError::NotOwner);
        }

        self.images.release(&existing.post.image_url).await;
        // The row may have vanished between the ownership check and here
        if !self.posts.delete(id).await? {
            return Err(ApiError::NotFound("post not found"));
        }

        tracing::info!(post_id = id, creator = user_id, "post deleted");
        Ok(())
    }

    /// The acting user's own record with their post list materialized.
    pub async fn user(&self, ctx: &AuthContext) -> Result<UserDto, ApiError> {
        let user_id = ctx.require()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::NotFound("user not found"))?;
        let posts = self.users.posts_of(user_id).await?;

        Ok(UserDto::new(&user, posts))
    }

    /// Overwrite the acting user's status field.
    pub async fn update_status(
        &self,
        ctx: &AuthContext,
        status: &str,
    ) -> Result<UserDto, ApiError> {
        let user_id = ctx.require()?;

        let user = self
            .users
            .update_status(user_id, status)
            .await?
            .ok_or(ApiError::NotFound("user not found"))?;
        let posts = self.users.posts_of(user_id).await?;

        Ok(UserDto::new(&user, posts))
    }
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, digest: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|e| ApiError::Internal(format!("stored digest unreadable: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(ApiError::Internal(format!(
            "password verification failed: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let digest = hash_password("hunter2!").unwrap();
        assert!(verify_password("hunter2!", &digest).unwrap());
        assert!(!verify_password("hunter3!", &digest).unwrap());
    }

    #[test]
    fn test_unreadable_digest_is_internal_error() {
        let err = verify_password("whatever", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
