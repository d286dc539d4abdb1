//! Store traits and PostgreSQL implementations
//!
//! Pagination is a single explicit call (`page(skip, limit)` returning the
//! slice plus total count) and creator materialization is an explicit join;
//! the resolver layer never sees a query builder.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::models::{NewPost, NewUser, Post, PostWithCreator, User};
use crate::error::StoreError;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
    /// Overwrite the status field; `None` when the user no longer exists.
    async fn update_status(&self, id: i64, status: &str) -> Result<Option<User>, StoreError>;
    /// Materialize the user's post list, newest first.
    async fn posts_of(&self, id: i64) -> Result<Vec<Post>, StoreError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch one post with its creator joined.
    async fn find_by_id(&self, id: i64) -> Result<Option<PostWithCreator>, StoreError>;
    /// One page ordered by creation time descending, plus the total count.
    async fn page(&self, skip: i64, limit: i64)
    -> Result<(Vec<PostWithCreator>, i64), StoreError>;
    async fn create(&self, post: NewPost) -> Result<PostWithCreator, StoreError>;
    /// Update title and content; `image_url = None` keeps the stored value.
    async fn update(
        &self,
        id: i64,
        title: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<Option<PostWithCreator>, StoreError>;
    /// Remove a post; returns whether a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

// ============================================================================
// PostgreSQL implementations
// ============================================================================

const USER_COLUMNS: &str = "user_id, email, password_hash, name, status, created_at";

fn user_from_row(r: &PgRow) -> User {
    User {
        id: r.get("user_id"),
        email: r.get("email"),
        password_hash: r.get("password_hash"),
        name: r.get("name"),
        status: r.get("status"),
        created_at: r.get("created_at"),
    }
}

fn post_from_row(r: &PgRow) -> Post {
    Post {
        id: r.get("post_id"),
        title: r.get("title"),
        content: r.get("content"),
        image_url: r.get("image_url"),
        creator_id: r.get("creator_id"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

fn joined_from_row(r: &PgRow) -> PostWithCreator {
    PostWithCreator {
        post: Post {
            id: r.get("post_id"),
            title: r.get("title"),
            content: r.get("content"),
            image_url: r.get("image_url"),
            creator_id: r.get("creator_id"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        },
        creator: User {
            id: r.get("creator_id"),
            email: r.get("creator_email"),
            password_hash: r.get("creator_password_hash"),
            name: r.get("creator_name"),
            status: r.get("creator_status"),
            created_at: r.get("creator_created_at"),
        },
    }
}

const JOINED_COLUMNS: &str = "p.post_id, p.title, p.content, p.image_url, p.creator_id, \
     p.created_at, p.updated_at, \
     u.email AS creator_email, u.password_hash AS creator_password_hash, \
     u.name AS creator_name, u.status AS creator_status, u.created_at AS creator_created_at";

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (email, password_hash, name) VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user_from_row(&row))
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE users SET status = $2 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn posts_of(&self, id: i64) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query(
            "SELECT post_id, title, content, image_url, creator_id, created_at, updated_at \
             FROM posts WHERE creator_id = $1 ORDER BY created_at DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(post_from_row).collect())
    }
}

pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<PostWithCreator>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {JOINED_COLUMNS} FROM posts p \
             JOIN users u ON u.user_id = p.creator_id WHERE p.post_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(joined_from_row))
    }

    async fn page(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<PostWithCreator>, i64), StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(&format!(
            "SELECT {JOINED_COLUMNS} FROM posts p \
             JOIN users u ON u.user_id = p.creator_id \
             ORDER BY p.created_at DESC OFFSET $1 LIMIT $2"
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.iter().map(joined_from_row).collect(), total))
    }

    async fn create(&self, post: NewPost) -> Result<PostWithCreator, StoreError> {
        let row = sqlx::query(
            "INSERT INTO posts (title, content, image_url, creator_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING post_id, title, content, image_url, creator_id, created_at, updated_at",
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.creator_id)
        .fetch_one(&self.pool)
        .await?;

        let inserted = post_from_row(&row);
        let creator_row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(inserted.creator_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(PostWithCreator {
            post: inserted,
            creator: user_from_row(&creator_row),
        })
    }

    async fn update(
        &self,
        id: i64,
        title: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<Option<PostWithCreator>, StoreError> {
        let row = sqlx::query(
            "UPDATE posts SET title = $2, content = $3, \
             image_url = COALESCE($4, image_url), updated_at = NOW() \
             WHERE post_id = $1 \
             RETURNING post_id, title, content, image_url, creator_id, created_at, updated_at",
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };
        let updated = post_from_row(&row);

        let creator_row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(updated.creator_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(PostWithCreator {
            post: updated,
            creator: user_from_row(&creator_row),
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
