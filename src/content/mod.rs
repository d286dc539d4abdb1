//! Content domain: users, posts, stores, and the resolver layer

pub mod models;
pub mod repository;
pub mod resolvers;

pub use models::{
    AuthPayload, FeedPage, NewPost, NewUser, Post, PostDto, PostWithCreator, User, UserDto,
};
pub use repository::{PgPostStore, PgUserStore, PostStore, UserStore};
pub use resolvers::{POSTS_PER_PAGE, Resolvers, UNCHANGED_IMAGE};
