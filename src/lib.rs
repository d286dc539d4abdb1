//! inkfeed - Content Management Backend
//!
//! A small blog-style backend: user signup/login with bearer tokens and
//! CRUD over posts with fixed-size pagination.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration per environment
//! - [`logging`] - tracing setup (rolling file + stdout)
//! - [`db`] - PostgreSQL connection pool
//! - [`error`] - API error taxonomy and HTTP mapping
//! - [`auth`] - token service and request auth gate
//! - [`validation`] - input validation rules
//! - [`content`] - user/post models, stores, resolvers
//! - [`images`] - uploaded image storage
//! - [`gateway`] - HTTP server, routes, handlers

pub mod auth;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod gateway;
pub mod images;
pub mod logging;
pub mod validation;

// Convenient re-exports at crate root
pub use auth::gate::AuthContext;
pub use auth::token::{Claims, TokenService};
pub use content::models::{Post, PostWithCreator, User};
pub use content::repository::{PostStore, UserStore};
pub use content::resolvers::Resolvers;
pub use error::{ApiError, FieldError, StoreError};
pub use images::ImageStore;
