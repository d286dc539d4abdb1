use std::sync::Arc;

use crate::auth::token::TokenService;
use crate::content::resolvers::Resolvers;
use crate::db::Database;
use crate::images::ImageStore;

/// Shared application state. No cross-request mutable state lives here;
/// everything mutable is behind the stores.
pub struct AppState {
    pub resolvers: Resolvers,
    pub tokens: TokenService,
    pub images: Arc<dyn ImageStore>,
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(
        resolvers: Resolvers,
        tokens: TokenService,
        images: Arc<dyn ImageStore>,
        db: Arc<Database>,
    ) -> Self {
        Self {
            resolvers,
            tokens,
            images,
            db,
        }
    }
}
