//! inkfeed - Content Management Backend
//!
//! Bootstrap: load config, initialize logging, connect to PostgreSQL, wire
//! the stores and resolvers, and serve the gateway.

use std::sync::Arc;

use inkfeed::auth::token::TokenService;
use inkfeed::config::AppConfig;
use inkfeed::content::repository::{PgPostStore, PgUserStore};
use inkfeed::content::resolvers::Resolvers;
use inkfeed::db::Database;
use inkfeed::gateway::{self, state::AppState};
use inkfeed::images::{FsImageStore, ImageStore};
use inkfeed::logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = logging::init_logging(&config);

    tracing::info!(env, "starting inkfeed");

    let db = Arc::new(Database::connect(&config.postgres_url).await?);
    let pool = db.pool().clone();

    let users = Arc::new(PgUserStore::new(pool.clone()));
    let posts = Arc::new(PgPostStore::new(pool));
    let images: Arc<dyn ImageStore> = Arc::new(FsImageStore::new(
        config.images.dir.clone(),
        config.images.public_base.clone(),
    ));
    let tokens = TokenService::new(config.auth.jwt_secret.clone(), config.auth.token_ttl_hours);

    let resolvers = Resolvers::new(users, posts, images.clone(), tokens.clone());
    let state = Arc::new(AppState::new(resolvers, tokens, images, db));

    gateway::run_server(&config.gateway, state).await
}
