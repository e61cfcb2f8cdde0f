//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::ports::{
    CommentRepository, PasswordService, PostRepository, SystemClock, TokenService, UserRepository,
};
use inkwell_core::{AccountService, BlogService};
use inkwell_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService>,
    pub accounts: Arc<AccountService>,
    pub tokens: Arc<dyn TokenService>,
    /// Name of the active storage backend, reported by the health check.
    pub storage: &'static str,
}

struct Repositories {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl AppState {
    /// Build the application state, preferring PostgreSQL when configured.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let state = match connect_postgres(config).await {
            Some(repos) => Self::assemble(repos, tokens, passwords, "postgres"),
            None => Self::in_memory(InMemoryStore::new(), tokens, passwords),
        };

        tracing::info!(storage = state.storage, "Application state initialized");
        state
    }

    /// State backed by an in-memory store.
    pub fn in_memory(
        store: InMemoryStore,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        let repos = Repositories {
            users: Arc::new(store.users()),
            posts: Arc::new(store.posts()),
            comments: Arc::new(store.comments()),
        };
        Self::assemble(repos, tokens, passwords, "memory")
    }

    fn assemble(
        repos: Repositories,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        storage: &'static str,
    ) -> Self {
        let blog = BlogService::new(
            repos.posts,
            repos.comments,
            repos.users.clone(),
            Arc::new(SystemClock),
        );
        let accounts = AccountService::new(repos.users, passwords);

        Self {
            blog: Arc::new(blog),
            accounts: Arc::new(accounts),
            tokens,
            storage,
        }
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(config: &AppConfig) -> Option<Repositories> {
    use inkwell_infra::DatabaseConnections;
    use inkwell_infra::database::{
        PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
    };

    let Some(db_config) = config.database.as_ref() else {
        tracing::warn!("DATABASE_URL not set. Running on the in-memory store.");
        return None;
    };

    match DatabaseConnections::init(db_config).await {
        Ok(connections) => {
            let db = connections.main;
            Some(Repositories {
                users: Arc::new(PostgresUserRepository::new(db.clone())),
                posts: Arc::new(PostgresPostRepository::new(db.clone())),
                comments: Arc::new(PostgresCommentRepository::new(db)),
            })
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            None
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(config: &AppConfig) -> Option<Repositories> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
    }
    None
}
