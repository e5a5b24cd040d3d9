use crate::{auth::tokens::TokenKeys, config::Config};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        let tokens = TokenKeys::new(
            config.jwt_secret.as_bytes(),
            config.access_token_ttl,
            config.refresh_token_ttl,
        );

        Self {
            db,
            tokens: Arc::new(tokens),
        }
    }
}
