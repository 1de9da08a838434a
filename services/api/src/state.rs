//! Application state shared across handlers

use sqlx::PgPool;

use crate::{catalog::CatalogClient, jwt::JwtService, repositories::UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
    pub jwt_service: JwtService,
    pub catalog: CatalogClient,
}
