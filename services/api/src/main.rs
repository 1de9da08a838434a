use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::{
    catalog::{CatalogClient, CatalogConfig},
    jwt::{JwtConfig, JwtService},
    repositories::UserRepository,
    routes,
    state::AppState,
};
use common::database::{DatabaseConfig, health_check, init_pool};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting book catalog gateway");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize JWT service
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(jwt_config);

    // Initialize the outbound catalog client
    let catalog = CatalogClient::new(CatalogConfig::from_env());

    let user_repository = UserRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        user_repository,
        jwt_service,
        catalog,
    };

    info!("Book catalog gateway initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Book catalog gateway listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
