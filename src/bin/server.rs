//! Server binary: load config from env, bootstrap the schema, mount routes.

use axum::Router;
use school_api::auth::TokenSigner;
use school_api::{
    common_routes, ensure_tables, exec_routes, student_routes, teacher_routes, AppConfig, AppState,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("school_api=info".parse()?))
        .init();

    let config = AppConfig::from_env()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    ensure_tables(&pool).await?;

    let state = AppState {
        pool,
        tokens: Arc::new(TokenSigner::new(&config.jwt_secret, config.token_ttl)),
        reset_token_ttl: config.reset_token_ttl,
    };

    let app = Router::new()
        .merge(common_routes(state.clone()))
        .merge(teacher_routes(state.clone()))
        .merge(student_routes(state.clone()))
        .merge(exec_routes(state))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
