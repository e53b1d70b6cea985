use std::sync::Arc;

use filmapi::{AppState, accounts::Accounts, catalog::Catalog, config::Config, db, routes};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmapi=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url, config.db_max_connections).await?;

    let accounts = Accounts::new(db.clone());
    if let Some(bootstrap) = &config.bootstrap_user {
        accounts.ensure_user(&bootstrap.username, &bootstrap.password).await?;
    }

    let state = Arc::new(AppState { catalog: Catalog::new(db), accounts });

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
