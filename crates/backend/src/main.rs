use backend::shared::config::{get_database_path, load_config};
use backend::shared::data::db::{initialize_database, sqlite_url};
use backend::shared::state::AppState;
use backend::{routes, system};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config()?;
    system::tracing::initialize(config.server.debug)?;
    tracing::info!("Configuration loaded from {}", source);

    let db_url = match &config.database.url {
        Some(url) => url.clone(),
        None => sqlite_url(&get_database_path(&config)?)?,
    };
    let db = initialize_database(&db_url, config.server.debug)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;
    tracing::info!("Database ready at {}", db_url);

    let app = routes::configure_routes(AppState::new(db.clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot bind {}: {}", addr, e))?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
