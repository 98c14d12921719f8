use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use locallibrary::config::{get_config, CliArgs};
use locallibrary::{create_app, db, logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads them
    dotenv::dotenv().ok();

    let args = CliArgs::parse();
    let _log_guard = logging::init_tracing(args.debug, args.log_dir.as_deref())?;

    let config = get_config(&args);

    let pool = db::init_pool(&config.database_url)
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    {
        let mut conn = pool.get()?;
        db::run_migrations(&mut conn)?;
    }

    let app = create_app(Arc::new(pool))?;

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
