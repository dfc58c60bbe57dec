mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use pixtag_core::Config;
use pixtag_db::pool::init_pool;
use pixtag_server::storage::S3ObjectStorage;
use pixtag_server::{build_router, AppContext};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise derive defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "pixtag=trace,pixtag_server=trace,pixtag_db=debug,tower_http=debug".to_string()
        } else {
            "pixtag=debug,pixtag_server=debug,pixtag_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt().with_env_filter(&env_filter).init();

    match cli.command {
        Commands::Serve { listen, db } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(serve(listen, db))
        }
        Commands::Version => {
            println!("pixtag {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn serve(listen: Option<String>, db: Option<String>) -> Result<()> {
    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(listen) = listen {
        config.server.listen = listen;
    }
    if let Some(db) = db {
        config.database.path = db;
    }

    tracing::info!("Initializing database at {}", config.database.path);
    let pool = init_pool(&config.database.path)?;

    let storage = Arc::new(S3ObjectStorage::new(&config.storage)?);
    tracing::info!(bucket = %config.storage.bucket, "Object storage client ready");

    let listen = config.server.listen.clone();
    let ctx = AppContext::new(pool, storage, Arc::new(config));
    let app = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("failed to bind {listen}"))?;
    tracing::info!("Listening on {listen}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
