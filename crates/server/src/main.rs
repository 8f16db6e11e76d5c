//! Server binary: parse flags, set up logging, bind, serve.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xlstore_server::{create_router, ServerConfig};

/// xlstore - REST API for spreadsheet files on the local filesystem
#[derive(Parser)]
#[command(name = "xlstore-server")]
#[command(author, version, about = "HTTP CRUD facade over xlsx files", long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Directory where spreadsheet files are stored
    #[arg(long, default_value = "storage", value_name = "DIR")]
    storage_root: PathBuf,

    /// Directory of static assets served at the root path
    #[arg(long, default_value = "public", value_name = "DIR")]
    public_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig {
        port: cli.port,
        storage_root: cli.storage_root,
        public_dir: cli.public_dir,
    };

    std::fs::create_dir_all(&config.storage_root).with_context(|| {
        format!(
            "Failed to create storage directory: {}",
            config.storage_root.display()
        )
    })?;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("xlstore-server listening on {addr}");

    let app = create_router(config);
    axum::serve(listener, app).await?;

    Ok(())
}
