use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockroom::config::{CatalogConfig, Config};
use stockroom::{Catalog, FilesystemStore, Paginator, Product};

/// HTTP server for a read-only, paginated product catalog
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog file (JSON array of products)
    #[arg(long, value_name = "PATH")]
    catalog_path: Option<PathBuf>,

    /// Bind address
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Port number
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hyper=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load(
        args.config.as_ref(),
        args.bind.as_deref(),
        args.port,
        args.catalog_path.as_ref(),
    )?;

    info!("Configuration loaded: bind={}:{}", config.bind, config.port);

    // Create store
    let store: Arc<dyn Paginator<Product>> = match &config.catalog {
        CatalogConfig::Filesystem { path } => {
            info!("Using filesystem catalog at: {}", path.display());
            Arc::new(FilesystemStore::new(path.clone()))
        }
    };

    // Start server
    stockroom::api::run(config, Catalog::new(store)).await
}
