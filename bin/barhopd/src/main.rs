//! `barhopd` — the barhop server binary.
//!
//! Usage:
//!   barhopd --data-dir <dir> [--venues <file>] [--listen <addr>]
//!
//! The venue catalog defaults to `{data_dir}/venues.json`; a missing
//! catalog file starts the server with no venues.

mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use barhop_core::{Module, ServiceConfig};
use barhop_kv::{KvStore, OverlayKv, RedbStore};
use barhop_live::LiveStore;
use social::service::SocialService;
use social::sync::SyncCoordinator;
use social::{SocialModule, catalog};

/// Barhop server.
#[derive(Parser, Debug)]
#[command(name = "barhopd", about = "Barhop check-in and feed server")]
struct Cli {
    /// Directory for all persistent state.
    #[arg(long = "data-dir", required = true)]
    data_dir: std::path::PathBuf,

    /// Path to the venue catalog JSON file (overrides default
    /// {data_dir}/venues.json).
    #[arg(long = "venues")]
    venues: Option<std::path::PathBuf>,

    /// Listen address (overrides default 0.0.0.0:8080).
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    std::fs::create_dir_all(&cli.data_dir)?;
    let config = ServiceConfig {
        data_dir: Some(cli.data_dir.clone()),
        venues_path: cli.venues.clone(),
        listen: cli.listen.clone(),
        ..Default::default()
    };

    // Initialize storage: redb with the venue catalog overlaid as a
    // read-only seed layer.
    let db_path = config.resolve_db_path();
    info!("Opening store at {}", db_path.display());
    let db = RedbStore::open(&db_path)
        .map_err(|e| anyhow::anyhow!("failed to open store: {}", e))?;
    let overlay = OverlayKv::new(db);

    let venues_path = config.resolve_venues_path();
    if venues_path.is_file() {
        let venues = catalog::load_file(&venues_path)
            .map_err(|e| anyhow::anyhow!("failed to load venue catalog: {}", e))?;
        let n = catalog::install(&venues, &overlay)
            .map_err(|e| anyhow::anyhow!("failed to install venue catalog: {}", e))?;
        info!("Installed {} venues from {}", n, venues_path.display());
    } else {
        warn!(
            "No venue catalog at {}; starting with an empty catalog",
            venues_path.display()
        );
    }

    let kv: Arc<dyn KvStore> = Arc::new(overlay);
    let store = Arc::new(LiveStore::new(kv));
    let service = Arc::new(SocialService::new(store));
    let sync = Arc::new(
        SyncCoordinator::new(service.clone())
            .map_err(|e| anyhow::anyhow!("failed to start sync coordinator: {}", e))?,
    );

    let social_module = SocialModule::new(service, sync);
    info!("Social module initialized");

    let module_routes = vec![(social_module.name().to_string(), social_module.routes())];
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("Barhop server listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
