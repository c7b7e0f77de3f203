use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

use storify_web::cli::Args;
use storify_web::config::load_storage_config;
use storify_web::error::{Result, ServerSnafu};
use storify_web::gateway::Gateway;
use storify_web::render::Renderer;
use storify_web::routes::{AppState, create_router};
use storify_web::storage::StorageClient;
use storify_web::storage::constants::DEFAULT_REGION;

use snafu::ResultExt;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storify_web=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run_app(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_app(args: Args) -> Result<()> {
    let config = load_storage_config()?;
    let client = StorageClient::new(config).await?;
    log::info!(
        "Using {:?} storage (region: {})",
        client.provider(),
        client.region().unwrap_or("unset")
    );

    let renderer = Renderer::new(client.region().unwrap_or(DEFAULT_REGION))?;
    let state = AppState {
        gateway: Gateway::new(Arc::new(client)),
        renderer: Arc::new(renderer),
    };
    let app = create_router(state, args.surface, args.bucket, args.max_upload_bytes)?;

    let listener = TcpListener::bind(args.listen).await.context(ServerSnafu)?;
    log::info!("Listening on http://{}", args.listen);
    axum::serve(listener, app).await.context(ServerSnafu)?;
    Ok(())
}
