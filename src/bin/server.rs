use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use social_recipe::config::ServerConfig;
use social_recipe::db;
use social_recipe::services::image_uploader::{CloudinaryUploader, ImageUploader};
use social_recipe::web;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,
}

fn init_logging(log_dir: &str) {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily(log_dir, "server.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn,sqlx::query=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let server_config = match ServerConfig::load(args.config.as_deref()) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            // Logging is not up yet; the log directory comes from this config.
            eprintln!("Failed to load server configuration: {e}");
            return Err(e.into());
        }
    };

    init_logging(&server_config.log_dir);
    info!("Starting server, version: {}", env!("CARGO_PKG_VERSION"));

    let db_pool = db::connect(&server_config.database_url).await.map_err(|e| {
        error!(error = %e, "Failed to connect to the database.");
        e
    })?;
    db::ensure_schema(&db_pool).await?;

    let uploader: Arc<dyn ImageUploader> =
        Arc::new(CloudinaryUploader::new(server_config.uploader_config()));

    let addr: SocketAddr = server_config.listen_addr.parse()?;
    let app = web::create_axum_router(db_pool, uploader, server_config.clone());

    info!(%addr, "HTTP server listening.");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
