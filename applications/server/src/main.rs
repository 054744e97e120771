/// Music Catalog Server - HTTP/JSON music catalog
use catalog_server::{config::ServerConfig, create_router, state::AppState};
use catalog_storage::LocalStorageContext;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catalog-server")]
#[command(about = "Music catalog HTTP server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Apply database migrations and exit
    Migrate {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print catalog statistics
    Stats {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of top artists and genres to show
        #[arg(short, long, default_value_t = 5)]
        top: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(load_config(config.as_deref())?).await?;
        }
        Commands::Migrate { config } => {
            migrate(&load_config(config.as_deref())?).await?;
        }
        Commands::Stats { config, top } => {
            print_stats(&load_config(config.as_deref())?, top).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

async fn connect(config: &ServerConfig) -> anyhow::Result<LocalStorageContext> {
    let storage = LocalStorageContext::connect(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    tracing::info!("Database connected");
    Ok(storage)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Music Catalog Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let storage = Arc::new(connect(&config).await?);

    // Build application state
    let app_state = AppState::from_store(storage, config.api);

    // Build router
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn migrate(config: &ServerConfig) -> anyhow::Result<()> {
    let storage = connect(config).await?;
    storage.pool().close().await;
    println!("Migrations applied to {}", config.storage.database_url);
    Ok(())
}

async fn print_stats(config: &ServerConfig, top: u32) -> anyhow::Result<()> {
    let storage = Arc::new(connect(config).await?);
    let app_state = AppState::from_store(storage, config.api);

    let stats = app_state.music_service.get_stats(top).await?;

    println!("Musics:      {}", stats.total_musics);
    println!("Total plays: {}", stats.total_play_count);

    println!("Top artists:");
    for tally in &stats.top_artists {
        println!("  {:>5}  {}", tally.count, tally.value);
    }

    println!("Top genres:");
    for tally in &stats.top_genres {
        println!("  {:>5}  {}", tally.count, tally.value);
    }

    Ok(())
}
