//! Main binary for the ContentCraft service
//!
//! Serves the blog generation API:
//! - Outline, post and rewrite generation
//! - SEO meta data, analysis, topic ideas and summaries
//! - Social repurposing and image generation
//! - Blog, settings and profile storage

use content_craft::{config::ContentCraftConfig, routes::create_router, AppState};

use anyhow::Context;
use clap::{Arg, Command};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let matches = create_cli().get_matches();

    // Load configuration
    let config = load_config(&matches)?;

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        anyhow::bail!("invalid configuration: {}", e);
    }

    info!("Starting ContentCraft service");
    info!(
        "Configuration: Server {}:{}, text model {}, image model {}",
        config.server.host, config.server.port, config.gemini.text_model, config.gemini.image_model
    );

    if !config.gemini.has_credentials() {
        warn!("GEMINI_API_KEY is not set; generation endpoints will fail until it is configured");
    }

    let state = AppState::from_config(&config).context("failed to initialize service state")?;
    let app = create_router(state);

    let addr: SocketAddr = config
        .server
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind_address()))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    info!("ContentCraft service started on {}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("server error")?;

    info!("ContentCraft service stopped gracefully");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "content_craft=info,tower_http=info,axum=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// Create CLI argument parser
fn create_cli() -> Command {
    Command::new("content-craft-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("ContentCraft AI - blog content generation service")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .env(content_craft::config::CONFIG_FILE_ENV)
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Server host address"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .value_parser(clap::value_parser!(u16))
                .help("Server port"),
        )
}

/// Load configuration from file and environment, then apply CLI overrides
fn load_config(matches: &clap::ArgMatches) -> anyhow::Result<ContentCraftConfig> {
    let config_file = matches.get_one::<String>("config");
    if let Some(path) = config_file {
        info!("Loading configuration from file: {}", path);
    }

    let mut config = ContentCraftConfig::load(config_file.map(String::as_str))
        .context("failed to load configuration")?;

    if let Some(host) = matches.get_one::<String>("host") {
        config.server.host = host.clone();
    }

    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }

    Ok(config)
}

/// Wait for shutdown signals
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
