//! Pokedex Explorer - generation-ordered species catalog service

use anyhow::Result;
use clap::{Parser, Subcommand};
use pokedex_explorer::{config::AppConfig, ServerBuilder};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pokedex-explorer")]
#[command(version)]
#[command(about = "Generation-ordered species catalog backed by PokeAPI")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "POKEDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "POKEDEX_LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Build one generation and print a page of it as JSON
    Generation {
        /// Generation number (1-9)
        generation: u8,

        /// Page size
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Page start
        #[arg(short, long, default_value = "0")]
        offset: usize,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("pokedex_explorer={},tower_http=debug", log_level).into()
            }),
        )
        .with(cli.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Serve { host, port } => {
            run_server(config, host, port).await?;
        }
        Commands::Generation {
            generation,
            limit,
            offset,
        } => {
            print_generation(config, generation, limit, offset).await?;
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

async fn run_server(config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut builder = ServerBuilder::new().config(config);
    if let Some(host) = host {
        builder = builder.host(host);
    }
    if let Some(port) = port {
        builder = builder.port(port);
    }
    let server = builder.build()?;

    tracing::info!(
        upstream = %server.config().upstream.base_url,
        ttl_secs = server.config().cache.ttl_secs,
        "Starting Pokedex Explorer"
    );

    server
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}

async fn print_generation(
    config: AppConfig,
    generation: u8,
    limit: usize,
    offset: usize,
) -> Result<()> {
    let server = ServerBuilder::new().config(config).build()?;
    let page = server
        .engine()
        .generation_page(generation, limit, offset)
        .await?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

fn show_config(config: Option<&AppConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
