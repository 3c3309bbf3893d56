use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{
    ConfigCommand, DatastoreCommand, LayerCommand, StyleCommand, VersionCommand, WorkspaceCommand,
};
use geosync::config::Config;
use geosync::sync::{GeoserverClient, HttpTransport};

#[derive(Parser)]
#[command(name = "geosync")]
#[command(version)]
#[command(about = "Synchronize GeoServer workspaces, stores, layers and styles", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the server version
    Version(VersionCommand),

    /// Manage workspaces
    Workspace(WorkspaceCommand),

    /// Manage PostGIS data stores
    Datastore(DatastoreCommand),

    /// Manage published layers
    Layer(LayerCommand),

    /// Manage styles
    Style(StyleCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geosync=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn connect(config: &Config) -> Result<GeoserverClient, Box<dyn std::error::Error>> {
    let transport = HttpTransport::with_timeout(
        &config.server_url.value,
        &config.username.value,
        &config.password.value,
        config.request_timeout(),
    )?;
    Ok(GeoserverClient::connect(transport).await?)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;

    match cli.command {
        Some(Commands::Version(cmd)) => {
            let client = connect(&config).await?;
            cmd.run(&client).await?;
        }
        Some(Commands::Workspace(cmd)) => {
            let client = connect(&config).await?;
            cmd.run(&client).await?;
        }
        Some(Commands::Datastore(cmd)) => {
            let client = connect(&config).await?;
            cmd.run(&client).await?;
        }
        Some(Commands::Layer(cmd)) => {
            let client = connect(&config).await?;
            cmd.run(&client, &config).await?;
        }
        Some(Commands::Style(cmd)) => {
            let client = connect(&config).await?;
            cmd.run(&client).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli.config.as_deref())?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
