use clap::{Args, Subcommand};
use std::sync::Arc;

use super::OutputFormat;
use geosync::config::Config;
use geosync::db::{self, PgSpatialCatalog};
use geosync::models::{Layer, Resource};
use geosync::sync::{delete_layer, save_layer, GeoserverClient};

#[derive(Args)]
pub struct LayerCommand {
    #[command(subcommand)]
    pub command: LayerSubcommand,
}

#[derive(Subcommand)]
pub enum LayerSubcommand {
    /// List the layers published from a store
    List {
        /// Workspace name
        workspace: String,

        /// Store name
        store: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a layer's details
    Show {
        /// Workspace name
        workspace: String,

        /// Store name
        store: String,

        /// Layer name
        name: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Publish a table as a layer (updates it if it already exists)
    Publish {
        /// Workspace name
        workspace: String,

        /// Store name
        store: String,

        /// Layer name
        name: String,

        /// Backing table in the store's schema
        #[arg(long)]
        table: String,

        /// Human readable title (defaults to the layer name)
        #[arg(long)]
        title: Option<String>,
    },

    /// Delete a layer
    Delete {
        /// Workspace name
        workspace: String,

        /// Store name
        store: String,

        /// Layer name
        name: String,
    },
}

impl LayerCommand {
    pub async fn run(
        &self,
        client: &GeoserverClient,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            LayerSubcommand::List {
                workspace,
                store,
                format,
            } => {
                let store = client.datastore(workspace, store).await?;
                let layers = store.layers(client).await?;

                if layers.is_empty() {
                    println!("No layers found in {}:{}", workspace, store.name());
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&layers)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<30}  {:<30}  TITLE", "NAME", "TABLE");
                        println!("{}", "-".repeat(80));
                        for layer in &layers {
                            println!(
                                "{:<30}  {:<30}  {}",
                                layer.name(),
                                layer.table_name(),
                                layer.title()
                            );
                        }
                        println!("\nTotal: {} layer(s)", layers.len());
                    }
                }
                Ok(())
            }

            LayerSubcommand::Show {
                workspace,
                store,
                name,
                format,
            } => {
                let layer = client.feature_type(workspace, store, name).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&layer)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", layer);
                    }
                }
                Ok(())
            }

            LayerSubcommand::Publish {
                workspace,
                store,
                name,
                table,
                title,
            } => {
                let database_url = config.database_url.value.as_deref().ok_or(
                    "Publishing needs database_url (set it in the config file or GEOSYNC_DATABASE_URL)",
                )?;
                let catalog = PgSpatialCatalog::new(db::connect(database_url).await?);

                let store = Arc::new(client.datastore(workspace, store).await?);
                let mut layer = Layer::new(name.trim(), table.as_str(), store);
                if let Some(title) = title {
                    layer.set_title(title.as_str());
                }

                let saved = save_layer(client, &catalog, &mut layer).await?;
                println!("Published layer:");
                println!("{}", saved);
                Ok(())
            }

            LayerSubcommand::Delete {
                workspace,
                store,
                name,
            } => {
                let mut layer = client.feature_type(workspace, store, name).await?;
                if !delete_layer(client, &mut layer).await {
                    return Err(format!("Failed to delete layer: {}:{}", workspace, name).into());
                }
                println!("Deleted layer: {}:{}", workspace, name);
                Ok(())
            }
        }
    }
}
