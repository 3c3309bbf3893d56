use clap::{Args, Subcommand};
use std::sync::Arc;

use super::OutputFormat;
use geosync::models::{ConnectionParameters, PostGisDataStore, Resource};
use geosync::sync::{delete_datastore, save_datastore, GeoserverClient};

#[derive(Args)]
pub struct DatastoreCommand {
    #[command(subcommand)]
    pub command: DatastoreSubcommand,
}

#[derive(Subcommand)]
pub enum DatastoreSubcommand {
    /// List the PostGIS stores of a workspace
    List {
        /// Workspace name
        workspace: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a store's details
    Show {
        /// Workspace name
        workspace: String,

        /// Store name
        name: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a PostGIS store (updates it if it already exists)
    Create {
        /// Workspace name
        workspace: String,

        /// Store name
        name: String,

        /// Database host
        #[arg(long)]
        host: String,

        /// Database port
        #[arg(long, default_value_t = 5432)]
        port: i64,

        /// Database name
        #[arg(long)]
        database: String,

        /// Database schema
        #[arg(long, default_value = "public")]
        schema: String,

        /// Database user
        #[arg(long)]
        user: String,

        /// Database password
        #[arg(long)]
        password: String,

        /// Store description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a store and its layers
    Delete {
        /// Workspace name
        workspace: String,

        /// Store name
        name: String,
    },
}

impl DatastoreCommand {
    pub async fn run(&self, client: &GeoserverClient) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DatastoreSubcommand::List { workspace, format } => {
                let workspace = client.workspace(workspace).await?;
                let stores = workspace.datastores(client).await?;

                if stores.is_empty() {
                    println!("No PostGIS stores found in {}", workspace.name());
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&stores)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<30}  {:<30}  ENABLED", "NAME", "DATABASE");
                        println!("{}", "-".repeat(72));
                        for store in &stores {
                            let c = store.connection();
                            let database = format!("{}/{}", c.host, c.database);
                            println!("{:<30}  {:<30}  {}", store.name(), database, store.enabled());
                        }
                        println!("\nTotal: {} store(s)", stores.len());
                    }
                }
                Ok(())
            }

            DatastoreSubcommand::Show {
                workspace,
                name,
                format,
            } => {
                let store = client.datastore(workspace, name).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&store)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", store);
                    }
                }
                Ok(())
            }

            DatastoreSubcommand::Create {
                workspace,
                name,
                host,
                port,
                database,
                schema,
                user,
                password,
                description,
            } => {
                if name.trim().is_empty() {
                    return Err("Store name cannot be empty".into());
                }

                let workspace = Arc::new(client.workspace(workspace).await?);
                let connection =
                    ConnectionParameters::new(host, *port, database, schema, user, password);

                let mut store = PostGisDataStore::new(name.trim(), workspace, connection);
                if let Some(description) = description {
                    store.set_description(description.as_str());
                }

                let saved = save_datastore(client, &mut store).await?;
                println!("Saved data store:");
                println!("{}", saved);
                Ok(())
            }

            DatastoreSubcommand::Delete { workspace, name } => {
                let mut store = client.datastore(workspace, name).await?;
                if !delete_datastore(client, &mut store).await {
                    return Err(format!("Failed to delete data store: {}:{}", workspace, name).into());
                }
                println!("Deleted data store: {}:{}", workspace, name);
                Ok(())
            }
        }
    }
}
