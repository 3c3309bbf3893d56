use clap::{Args, Subcommand};

use super::OutputFormat;
use geosync::models::{Resource, Workspace};
use geosync::sync::{delete_workspace, save_workspace, GeoserverClient};

#[derive(Args)]
pub struct WorkspaceCommand {
    #[command(subcommand)]
    pub command: WorkspaceSubcommand,
}

#[derive(Subcommand)]
pub enum WorkspaceSubcommand {
    /// List all workspaces
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a workspace's details
    Show {
        /// Workspace name
        name: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a workspace (updates it if it already exists)
    Create {
        /// Workspace name
        name: String,

        /// Keep the workspace's contents out of global services
        #[arg(long)]
        isolated: bool,
    },

    /// Update an existing workspace
    Update {
        /// Current workspace name
        name: String,

        /// New name
        #[arg(long)]
        rename: Option<String>,

        /// Isolation flag
        #[arg(long)]
        isolated: Option<bool>,
    },

    /// Delete a workspace and everything in it
    Delete {
        /// Workspace name
        name: String,
    },
}

impl WorkspaceCommand {
    pub async fn run(&self, client: &GeoserverClient) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            WorkspaceSubcommand::List { format } => {
                let workspaces = client.workspaces().await?;

                if workspaces.is_empty() {
                    println!("No workspaces found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&workspaces)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<30}  ISOLATED", "NAME");
                        println!("{}", "-".repeat(40));
                        for ws in &workspaces {
                            println!("{:<30}  {}", ws.name(), ws.isolated());
                        }
                        println!("\nTotal: {} workspace(s)", workspaces.len());
                    }
                }
                Ok(())
            }

            WorkspaceSubcommand::Show { name, format } => {
                let workspace = client.workspace(name).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&workspace)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", workspace);
                    }
                }
                Ok(())
            }

            WorkspaceSubcommand::Create { name, isolated } => {
                if name.trim().is_empty() {
                    return Err("Workspace name cannot be empty".into());
                }

                let workspace = Workspace::new(name.trim()).with_isolated(*isolated);
                let created = save_workspace(client, &workspace).await?;
                println!("Saved workspace:");
                println!("{}", created);
                Ok(())
            }

            WorkspaceSubcommand::Update {
                name,
                rename,
                isolated,
            } => {
                if rename.is_none() && isolated.is_none() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let mut workspace = client.workspace(name).await?;
                if let Some(new_name) = rename {
                    workspace.set_name(new_name.trim());
                }
                if let Some(isolated) = isolated {
                    workspace.set_isolated(*isolated);
                }

                let updated = save_workspace(client, &workspace).await?;
                println!("Updated workspace:");
                println!("{}", updated);
                Ok(())
            }

            WorkspaceSubcommand::Delete { name } => {
                let mut workspace = Workspace::new(name.as_str());
                if !delete_workspace(client, &mut workspace).await {
                    return Err(format!("Failed to delete workspace: {}", name).into());
                }
                println!("Deleted workspace: {}", name);
                Ok(())
            }
        }
    }
}
