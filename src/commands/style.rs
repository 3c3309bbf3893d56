use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use super::OutputFormat;
use geosync::models::{Resource, Style};
use geosync::sync::{delete_style, save_style, GeoserverClient};

#[derive(Args)]
pub struct StyleCommand {
    #[command(subcommand)]
    pub command: StyleSubcommand,
}

#[derive(Subcommand)]
pub enum StyleSubcommand {
    /// List styles, global or of one workspace
    List {
        /// Workspace name (global styles when omitted)
        #[arg(long, short)]
        workspace: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a style with its SLD
    Show {
        /// Style name
        name: String,

        /// Workspace name (global style when omitted)
        #[arg(long, short)]
        workspace: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a style from an SLD file (updates it if it already exists)
    Create {
        /// Style name
        name: String,

        /// SLD file to upload
        #[arg(long)]
        file: PathBuf,

        /// Workspace name (global style when omitted)
        #[arg(long, short)]
        workspace: Option<String>,
    },

    /// Delete a style
    Delete {
        /// Style name
        name: String,

        /// Workspace name (global style when omitted)
        #[arg(long, short)]
        workspace: Option<String>,
    },
}

impl StyleCommand {
    pub async fn run(&self, client: &GeoserverClient) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            StyleSubcommand::List { workspace, format } => {
                let styles = client.styles(workspace.as_deref()).await?;

                if styles.is_empty() {
                    println!("No styles found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&styles)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<30}  FILE", "NAME");
                        println!("{}", "-".repeat(50));
                        for style in &styles {
                            println!("{:<30}  {}", style.name(), style.filename().unwrap_or("-"));
                        }
                        println!("\nTotal: {} style(s)", styles.len());
                    }
                }
                Ok(())
            }

            StyleSubcommand::Show {
                name,
                workspace,
                format,
            } => {
                let style = client.style(name, workspace.as_deref()).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&style)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", style);
                    }
                }
                Ok(())
            }

            StyleSubcommand::Create {
                name,
                file,
                workspace,
            } => {
                if name.trim().is_empty() {
                    return Err("Style name cannot be empty".into());
                }

                let content = std::fs::read_to_string(file)
                    .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;

                let mut style = Style::new(name.trim()).with_content(content);
                if let Some(workspace) = workspace {
                    style = style.with_workspace(Arc::new(client.workspace(workspace).await?));
                }

                let saved = save_style(client, &mut style).await?;
                println!("Saved style: {}", saved.name());
                Ok(())
            }

            StyleSubcommand::Delete { name, workspace } => {
                let mut style = client.style(name, workspace.as_deref()).await?;
                if !delete_style(client, &mut style).await {
                    return Err(format!("Failed to delete style: {}", name).into());
                }
                println!("Deleted style: {}", name);
                Ok(())
            }
        }
    }
}
