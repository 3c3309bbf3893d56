mod config_cmd;
mod datastore;
mod layer;
mod style;
mod version;
mod workspace;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use datastore::DatastoreCommand;
pub use layer::LayerCommand;
pub use style::StyleCommand;
pub use version::VersionCommand;
pub use workspace::WorkspaceCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
