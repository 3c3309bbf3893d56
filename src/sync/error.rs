//! Sync error types.

use super::transport::TransportError;
use crate::models::CodecError;

/// Errors raised by catalog reads and saves.
///
/// Deletes never return these; they report success as a boolean.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),
    #[error("Data store not found: {workspace}:{name}")]
    DataStoreNotFound { workspace: String, name: String },
    #[error("Feature type not found: {workspace}:{datastore}:{name}")]
    FeatureTypeNotFound {
        workspace: String,
        datastore: String,
        name: String,
    },
    #[error("Style not found: {0}")]
    StyleNotFound(String),
    #[error("Style content not found: {0}")]
    StyleContentNotFound(String),
    #[error("Table not found: {schema}.{table}")]
    TableNotFound { schema: String, table: String },
    #[error("Geometry or geography column not found in {schema}.{table}")]
    GeomColumnNotFound { schema: String, table: String },
    #[error("Style '{0}' is a server built-in and cannot be written")]
    ReservedStyle(String),
    #[error("Data store {workspace}:{name} has unsupported type '{store_type}'")]
    UnsupportedStoreType {
        workspace: String,
        name: String,
        store_type: String,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Invalid connection parameters: {0}")]
    Codec(#[from] CodecError),
    #[error("Unexpected server response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Spatial catalog error: {0}")]
    Catalog(#[from] sqlx::Error),
}

impl SyncError {
    /// True for the typed "server confirmed absence" errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SyncError::WorkspaceNotFound(_)
                | SyncError::DataStoreNotFound { .. }
                | SyncError::FeatureTypeNotFound { .. }
                | SyncError::StyleNotFound(_)
                | SyncError::StyleContentNotFound(_)
        )
    }
}
