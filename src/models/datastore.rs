use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::connection::ConnectionParameters;
use super::resource::{sealed, Resource, ResourceState};
use super::workspace::Workspace;

/// Product identifier GeoServer uses for PostGIS stores.
pub const POSTGIS_TYPE: &str = "PostGIS";

const DEFAULT_DESCRIPTION: &str = "Created by geosync";

/// A PostGIS data store registered in a workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostGisDataStore {
    #[serde(flatten)]
    state: ResourceState,
    workspace: Arc<Workspace>,
    description: String,
    enabled: bool,
    connection: ConnectionParameters,
}

impl PostGisDataStore {
    pub fn new(
        name: impl Into<String>,
        workspace: Arc<Workspace>,
        connection: ConnectionParameters,
    ) -> Self {
        Self {
            state: ResourceState::local(name),
            workspace,
            description: DEFAULT_DESCRIPTION.to_string(),
            enabled: true,
            connection,
        }
    }

    pub(crate) fn hydrated(
        name: impl Into<String>,
        workspace: Arc<Workspace>,
        description: String,
        enabled: bool,
        connection: ConnectionParameters,
    ) -> Self {
        Self {
            state: ResourceState::hydrated(name),
            workspace,
            description,
            enabled,
            connection,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(description);
        self
    }

    /// Always [`POSTGIS_TYPE`].
    pub fn store_type(&self) -> &'static str {
        POSTGIS_TYPE
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_arc(&self) -> Arc<Workspace> {
        Arc::clone(&self.workspace)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.state.assign(&mut self.description, description.into());
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.assign(&mut self.enabled, enabled);
    }

    pub fn connection(&self) -> &ConnectionParameters {
        &self.connection
    }

    /// Replaces every connection setting at once.
    pub fn set_connection(&mut self, connection: ConnectionParameters) {
        self.state.assign(&mut self.connection, connection);
    }

    /// Edits connection settings in place.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use geosync::models::{ConnectionParameters, PostGisDataStore, Workspace};
    /// # use geosync::models::Resource;
    /// let ws = Arc::new(Workspace::new("topo"));
    /// let mut store = PostGisDataStore::new("roads", ws, ConnectionParameters::default());
    /// store.update_connection(|p| p.max_connections = 20);
    /// assert_eq!(store.connection().max_connections, 20);
    /// assert!(!store.is_persisted());
    /// ```
    pub fn update_connection(&mut self, edit: impl FnOnce(&mut ConnectionParameters)) {
        self.state.edit(&mut self.connection, edit);
    }

    /// Points the store at the canonical copy of its workspace. This does
    /// not touch the store's own persisted flag.
    pub(crate) fn replace_workspace(&mut self, workspace: Arc<Workspace>) {
        self.workspace = workspace;
    }
}

impl sealed::StateMut for PostGisDataStore {
    fn state_mut(&mut self) -> &mut ResourceState {
        &mut self.state
    }
}

impl Resource for PostGisDataStore {
    fn state(&self) -> &ResourceState {
        &self.state
    }
}

impl fmt::Display for PostGisDataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.connection;
        writeln!(f, "{}", self.name())?;
        writeln!(f, "{}", "=".repeat(self.name().len()))?;
        writeln!(f, "Workspace: {}", self.workspace.name())?;
        writeln!(f, "Type: {}", POSTGIS_TYPE)?;
        writeln!(f, "Enabled: {}", self.enabled)?;
        if !self.description.is_empty() {
            writeln!(f, "Description: {}", self.description)?;
        }
        writeln!(
            f,
            "Connection: {}@{}:{}/{} (schema {})",
            c.user, c.host, c.port, c.database, c.schema
        )?;
        writeln!(
            f,
            "Pool: {}..{} connections, timeout {}s",
            c.min_connections, c.max_connections, c.connection_timeout
        )?;
        Ok(())
    }
}
