//! Workspace reads, saves and deletes.

use super::client::{markers, GeoserverClient};
use super::error::SyncError;
use super::paths;
use super::payload::{collection_names, WorkspaceBody, WorkspaceDoc};
use super::transport::{Transport, TransportError};
use crate::models::{PostGisDataStore, Resource, StateMut, Workspace};

impl<T: Transport> GeoserverClient<T> {
    /// Every workspace on the server, each fetched individually.
    pub async fn workspaces(&self) -> Result<Vec<Workspace>, SyncError> {
        let doc = self
            .fetch_collection(&paths::json(&paths::workspaces()))
            .await?;

        let mut workspaces = Vec::new();
        for name in collection_names(&doc, "workspaces", "workspace") {
            workspaces.push(self.workspace(&name).await?);
        }
        Ok(workspaces)
    }

    pub async fn workspace(&self, name: &str) -> Result<Workspace, SyncError> {
        let doc: WorkspaceDoc = self
            .lookup_json(&paths::json(&paths::workspace(name)), markers::WORKSPACE)
            .await?
            .ok_or_else(|| SyncError::WorkspaceNotFound(name.to_string()))?;

        Ok(Workspace::hydrated(doc.workspace.name, doc.workspace.isolated))
    }

    pub async fn workspace_exists(&self, name: &str) -> Result<bool, SyncError> {
        Ok(self
            .exists(&paths::json(&paths::workspace(name)), markers::WORKSPACE)
            .await?)
    }
}

/// Creates or replaces `workspace` on the server and returns the stored
/// copy. A workspace that is already persisted is returned as is.
pub async fn save_workspace<T: Transport>(
    client: &GeoserverClient<T>,
    workspace: &Workspace,
) -> Result<Workspace, SyncError> {
    if workspace.is_persisted() {
        return Ok(workspace.clone());
    }

    let body = serde_json::to_value(WorkspaceDoc {
        workspace: WorkspaceBody {
            name: workspace.name().to_string(),
            isolated: workspace.isolated(),
        },
    })?;

    if client.workspace_exists(workspace.previous_name()).await? {
        client
            .replace(&paths::workspace(workspace.previous_name()), body)
            .await?;
    } else {
        client.create(&paths::workspaces(), body).await?;
    }

    client.workspace(workspace.name()).await
}

/// Removes the workspace and everything in it. Returns false, after
/// logging, when the server could not be reached or refused.
pub async fn delete_workspace<T: Transport>(
    client: &GeoserverClient<T>,
    workspace: &mut Workspace,
) -> bool {
    let path = paths::workspace(workspace.previous_name());
    match remove_if_exists(client, &path, markers::WORKSPACE).await {
        Ok(()) => {
            workspace.state_mut().detach();
            true
        }
        Err(e) => {
            tracing::warn!("Failed to delete workspace {}: {}", workspace.previous_name(), e);
            false
        }
    }
}

/// Recursive delete of `path` when the probe finds it. Shared by every
/// delete operation.
pub(crate) async fn remove_if_exists<T: Transport>(
    client: &GeoserverClient<T>,
    path: &str,
    marker: &str,
) -> Result<(), TransportError> {
    if client.exists(&paths::json(path), marker).await? {
        client.remove(path).await?;
    } else {
        tracing::debug!("{} already absent", path);
    }
    Ok(())
}

impl Workspace {
    pub async fn save<T: Transport>(&self, client: &GeoserverClient<T>) -> Result<Workspace, SyncError> {
        save_workspace(client, self).await
    }

    pub async fn delete<T: Transport>(&mut self, client: &GeoserverClient<T>) -> bool {
        delete_workspace(client, self).await
    }

    /// PostGIS data stores registered in this workspace.
    pub async fn datastores<T: Transport>(
        &self,
        client: &GeoserverClient<T>,
    ) -> Result<Vec<PostGisDataStore>, SyncError> {
        client.datastores(self).await
    }
}
