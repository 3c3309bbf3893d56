//! PostGIS data store reads, saves and deletes.

use std::sync::Arc;

use super::client::{markers, GeoserverClient};
use super::error::SyncError;
use super::paths;
use super::payload::{collection_names, DataStoreBody, DataStoreDoc, EntryList};
use super::transport::Transport;
use super::workspace_sync::{remove_if_exists, save_workspace};
use crate::models::{
    ConnectionParameters, Layer, PostGisDataStore, Resource, StateMut, Workspace, POSTGIS_TYPE,
};

impl<T: Transport> GeoserverClient<T> {
    /// PostGIS stores of `workspace`. Stores of any other type are skipped.
    pub async fn datastores(&self, workspace: &Workspace) -> Result<Vec<PostGisDataStore>, SyncError> {
        let workspace = Arc::new(self.workspace(workspace.previous_name()).await?);
        let doc = self
            .fetch_collection(&paths::json(&paths::datastores(workspace.name())))
            .await?;

        let mut stores = Vec::new();
        for name in collection_names(&doc, "dataStores", "dataStore") {
            match self.hydrate_datastore(Arc::clone(&workspace), &name).await {
                Ok(store) => stores.push(store),
                Err(SyncError::UnsupportedStoreType { store_type, .. }) => {
                    tracing::debug!("Skipping {} store {}:{}", store_type, workspace.name(), name);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(stores)
    }

    /// A single PostGIS store, with its workspace read from the server.
    pub async fn datastore(&self, workspace: &str, name: &str) -> Result<PostGisDataStore, SyncError> {
        let workspace = Arc::new(self.workspace(workspace).await?);
        self.hydrate_datastore(workspace, name).await
    }

    pub async fn datastore_exists(&self, workspace: &str, name: &str) -> Result<bool, SyncError> {
        Ok(self
            .exists(&paths::json(&paths::datastore(workspace, name)), markers::DATASTORE)
            .await?)
    }

    async fn hydrate_datastore(
        &self,
        workspace: Arc<Workspace>,
        name: &str,
    ) -> Result<PostGisDataStore, SyncError> {
        let doc: DataStoreDoc = self
            .lookup_json(
                &paths::json(&paths::datastore(workspace.name(), name)),
                markers::DATASTORE,
            )
            .await?
            .ok_or_else(|| SyncError::DataStoreNotFound {
                workspace: workspace.name().to_string(),
                name: name.to_string(),
            })?;

        let body = doc.data_store;
        let store_type = body.store_type.unwrap_or_default();
        if !store_type.eq_ignore_ascii_case(POSTGIS_TYPE) {
            return Err(SyncError::UnsupportedStoreType {
                workspace: workspace.name().to_string(),
                name: body.name,
                store_type,
            });
        }

        let connection = ConnectionParameters::decode(&body.connection_parameters.entry)?;

        Ok(PostGisDataStore::hydrated(
            body.name,
            workspace,
            body.description.unwrap_or_default(),
            body.enabled,
            connection,
        ))
    }
}

/// Creates or replaces `datastore` on the server and returns the stored
/// copy.
///
/// An unsaved workspace is saved first and the store is pointed at the
/// stored workspace, even if the store write then fails.
pub async fn save_datastore<T: Transport>(
    client: &GeoserverClient<T>,
    datastore: &mut PostGisDataStore,
) -> Result<PostGisDataStore, SyncError> {
    if datastore.is_persisted() {
        return Ok(datastore.clone());
    }

    if !datastore.workspace().is_persisted() {
        let workspace = save_workspace(client, datastore.workspace()).await?;
        datastore.replace_workspace(Arc::new(workspace));
    }

    let workspace = datastore.workspace().name().to_string();
    let body = serde_json::to_value(DataStoreDoc {
        data_store: DataStoreBody {
            name: datastore.name().to_string(),
            description: Some(datastore.description().to_string()),
            store_type: Some(POSTGIS_TYPE.to_string()),
            enabled: datastore.enabled(),
            workspace: None,
            connection_parameters: EntryList {
                entry: datastore.connection().encode(),
            },
        },
    })?;

    if client
        .datastore_exists(&workspace, datastore.previous_name())
        .await?
    {
        client
            .replace(&paths::datastore(&workspace, datastore.previous_name()), body)
            .await?;
    } else {
        client.create(&paths::datastores(&workspace), body).await?;
    }

    client.datastore(&workspace, datastore.name()).await
}

/// Removes the store and its feature types. Failures are logged and
/// reported as false.
pub async fn delete_datastore<T: Transport>(
    client: &GeoserverClient<T>,
    datastore: &mut PostGisDataStore,
) -> bool {
    let path = paths::datastore(
        datastore.workspace().previous_name(),
        datastore.previous_name(),
    );
    match remove_if_exists(client, &path, markers::DATASTORE).await {
        Ok(()) => {
            datastore.state_mut().detach();
            true
        }
        Err(e) => {
            tracing::warn!(
                "Failed to delete data store {}:{}: {}",
                datastore.workspace().previous_name(),
                datastore.previous_name(),
                e
            );
            false
        }
    }
}

impl PostGisDataStore {
    pub async fn save<T: Transport>(
        &mut self,
        client: &GeoserverClient<T>,
    ) -> Result<PostGisDataStore, SyncError> {
        save_datastore(client, self).await
    }

    pub async fn delete<T: Transport>(&mut self, client: &GeoserverClient<T>) -> bool {
        delete_datastore(client, self).await
    }

    /// Feature types published from this store.
    pub async fn layers<T: Transport>(&self, client: &GeoserverClient<T>) -> Result<Vec<Layer>, SyncError> {
        client.feature_types(self).await
    }
}
