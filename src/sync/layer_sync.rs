//! Feature type (layer) reads, saves and deletes.

use std::sync::Arc;

use super::client::{markers, GeoserverClient};
use super::datastore_sync::save_datastore;
use super::error::SyncError;
use super::paths;
use super::payload::{
    collection_names, BoundingBox, FeatureTypeBody, FeatureTypeDoc, FeatureTypeWrite, LayerDoc,
    LayerInfo,
};
use super::transport::Transport;
use super::workspace_sync::remove_if_exists;
use crate::db::SpatialCatalog;
use crate::models::{Layer, PostGisDataStore, Resource, StateMut};

/// Substituted when the catalog has no SRID for the geometry column.
const FALLBACK_SRID: i32 = 4326;

impl<T: Transport> GeoserverClient<T> {
    /// Feature types published from `datastore`.
    pub async fn feature_types(&self, datastore: &PostGisDataStore) -> Result<Vec<Layer>, SyncError> {
        let datastore = Arc::new(
            self.datastore(datastore.workspace().previous_name(), datastore.previous_name())
                .await?,
        );
        let doc = self
            .fetch_collection(&paths::json(&paths::feature_types(
                datastore.workspace().name(),
                datastore.name(),
            )))
            .await?;

        let mut layers = Vec::new();
        for name in collection_names(&doc, "featureTypes", "featureType") {
            layers.push(self.hydrate_feature_type(Arc::clone(&datastore), &name).await?);
        }
        Ok(layers)
    }

    pub async fn feature_type(
        &self,
        workspace: &str,
        datastore: &str,
        name: &str,
    ) -> Result<Layer, SyncError> {
        let datastore = Arc::new(self.datastore(workspace, datastore).await?);
        self.hydrate_feature_type(datastore, name).await
    }

    pub async fn feature_type_exists(
        &self,
        workspace: &str,
        datastore: &str,
        name: &str,
    ) -> Result<bool, SyncError> {
        Ok(self
            .exists(
                &paths::json(&paths::feature_type(workspace, datastore, name)),
                markers::FEATURE_TYPE,
            )
            .await?)
    }

    /// Published layer record of `<workspace>:<name>`.
    pub async fn layer_info(&self, workspace: &str, name: &str) -> Result<LayerInfo, SyncError> {
        let doc: LayerDoc = self.fetch_json(&paths::json(&paths::layer(workspace, name))).await?;
        Ok(doc.layer)
    }

    async fn hydrate_feature_type(
        &self,
        datastore: Arc<PostGisDataStore>,
        name: &str,
    ) -> Result<Layer, SyncError> {
        let workspace = datastore.workspace().name().to_string();
        let doc: FeatureTypeDoc = self
            .lookup_json(
                &paths::json(&paths::feature_type(&workspace, datastore.name(), name)),
                markers::FEATURE_TYPE,
            )
            .await?
            .ok_or_else(|| SyncError::FeatureTypeNotFound {
                workspace: workspace.clone(),
                datastore: datastore.name().to_string(),
                name: name.to_string(),
            })?;

        let info = doc.feature_type;
        let default_style = match self.layer_info(&workspace, &info.name).await?.default_style {
            Some(style) => {
                let (style_name, style_workspace) = style.resolve();
                Some(Arc::new(
                    self.style(&style_name, style_workspace.as_deref()).await?,
                ))
            }
            None => None,
        };

        let table_name = info.native_name.unwrap_or_else(|| info.name.clone());
        Ok(Layer::hydrated(
            info.name,
            info.title.unwrap_or_default(),
            table_name,
            datastore,
            default_style,
        ))
    }
}

/// Publishes `layer` from its backing table, or updates the published
/// feature type, and returns the stored copy.
///
/// The table is checked against `catalog` before anything is written: a
/// missing table or one without a geometry or geography column fails with
/// no request sent, not even for an unsaved parent store.
pub async fn save_layer<T: Transport, C: SpatialCatalog>(
    client: &GeoserverClient<T>,
    catalog: &C,
    layer: &mut Layer,
) -> Result<Layer, SyncError> {
    if layer.is_persisted() {
        return Ok(layer.clone());
    }

    let schema = layer.datastore().connection().schema.clone();
    let table = layer.table_name().to_string();

    if !catalog.table_exists(&schema, &table).await? {
        return Err(SyncError::TableNotFound { schema, table });
    }
    let column = match catalog.geometry_column(&schema, &table).await? {
        Some(column) => column,
        None => return Err(SyncError::GeomColumnNotFound { schema, table }),
    };
    let srid = match catalog.srid(&schema, &table, &column).await? {
        0 => FALLBACK_SRID,
        srid => srid,
    };

    if !layer.datastore().is_persisted() {
        let mut datastore = layer.datastore().clone();
        let saved = save_datastore(client, &mut datastore).await?;
        layer.replace_datastore(Arc::new(saved));
    }

    let workspace = layer.datastore().workspace().name().to_string();
    let datastore = layer.datastore().name().to_string();
    let crs = format!("EPSG:{}", srid);
    let title = if layer.title().is_empty() {
        layer.name().to_string()
    } else {
        layer.title().to_string()
    };

    let exists = client
        .feature_type_exists(&workspace, &datastore, layer.previous_name())
        .await?;

    let body = FeatureTypeWrite {
        feature_type: FeatureTypeBody {
            name: layer.name().to_string(),
            native_name: table,
            title,
            native_crs: crs.clone(),
            srs: crs.clone(),
            native_bounding_box: (!exists).then(|| BoundingBox::world(crs)),
        },
    };
    let body = serde_json::to_value(body)?;

    if exists {
        client
            .replace(
                &paths::feature_type(&workspace, &datastore, layer.previous_name()),
                body,
            )
            .await?;
    } else {
        client
            .create(&paths::feature_types(&workspace, &datastore), body)
            .await?;
    }

    client.feature_type(&workspace, &datastore, layer.name()).await
}

/// Removes the feature type and its published layer. Failures are logged
/// and reported as false.
pub async fn delete_layer<T: Transport>(client: &GeoserverClient<T>, layer: &mut Layer) -> bool {
    let datastore = layer.datastore();
    let path = paths::feature_type(
        datastore.workspace().previous_name(),
        datastore.previous_name(),
        layer.previous_name(),
    );
    match remove_if_exists(client, &path, markers::FEATURE_TYPE).await {
        Ok(()) => {
            layer.state_mut().detach();
            true
        }
        Err(e) => {
            tracing::warn!("Failed to delete layer {}: {}", layer.previous_name(), e);
            false
        }
    }
}

impl Layer {
    pub async fn save<T: Transport, C: SpatialCatalog>(
        &mut self,
        client: &GeoserverClient<T>,
        catalog: &C,
    ) -> Result<Layer, SyncError> {
        save_layer(client, catalog, self).await
    }

    pub async fn delete<T: Transport>(&mut self, client: &GeoserverClient<T>) -> bool {
        delete_layer(client, self).await
    }
}
