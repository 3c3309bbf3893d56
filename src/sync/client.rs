//! The context object every catalog operation runs against.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::SyncError;
use super::http::HttpTransport;
use super::paths;
use super::payload::AboutDoc;
use super::transport::{Request, Response, Transport, TransportError};

/// Body markers GeoServer uses to report a missing catalog item.
pub(crate) mod markers {
    pub const WORKSPACE: &str = "No such workspace";
    pub const DATASTORE: &str = "No such datastore";
    pub const FEATURE_TYPE: &str = "No such feature type";
    pub const STYLE: &str = "No such style";
}

/// GeoServer catalog client.
///
/// Holds the transport (endpoint and credentials) and is passed to every
/// read, save and delete operation. It keeps no other state.
#[derive(Debug)]
pub struct GeoserverClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> GeoserverClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Builds a client and checks the server answers the version resource.
    pub async fn connect(transport: T) -> Result<Self, SyncError> {
        let client = Self::new(transport);
        client.fetch(&paths::json(&paths::about_version())).await?;
        tracing::debug!("Connected to catalog");
        Ok(client)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Version of a server component (`geoserver`, `geotools`, ...),
    /// compared case-insensitively. `"Unknown"` when not listed.
    pub async fn version(&self, product: &str) -> Result<String, SyncError> {
        let doc: AboutDoc = self.fetch_json(&paths::json(&paths::about_version())).await?;
        let wanted = product.to_lowercase();

        Ok(doc
            .about
            .resource
            .iter()
            .find(|r| r.name.to_lowercase() == wanted)
            .and_then(|r| r.version_text())
            .unwrap_or_else(|| "Unknown".to_string()))
    }

    /// Sends a request and returns the response whatever its status.
    pub(crate) async fn probe(&self, path: &str) -> Result<Response, TransportError> {
        self.transport.send(Request::get(path)).await
    }

    /// True unless the item at `path` answers with the `marker` text.
    ///
    /// The check is a substring match on the body, not the status code:
    /// GeoServer has been seen answering 200 with the marker for missing
    /// items, so the status cannot be trusted either way.
    pub(crate) async fn exists(&self, path: &str, marker: &str) -> Result<bool, TransportError> {
        let response = self.probe(path).await?;
        let found = !response.body.contains(marker);
        tracing::debug!("probe {} -> {}", path, if found { "found" } else { "absent" });
        Ok(found)
    }

    /// GET that fails on any non-2xx status.
    pub(crate) async fn fetch(&self, path: &str) -> Result<String, TransportError> {
        Ok(self.probe(path).await?.error_for_status()?.body)
    }

    pub(crate) async fn fetch_json<D: DeserializeOwned>(&self, path: &str) -> Result<D, SyncError> {
        let body = self.fetch(path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET of a catalog item. `Ok(None)` when the server reports the item
    /// missing, either through the marker or a 404.
    pub(crate) async fn lookup(&self, path: &str, marker: &str) -> Result<Option<String>, SyncError> {
        let response = self.probe(path).await?;
        if response.body.contains(marker) || response.status == 404 {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.body))
    }

    pub(crate) async fn lookup_json<D: DeserializeOwned>(
        &self,
        path: &str,
        marker: &str,
    ) -> Result<Option<D>, SyncError> {
        match self.lookup(path, marker).await? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    /// Collection document; an empty body counts as an empty collection.
    pub(crate) async fn fetch_collection(&self, path: &str) -> Result<Value, SyncError> {
        let body = self.fetch(path).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn create(&self, path: &str, body: Value) -> Result<(), TransportError> {
        tracing::info!("POST {}", path);
        self.transport
            .send(Request::post(path, body))
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub(crate) async fn replace(&self, path: &str, body: Value) -> Result<(), TransportError> {
        tracing::info!("PUT {}", path);
        self.transport
            .send(Request::put(path, body))
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub(crate) async fn upload(
        &self,
        path: &str,
        content_type: &str,
        content: &str,
    ) -> Result<(), TransportError> {
        tracing::info!("PUT {} ({})", path, content_type);
        self.transport
            .send(Request::put_raw(path, content_type, content))
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Recursive delete of the item at `path`.
    pub(crate) async fn remove(&self, path: &str) -> Result<(), TransportError> {
        tracing::info!("DELETE {}", path);
        self.transport
            .send(Request::delete(paths::recurse(path)))
            .await?
            .error_for_status()?;
        Ok(())
    }
}
