//! Synchronization of local resources with the GeoServer catalog.
//!
//! Every save follows the same protocol: probe the item at its previous
//! name, POST to the parent collection when it is absent or PUT at the
//! previous name when present, then read the item back under its new
//! name. Deletes probe first and only issue a recursive DELETE when the
//! item exists.
//!
//! # Usage
//!
//! ```no_run
//! use geosync::models::Workspace;
//! use geosync::sync::{save_workspace, GeoserverClient, HttpTransport};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new("http://localhost:8080/geoserver", "admin", "geoserver")?;
//! let client = GeoserverClient::connect(transport).await?;
//!
//! let saved = save_workspace(&client, &Workspace::new("topo")).await?;
//! assert!(geosync::models::Resource::is_persisted(&saved));
//! # Ok(())
//! # }
//! ```

mod client;
mod datastore_sync;
mod error;
mod http;
mod layer_sync;
pub mod paths;
mod payload;
mod style_sync;
mod transport;
mod workspace_sync;

pub use client::GeoserverClient;
pub use datastore_sync::{delete_datastore, save_datastore};
pub use error::SyncError;
pub use http::{HttpTransport, DEFAULT_TIMEOUT};
pub use layer_sync::{delete_layer, save_layer};
pub use payload::{LayerInfo, StyleRef};
pub use style_sync::{delete_style, save_style, SLD_CONTENT_TYPE};
pub use transport::{Body, Method, Request, Response, Transport, TransportError};
pub use workspace_sync::{delete_workspace, save_workspace};
