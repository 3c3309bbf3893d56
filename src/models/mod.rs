//! Catalog resources and the connection-parameter codec.

mod connection;
mod datastore;
mod layer;
mod resource;
mod style;
mod workspace;

pub use connection::{CodecError, ConnectionParameters, Entry, EntryValue, DBTYPE};
pub use datastore::{PostGisDataStore, POSTGIS_TYPE};
pub use layer::Layer;
pub use resource::{Identity, Resource, ResourceState};
pub(crate) use resource::sealed::StateMut;
pub use style::{is_reserved_style, Style, RESERVED_STYLES};
pub use workspace::Workspace;
