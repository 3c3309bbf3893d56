//! Spatial catalog of the database behind a PostGIS data store.
//!
//! Layer saves ask it whether the backing table exists, which column holds
//! its geometry and which SRID that column is registered with.

mod postgis;

pub use postgis::PgSpatialCatalog;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Storage kind of a spatial column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Geometry,
    Geography,
}

impl GeometryKind {
    /// Parses the column's `udt_name`.
    pub fn from_udt_name(name: &str) -> Option<Self> {
        match name {
            "geometry" => Some(GeometryKind::Geometry),
            "geography" => Some(GeometryKind::Geography),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryColumn {
    pub name: String,
    pub kind: GeometryKind,
}

/// Table metadata lookups needed to publish a layer.
#[allow(async_fn_in_trait)]
pub trait SpatialCatalog {
    async fn table_exists(&self, schema: &str, table: &str) -> Result<bool, sqlx::Error>;

    /// First geometry or geography column of the table, if any.
    async fn geometry_column(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Option<GeometryColumn>, sqlx::Error>;

    /// SRID registered for `column`, 0 when none is recorded.
    async fn srid(
        &self,
        schema: &str,
        table: &str,
        column: &GeometryColumn,
    ) -> Result<i32, sqlx::Error>;
}

/// Opens a small connection pool to the spatial database.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url)
        .await
}
