use sqlx::PgPool;

use super::{GeometryColumn, GeometryKind, SpatialCatalog};

/// [`SpatialCatalog`] backed by PostgreSQL's `information_schema` and the
/// PostGIS `geometry_columns` / `geography_columns` views.
#[derive(Debug, Clone)]
pub struct PgSpatialCatalog {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ColumnRow {
    column_name: String,
    udt_name: String,
}

impl PgSpatialCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SpatialCatalog for PgSpatialCatalog {
    async fn table_exists(&self, schema: &str, table: &str) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM information_schema.columns WHERE table_name = $1 AND table_schema = $2",
        )
        .bind(table)
        .bind(schema)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    async fn geometry_column(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Option<GeometryColumn>, sqlx::Error> {
        let row: Option<ColumnRow> = sqlx::query_as(
            "SELECT column_name::text AS column_name, udt_name::text AS udt_name \
             FROM information_schema.columns \
             WHERE table_name = $1 AND table_schema = $2 \
             AND (udt_name = 'geometry' OR udt_name = 'geography') \
             ORDER BY ordinal_position LIMIT 1",
        )
        .bind(table)
        .bind(schema)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(|r| {
            GeometryKind::from_udt_name(&r.udt_name).map(|kind| GeometryColumn {
                name: r.column_name,
                kind,
            })
        }))
    }

    async fn srid(
        &self,
        schema: &str,
        table: &str,
        column: &GeometryColumn,
    ) -> Result<i32, sqlx::Error> {
        let sql = match column.kind {
            GeometryKind::Geometry => {
                "SELECT srid FROM geometry_columns \
                 WHERE f_table_name = $1 AND f_table_schema = $2 AND f_geometry_column = $3"
            }
            GeometryKind::Geography => {
                "SELECT srid FROM geography_columns \
                 WHERE f_table_name = $1 AND f_table_schema = $2 AND f_geography_column = $3"
            }
        };

        let srid: Option<(i32,)> = sqlx::query_as(sql)
            .bind(table)
            .bind(schema)
            .bind(&column.name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(srid.map(|(s,)| s).unwrap_or(0))
    }
}
