//! PostGIS connection parameters and their key/value entry codec.
//!
//! GeoServer describes a data store's settings as an ordered list of
//! `{"@key": ..., "$": ...}` entries. This module maps that list to a typed
//! [`ConnectionParameters`] and back.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Driver identifier sent in the `dbtype` entry.
pub const DBTYPE: &str = "postgis";

/// A single connection-parameter entry as exchanged with the server.
///
/// The server leaves `$` out (or sends `null`) for settings it holds no
/// value for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "@key")]
    pub key: String,
    #[serde(rename = "$", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<EntryValue>,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<EntryValue>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

/// Entry value. The server answers with text; we send natural JSON types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for EntryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryValue::Bool(b) => write!(f, "{}", b),
            EntryValue::Int(i) => write!(f, "{}", i),
            EntryValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for EntryValue {
    fn from(value: bool) -> Self {
        EntryValue::Bool(value)
    }
}

impl From<i64> for EntryValue {
    fn from(value: i64) -> Self {
        EntryValue::Int(value)
    }
}

impl From<&str> for EntryValue {
    fn from(value: &str) -> Self {
        EntryValue::Text(value.to_string())
    }
}

impl From<String> for EntryValue {
    fn from(value: String) -> Self {
        EntryValue::Text(value)
    }
}

/// Errors raised while decoding an entry list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("connection parameter '{key}' is not an integer: '{value}'")]
    InvalidInteger { key: String, value: String },
}

/// Typed settings of a PostGIS data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionParameters {
    pub host: String,
    pub port: i64,
    pub database: String,
    pub schema: String,
    pub user: String,
    #[serde(skip_serializing)]
    pub passwd: String,
    pub evictor_run_periodicity: i64,
    pub max_open_prepared_statements: i64,
    pub encode_functions: bool,
    pub primary_key_metadata_table: String,
    pub batch_insert_size: i64,
    pub prepared_statements: bool,
    pub loose_bbox: bool,
    pub ssl_mode: String,
    pub estimated_extends: bool,
    pub fetch_size: i64,
    pub expose_primary_keys: bool,
    pub validate_connections: bool,
    pub support_on_the_fly_geometry_simplification: bool,
    pub connection_timeout: i64,
    pub callback_factory: String,
    pub min_connections: i64,
    pub max_connections: i64,
    pub evictor_tests_per_run: i64,
    pub test_while_idle: bool,
    pub max_connection_idle_time: i64,
}

impl Default for ConnectionParameters {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 5432,
            database: String::new(),
            schema: String::new(),
            user: String::new(),
            passwd: String::new(),
            evictor_run_periodicity: 300,
            max_open_prepared_statements: 50,
            encode_functions: true,
            primary_key_metadata_table: String::new(),
            batch_insert_size: 1,
            prepared_statements: false,
            loose_bbox: true,
            ssl_mode: "DISABLE".to_string(),
            estimated_extends: true,
            fetch_size: 1000,
            expose_primary_keys: true,
            validate_connections: true,
            support_on_the_fly_geometry_simplification: true,
            connection_timeout: 20,
            callback_factory: String::new(),
            min_connections: 1,
            max_connections: 10,
            evictor_tests_per_run: 3,
            test_while_idle: true,
            max_connection_idle_time: 300,
        }
    }
}

mod keys {
    pub const SCHEMA: &str = "schema";
    pub const EVICTOR_RUN_PERIODICITY: &str = "Evictor run periodicity";
    pub const MAX_OPEN_PREPARED_STATEMENTS: &str = "Max open prepared statements";
    pub const ENCODE_FUNCTIONS: &str = "encode functions";
    pub const PRIMARY_KEY_METADATA_TABLE: &str = "Primary key metadata table";
    pub const BATCH_INSERT_SIZE: &str = "Batch insert size";
    pub const PREPARED_STATEMENTS: &str = "preparedStatements";
    pub const DATABASE: &str = "database";
    pub const HOST: &str = "host";
    pub const LOOSE_BBOX: &str = "Loose bbox";
    pub const SSL_MODE: &str = "SSL mode";
    pub const ESTIMATED_EXTENDS: &str = "Estimated extends";
    pub const FETCH_SIZE: &str = "fetch size";
    pub const EXPOSE_PRIMARY_KEYS: &str = "Expose primary keys";
    pub const VALIDATE_CONNECTIONS: &str = "validate connections";
    pub const GEOMETRY_SIMPLIFICATION: &str = "Support on the fly geometry simplification";
    pub const CONNECTION_TIMEOUT: &str = "Connection timeout";
    pub const CALLBACK_FACTORY: &str = "Callback factory";
    pub const PORT: &str = "port";
    pub const PASSWD: &str = "passwd";
    pub const MIN_CONNECTIONS: &str = "min connections";
    pub const DBTYPE: &str = "dbtype";
    pub const MAX_CONNECTIONS: &str = "max connections";
    pub const EVICTOR_TESTS_PER_RUN: &str = "Evictor tests per run";
    pub const TEST_WHILE_IDLE: &str = "Test while idle";
    pub const USER: &str = "user";
    pub const MAX_CONNECTION_IDLE_TIME: &str = "Max connection idle time";
}

/// Key/value view of an entry list used while decoding.
struct EntryMap(HashMap<String, String>);

impl EntryMap {
    fn text(&self, key: &str, slot: &mut String) {
        if let Some(value) = self.0.get(key) {
            *slot = value.clone();
        }
    }

    fn flag(&self, key: &str, slot: &mut bool) {
        if let Some(value) = self.0.get(key) {
            *slot = value == "true";
        }
    }

    fn int(&self, key: &str, slot: &mut i64) -> Result<(), CodecError> {
        if let Some(value) = self.0.get(key) {
            *slot = value
                .trim()
                .parse()
                .map_err(|_| CodecError::InvalidInteger {
                    key: key.to_string(),
                    value: value.clone(),
                })?;
        }
        Ok(())
    }
}

impl ConnectionParameters {
    /// Connection identity with every tunable setting at its default.
    pub fn new(
        host: impl Into<String>,
        port: i64,
        database: impl Into<String>,
        schema: impl Into<String>,
        user: impl Into<String>,
        passwd: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            schema: schema.into(),
            user: user.into(),
            passwd: passwd.into(),
            ..Default::default()
        }
    }

    /// Builds parameters from the server's entry list.
    ///
    /// Keys the server omitted, or sent without a value, leave the matching
    /// field at its default.
    pub fn decode(entries: &[Entry]) -> Result<Self, CodecError> {
        let map = EntryMap(
            entries
                .iter()
                .filter_map(|e| Some((e.key.clone(), e.value.as_ref()?.to_string())))
                .collect(),
        );
        let mut p = Self::default();

        map.text(keys::SCHEMA, &mut p.schema);
        map.int(keys::EVICTOR_RUN_PERIODICITY, &mut p.evictor_run_periodicity)?;
        map.int(
            keys::MAX_OPEN_PREPARED_STATEMENTS,
            &mut p.max_open_prepared_statements,
        )?;
        map.flag(keys::ENCODE_FUNCTIONS, &mut p.encode_functions);
        map.text(
            keys::PRIMARY_KEY_METADATA_TABLE,
            &mut p.primary_key_metadata_table,
        );
        map.int(keys::BATCH_INSERT_SIZE, &mut p.batch_insert_size)?;
        map.flag(keys::PREPARED_STATEMENTS, &mut p.prepared_statements);
        map.text(keys::DATABASE, &mut p.database);
        map.text(keys::HOST, &mut p.host);
        map.flag(keys::LOOSE_BBOX, &mut p.loose_bbox);
        map.text(keys::SSL_MODE, &mut p.ssl_mode);
        map.flag(keys::ESTIMATED_EXTENDS, &mut p.estimated_extends);
        map.int(keys::FETCH_SIZE, &mut p.fetch_size)?;
        map.flag(keys::EXPOSE_PRIMARY_KEYS, &mut p.expose_primary_keys);
        map.flag(keys::VALIDATE_CONNECTIONS, &mut p.validate_connections);
        map.flag(
            keys::GEOMETRY_SIMPLIFICATION,
            &mut p.support_on_the_fly_geometry_simplification,
        );
        map.int(keys::CONNECTION_TIMEOUT, &mut p.connection_timeout)?;
        map.text(keys::CALLBACK_FACTORY, &mut p.callback_factory);
        map.int(keys::PORT, &mut p.port)?;
        map.text(keys::PASSWD, &mut p.passwd);
        map.int(keys::MIN_CONNECTIONS, &mut p.min_connections)?;
        map.int(keys::MAX_CONNECTIONS, &mut p.max_connections)?;
        map.int(keys::EVICTOR_TESTS_PER_RUN, &mut p.evictor_tests_per_run)?;
        map.flag(keys::TEST_WHILE_IDLE, &mut p.test_while_idle);
        map.text(keys::USER, &mut p.user);
        map.int(
            keys::MAX_CONNECTION_IDLE_TIME,
            &mut p.max_connection_idle_time,
        )?;

        Ok(p)
    }

    /// The complete entry list, every key present, in the server's order.
    pub fn encode(&self) -> Vec<Entry> {
        vec![
            Entry::new(keys::SCHEMA, self.schema.as_str()),
            Entry::new(keys::EVICTOR_RUN_PERIODICITY, self.evictor_run_periodicity),
            Entry::new(
                keys::MAX_OPEN_PREPARED_STATEMENTS,
                self.max_open_prepared_statements,
            ),
            Entry::new(keys::ENCODE_FUNCTIONS, self.encode_functions),
            Entry::new(
                keys::PRIMARY_KEY_METADATA_TABLE,
                self.primary_key_metadata_table.as_str(),
            ),
            Entry::new(keys::BATCH_INSERT_SIZE, self.batch_insert_size),
            Entry::new(keys::PREPARED_STATEMENTS, self.prepared_statements),
            Entry::new(keys::DATABASE, self.database.as_str()),
            Entry::new(keys::HOST, self.host.as_str()),
            Entry::new(keys::LOOSE_BBOX, self.loose_bbox),
            Entry::new(keys::SSL_MODE, self.ssl_mode.as_str()),
            Entry::new(keys::ESTIMATED_EXTENDS, self.estimated_extends),
            Entry::new(keys::FETCH_SIZE, self.fetch_size),
            Entry::new(keys::EXPOSE_PRIMARY_KEYS, self.expose_primary_keys),
            Entry::new(keys::VALIDATE_CONNECTIONS, self.validate_connections),
            Entry::new(
                keys::GEOMETRY_SIMPLIFICATION,
                self.support_on_the_fly_geometry_simplification,
            ),
            Entry::new(keys::CONNECTION_TIMEOUT, self.connection_timeout),
            Entry::new(keys::CALLBACK_FACTORY, self.callback_factory.as_str()),
            Entry::new(keys::PORT, self.port),
            Entry::new(keys::PASSWD, self.passwd.as_str()),
            Entry::new(keys::MIN_CONNECTIONS, self.min_connections),
            Entry::new(keys::DBTYPE, DBTYPE),
            Entry::new(keys::MAX_CONNECTIONS, self.max_connections),
            Entry::new(keys::EVICTOR_TESTS_PER_RUN, self.evictor_tests_per_run),
            Entry::new(keys::TEST_WHILE_IDLE, self.test_while_idle),
            Entry::new(keys::USER, self.user.as_str()),
            Entry::new(
                keys::MAX_CONNECTION_IDLE_TIME,
                self.max_connection_idle_time,
            ),
        ]
    }
}
