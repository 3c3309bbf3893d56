//! Client-side synchronization of a GeoServer catalog.
//!
//! Workspaces, PostGIS data stores, layers and styles are edited as local
//! values that track whether they still match the server, then written back
//! with idempotent create-or-update calls.

pub mod config;
pub mod db;
pub mod models;
pub mod sync;
