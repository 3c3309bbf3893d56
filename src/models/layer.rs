use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::datastore::PostGisDataStore;
use super::resource::{sealed, Resource, ResourceState};
use super::style::Style;

/// A published feature type backed by one table of a PostGIS store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    #[serde(flatten)]
    state: ResourceState,
    title: String,
    table_name: String,
    datastore: Arc<PostGisDataStore>,
    default_style: Option<Arc<Style>>,
}

impl Layer {
    pub fn new(
        name: impl Into<String>,
        table_name: impl Into<String>,
        datastore: Arc<PostGisDataStore>,
    ) -> Self {
        Self {
            state: ResourceState::local(name),
            title: String::new(),
            table_name: table_name.into(),
            datastore,
            default_style: None,
        }
    }

    pub(crate) fn hydrated(
        name: impl Into<String>,
        title: String,
        table_name: String,
        datastore: Arc<PostGisDataStore>,
        default_style: Option<Arc<Style>>,
    ) -> Self {
        Self {
            state: ResourceState::hydrated(name),
            title,
            table_name,
            datastore,
            default_style,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.set_title(title);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.state.assign(&mut self.title, title.into());
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn set_table_name(&mut self, table_name: impl Into<String>) {
        self.state.assign(&mut self.table_name, table_name.into());
    }

    pub fn datastore(&self) -> &PostGisDataStore {
        &self.datastore
    }

    /// Style the server applies by default. Only set on layers read back
    /// from the server.
    pub fn default_style(&self) -> Option<&Style> {
        self.default_style.as_deref()
    }

    pub(crate) fn replace_datastore(&mut self, datastore: Arc<PostGisDataStore>) {
        self.datastore = datastore;
    }
}

impl sealed::StateMut for Layer {
    fn state_mut(&mut self) -> &mut ResourceState {
        &mut self.state
    }
}

impl Resource for Layer {
    fn state(&self) -> &ResourceState {
        &self.state
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name())?;
        writeln!(f, "{}", "=".repeat(self.name().len()))?;
        if !self.title.is_empty() {
            writeln!(f, "Title: {}", self.title)?;
        }
        writeln!(
            f,
            "Store: {}:{}",
            self.datastore.workspace().name(),
            self.datastore.name()
        )?;
        writeln!(f, "Table: {}", self.table_name)?;
        if let Some(style) = &self.default_style {
            writeln!(f, "Default style: {}", style.name())?;
        }
        Ok(())
    }
}
