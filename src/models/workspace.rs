use serde::Serialize;
use std::fmt;

use super::resource::{sealed, Resource, ResourceState};

/// A GeoServer workspace: the namespace grouping data stores and styles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workspace {
    #[serde(flatten)]
    state: ResourceState,
    isolated: bool,
}

impl Workspace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: ResourceState::local(name),
            isolated: false,
        }
    }

    pub(crate) fn hydrated(name: impl Into<String>, isolated: bool) -> Self {
        Self {
            state: ResourceState::hydrated(name),
            isolated,
        }
    }

    pub fn with_isolated(mut self, isolated: bool) -> Self {
        self.set_isolated(isolated);
        self
    }

    pub fn isolated(&self) -> bool {
        self.isolated
    }

    pub fn set_isolated(&mut self, isolated: bool) {
        self.state.assign(&mut self.isolated, isolated);
    }
}

impl sealed::StateMut for Workspace {
    fn state_mut(&mut self) -> &mut ResourceState {
        &mut self.state
    }
}

impl Resource for Workspace {
    fn state(&self) -> &ResourceState {
        &self.state
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name())?;
        writeln!(f, "{}", "=".repeat(self.name().len()))?;
        writeln!(f, "Isolated: {}", self.isolated)?;
        Ok(())
    }
}
