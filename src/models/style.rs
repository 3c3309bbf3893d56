use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::resource::{sealed, Resource, ResourceState};
use super::workspace::Workspace;

/// Built-in styles shipped with the server. Their content is never
/// fetched nor written.
pub const RESERVED_STYLES: [&str; 5] = ["generic", "line", "point", "polygon", "raster"];

pub fn is_reserved_style(name: &str) -> bool {
    RESERVED_STYLES.contains(&name)
}

/// A named SLD style, global or scoped to a workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    #[serde(flatten)]
    state: ResourceState,
    workspace: Option<Arc<Workspace>>,
    content: String,
    filename: Option<String>,
    /// Workspace the server holds the style under, when read from it.
    #[serde(skip)]
    stored_scope: Option<Option<String>>,
}

impl Style {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: ResourceState::local(name),
            workspace: None,
            content: String::new(),
            filename: None,
            stored_scope: None,
        }
    }

    pub(crate) fn hydrated(
        name: impl Into<String>,
        workspace: Option<Arc<Workspace>>,
        filename: Option<String>,
        content: String,
    ) -> Self {
        Self {
            state: ResourceState::hydrated(name),
            stored_scope: Some(workspace.as_ref().map(|ws| ws.name().to_string())),
            workspace,
            content,
            filename,
        }
    }

    pub fn with_workspace(mut self, workspace: Arc<Workspace>) -> Self {
        self.set_workspace(Some(workspace));
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.set_content(content);
        self
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_deref()
    }

    pub fn set_workspace(&mut self, workspace: Option<Arc<Workspace>>) {
        self.state.assign(&mut self.workspace, workspace);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.state.assign(&mut self.content, content.into());
    }

    /// File name of the style definition as reported by the server.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// True when either the current or the previous name is a built-in.
    pub fn is_reserved(&self) -> bool {
        is_reserved_style(self.name()) || is_reserved_style(self.previous_name())
    }

    /// Workspace the server knows the style under. A style never read from
    /// the server has no other scope than its current one.
    pub fn previous_scope(&self) -> Option<&str> {
        match &self.stored_scope {
            Some(scope) => scope.as_deref(),
            None => self.workspace().map(|ws| ws.previous_name()),
        }
    }

    /// True when the style was read under one scope and now points at
    /// another (global to workspace, workspace to global, or between two
    /// workspaces).
    pub fn is_moved(&self) -> bool {
        self.stored_scope.is_some()
            && self.previous_scope() != self.workspace().map(|ws| ws.previous_name())
    }

    pub(crate) fn replace_workspace(&mut self, workspace: Arc<Workspace>) {
        self.workspace = Some(workspace);
    }
}

impl sealed::StateMut for Style {
    fn state_mut(&mut self) -> &mut ResourceState {
        &mut self.state
    }
}

impl Resource for Style {
    fn state(&self) -> &ResourceState {
        &self.state
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name())?;
        writeln!(f, "{}", "=".repeat(self.name().len()))?;
        match &self.workspace {
            Some(ws) => writeln!(f, "Workspace: {}", ws.name())?,
            None => writeln!(f, "Workspace: (global)")?,
        }
        if let Some(filename) = &self.filename {
            writeln!(f, "File: {}", filename)?;
        }
        if !self.content.is_empty() {
            writeln!(f, "\n{}", self.content)?;
        }
        Ok(())
    }
}
