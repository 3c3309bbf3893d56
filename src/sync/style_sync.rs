//! Style reads, saves and deletes, global or scoped to a workspace.

use std::sync::Arc;

use super::client::{markers, GeoserverClient};
use super::error::SyncError;
use super::paths;
use super::payload::{collection_names, StyleBody, StyleDoc};
use super::transport::{Transport, TransportError};
use super::workspace_sync::{remove_if_exists, save_workspace};
use crate::models::{is_reserved_style, Resource, StateMut, Style, Workspace};

pub const SLD_CONTENT_TYPE: &str = "application/vnd.ogc.sld+xml";

impl<T: Transport> GeoserverClient<T> {
    /// Styles of `workspace`, or the global styles when `None`. Server
    /// built-ins are left out.
    pub async fn styles(&self, workspace: Option<&str>) -> Result<Vec<Style>, SyncError> {
        let workspace = self.style_workspace(workspace).await?;
        let scope = workspace.as_ref().map(|ws| ws.name().to_string());
        let doc = self
            .fetch_collection(&paths::json(&paths::styles(scope.as_deref())))
            .await?;

        let mut styles = Vec::new();
        for name in collection_names(&doc, "styles", "style") {
            if is_reserved_style(&name) {
                continue;
            }
            styles.push(self.hydrate_style(workspace.clone(), &name).await?);
        }
        Ok(styles)
    }

    /// A style with its SLD content. Built-ins come back without content.
    pub async fn style(&self, name: &str, workspace: Option<&str>) -> Result<Style, SyncError> {
        let workspace = self.style_workspace(workspace).await?;
        self.hydrate_style(workspace, name).await
    }

    pub async fn style_exists(&self, name: &str, workspace: Option<&str>) -> Result<bool, SyncError> {
        Ok(self
            .exists(&paths::json(&paths::style(workspace, name)), markers::STYLE)
            .await?)
    }

    async fn style_workspace(
        &self,
        workspace: Option<&str>,
    ) -> Result<Option<Arc<Workspace>>, SyncError> {
        match workspace {
            Some(name) => Ok(Some(Arc::new(self.workspace(name).await?))),
            None => Ok(None),
        }
    }

    async fn hydrate_style(
        &self,
        workspace: Option<Arc<Workspace>>,
        name: &str,
    ) -> Result<Style, SyncError> {
        let scope = workspace.as_ref().map(|ws| ws.name().to_string());
        let scope = scope.as_deref();

        let doc: StyleDoc = self
            .lookup_json(&paths::json(&paths::style(scope, name)), markers::STYLE)
            .await?
            .ok_or_else(|| SyncError::StyleNotFound(name.to_string()))?;
        let body = doc.style;

        let content = if is_reserved_style(&body.name) {
            String::new()
        } else {
            let filename = body
                .filename
                .as_deref()
                .ok_or_else(|| SyncError::StyleContentNotFound(body.name.clone()))?;
            match self.fetch(&paths::style_content(scope, filename)).await {
                Ok(content) => content,
                Err(TransportError::Status { status, .. }) => {
                    tracing::debug!("style content {} -> {}", filename, status);
                    return Err(SyncError::StyleContentNotFound(body.name));
                }
                Err(e) => return Err(e.into()),
            }
        };

        Ok(Style::hydrated(body.name, workspace, body.filename, content))
    }
}

/// Creates or replaces `style` and uploads its SLD content, then returns
/// the stored copy.
///
/// Built-in styles cannot be written; saving one, or a style renamed from
/// one, fails before any request is sent.
pub async fn save_style<T: Transport>(
    client: &GeoserverClient<T>,
    style: &mut Style,
) -> Result<Style, SyncError> {
    if style.is_persisted() {
        return Ok(style.clone());
    }
    if style.is_reserved() {
        return Err(SyncError::ReservedStyle(style.name().to_string()));
    }

    let moved = style.is_moved();
    let origin = style.previous_scope().map(String::from);

    if let Some(workspace) = style.workspace() {
        if !workspace.is_persisted() {
            let saved = save_workspace(client, workspace).await?;
            style.replace_workspace(Arc::new(saved));
        }
    }

    let scope = style.workspace().map(|ws| ws.name().to_string());
    let scope = scope.as_deref();

    let body = serde_json::to_value(StyleDoc {
        style: StyleBody {
            name: style.name().to_string(),
            filename: Some(format!("{}.sld", style.name())),
            format: None,
        },
    })?;

    // A style changing scope is written fresh in its new scope; the copy
    // under the old scope goes once the new one holds the content.
    let probe_name = if moved { style.name() } else { style.previous_name() };
    if client.style_exists(probe_name, scope).await? {
        client
            .replace(&paths::style(scope, probe_name), body)
            .await?;
    } else {
        client.create(&paths::styles(scope), body).await?;
    }

    client
        .upload(&paths::style(scope, style.name()), SLD_CONTENT_TYPE, style.content())
        .await?;

    if moved {
        let old = paths::style(origin.as_deref(), style.previous_name());
        remove_if_exists(client, &old, markers::STYLE).await?;
    }

    client.style(style.name(), scope).await
}

/// Removes the style. Built-ins are never deleted. Failures are logged and
/// reported as false.
pub async fn delete_style<T: Transport>(client: &GeoserverClient<T>, style: &mut Style) -> bool {
    if style.is_reserved() {
        tracing::warn!("Refusing to delete built-in style {}", style.previous_name());
        return false;
    }

    let path = paths::style(style.previous_scope(), style.previous_name());
    match remove_if_exists(client, &path, markers::STYLE).await {
        Ok(()) => {
            style.state_mut().detach();
            true
        }
        Err(e) => {
            tracing::warn!("Failed to delete style {}: {}", style.previous_name(), e);
            false
        }
    }
}

impl Style {
    pub async fn save<T: Transport>(&mut self, client: &GeoserverClient<T>) -> Result<Style, SyncError> {
        save_style(client, self).await
    }

    pub async fn delete<T: Transport>(&mut self, client: &GeoserverClient<T>) -> bool {
        delete_style(client, self).await
    }
}
