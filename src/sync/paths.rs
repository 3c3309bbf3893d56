//! Server-relative REST paths of catalog resources.
//!
//! Item paths have no extension; reads go through [`json`] which appends
//! `.json`, writes address the bare path.

use urlencoding::encode;

pub fn json(path: &str) -> String {
    format!("{}.json", path)
}

/// Delete path that also removes every child resource.
pub fn recurse(path: &str) -> String {
    format!("{}?recurse=true", path)
}

pub fn about_version() -> String {
    "rest/about/version".to_string()
}

pub fn workspaces() -> String {
    "rest/workspaces".to_string()
}

pub fn workspace(name: &str) -> String {
    format!("rest/workspaces/{}", encode(name))
}

pub fn datastores(workspace: &str) -> String {
    format!("{}/datastores", self::workspace(workspace))
}

pub fn datastore(workspace: &str, name: &str) -> String {
    format!("{}/{}", datastores(workspace), encode(name))
}

pub fn feature_types(workspace: &str, datastore: &str) -> String {
    format!("{}/featuretypes", self::datastore(workspace, datastore))
}

pub fn feature_type(workspace: &str, datastore: &str, name: &str) -> String {
    format!("{}/{}", feature_types(workspace, datastore), encode(name))
}

/// Published layer, addressed by its workspace-qualified name.
pub fn layer(workspace: &str, name: &str) -> String {
    format!("rest/layers/{}:{}", encode(workspace), encode(name))
}

pub fn styles(workspace: Option<&str>) -> String {
    match workspace {
        Some(ws) => format!("{}/styles", self::workspace(ws)),
        None => "rest/styles".to_string(),
    }
}

pub fn style(workspace: Option<&str>, name: &str) -> String {
    format!("{}/{}", styles(workspace), encode(name))
}

/// Style definition file, next to the style's metadata.
pub fn style_content(workspace: Option<&str>, filename: &str) -> String {
    format!("{}/{}", styles(workspace), encode(filename))
}
