//! JSON documents exchanged with the GeoServer REST API.
//!
//! Field names follow the server's camelCase; unknown fields in responses
//! are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Entry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AboutDoc {
    pub about: About,
}

#[derive(Debug, Deserialize)]
pub struct About {
    #[serde(default)]
    pub resource: Vec<AboutResource>,
}

#[derive(Debug, Deserialize)]
pub struct AboutResource {
    #[serde(rename = "@name")]
    pub name: String,
    /// Usually a string, but some components report a bare number.
    #[serde(rename = "Version", default)]
    pub version: Option<Value>,
}

impl AboutResource {
    pub fn version_text(&self) -> Option<String> {
        match &self.version {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceDoc {
    pub workspace: WorkspaceBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceBody {
    pub name: String,
    #[serde(default)]
    pub isolated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataStoreDoc {
    #[serde(rename = "dataStore")]
    pub data_store: DataStoreBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataStoreBody {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub store_type: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Only present in responses.
    #[serde(default, skip_serializing)]
    pub workspace: Option<NameRef>,
    #[serde(rename = "connectionParameters", default)]
    pub connection_parameters: EntryList,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryList {
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureTypeDoc {
    #[serde(rename = "featureType")]
    pub feature_type: FeatureTypeInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureTypeInfo {
    pub name: String,
    #[serde(rename = "nativeName", default)]
    pub native_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureTypeWrite {
    #[serde(rename = "featureType")]
    pub feature_type: FeatureTypeBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureTypeBody {
    pub name: String,
    #[serde(rename = "nativeName")]
    pub native_name: String,
    pub title: String,
    #[serde(rename = "nativeCRS")]
    pub native_crs: String,
    pub srs: String,
    #[serde(rename = "nativeBoundingBox", skip_serializing_if = "Option::is_none")]
    pub native_bounding_box: Option<BoundingBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundingBox {
    pub minx: f64,
    pub maxx: f64,
    pub miny: f64,
    pub maxy: f64,
    pub crs: String,
}

impl BoundingBox {
    /// The whole lon/lat world, labelled with `crs`.
    pub fn world(crs: impl Into<String>) -> Self {
        Self {
            minx: -180.0,
            maxx: 180.0,
            miny: -90.0,
            maxy: 90.0,
            crs: crs.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayerDoc {
    pub layer: LayerInfo,
}

/// Published layer record, as returned by `rest/layers/<ws>:<name>`.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub layer_type: Option<String>,
    #[serde(rename = "defaultStyle", default)]
    pub default_style: Option<StyleRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StyleRef {
    pub name: String,
    #[serde(default)]
    pub workspace: Option<String>,
}

impl StyleRef {
    /// Style name without a `workspace:` prefix, and the workspace it
    /// lives in, if any.
    pub fn resolve(&self) -> (String, Option<String>) {
        match &self.workspace {
            Some(ws) => {
                let name = self
                    .name
                    .split_once(':')
                    .map(|(_, n)| n)
                    .unwrap_or(&self.name);
                (name.to_string(), Some(ws.clone()))
            }
            None => (self.name.clone(), None),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleDoc {
    pub style: StyleBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleBody {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Names listed in a collection document such as
/// `{"workspaces": {"workspace": [{"name": ...}]}}`.
///
/// An empty collection comes back as `{"workspaces": ""}` and a single item
/// may be an object instead of an array; both are handled.
pub fn collection_names(doc: &Value, outer: &str, inner: &str) -> Vec<String> {
    let items = match doc.get(outer).and_then(|o| o.get(inner)) {
        Some(items) => items,
        None => return Vec::new(),
    };

    let name_of = |item: &Value| item.get("name").and_then(Value::as_str).map(String::from);

    match items {
        Value::Array(list) => list.iter().filter_map(name_of).collect(),
        Value::Object(_) => name_of(items).into_iter().collect(),
        _ => Vec::new(),
    }
}
