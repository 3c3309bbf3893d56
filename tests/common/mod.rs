//! In-memory GeoServer and spatial catalog shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::sync::Arc;

use geosync::db::{GeometryColumn, GeometryKind, SpatialCatalog};
use geosync::models::{ConnectionParameters, PostGisDataStore, Workspace};
use geosync::sync::{Body, GeoserverClient, Method, Request, Response, Transport, TransportError};
use serde_json::{json, Map, Value};

pub const BUILTIN_STYLES: [&str; 5] = ["generic", "line", "point", "polygon", "raster"];

/// Connection settings used by the stores the tests create.
pub fn test_connection() -> ConnectionParameters {
    ConnectionParameters::new("db.local", 5432, "gis", "public", "gis", "secret")
}

pub fn new_store(workspace: Arc<Workspace>, name: &str) -> PostGisDataStore {
    PostGisDataStore::new(name, workspace, test_connection())
}

pub fn fake_client() -> GeoserverClient<FakeGeoServer> {
    GeoserverClient::new(FakeGeoServer::new())
}

// Fake GeoServer

type StoreKey = (String, String);
type FeatureTypeKey = (String, String, String);
type StyleKey = (Option<String>, String);

struct StyleRecord {
    filename: String,
    content: String,
}

#[derive(Default)]
struct Catalog {
    workspaces: BTreeMap<String, bool>,
    datastores: BTreeMap<StoreKey, Value>,
    feature_types: BTreeMap<FeatureTypeKey, Value>,
    default_styles: BTreeMap<StoreKey, (String, Option<String>)>,
    styles: BTreeMap<StyleKey, StyleRecord>,
}

/// Catalog held in memory, answering the REST paths the client uses.
///
/// Missing items are answered with GeoServer's "No such ..." texts. Every
/// request is recorded for inspection.
pub struct FakeGeoServer {
    catalog: RefCell<Catalog>,
    requests: RefCell<Vec<Request>>,
    offline: Cell<bool>,
    fail_deletes: Cell<bool>,
    missing_status: Cell<u16>,
}

impl Default for FakeGeoServer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGeoServer {
    pub fn new() -> Self {
        let mut catalog = Catalog::default();
        for name in BUILTIN_STYLES {
            catalog.styles.insert(
                (None, name.to_string()),
                StyleRecord {
                    filename: format!("default_{}.sld", name),
                    content: String::new(),
                },
            );
        }
        Self {
            catalog: RefCell::new(catalog),
            requests: RefCell::new(Vec::new()),
            offline: Cell::new(false),
            fail_deletes: Cell::new(false),
            missing_status: Cell::new(404),
        }
    }

    // Seeding

    pub fn add_workspace(&self, name: &str, isolated: bool) {
        self.catalog
            .borrow_mut()
            .workspaces
            .insert(name.to_string(), isolated);
    }

    /// Registers a store from a raw `dataStore` body.
    pub fn add_datastore(&self, workspace: &str, name: &str, body: Value) {
        let mut body = body;
        body["name"] = json!(name);
        stringify_entries(&mut body);
        self.catalog
            .borrow_mut()
            .datastores
            .insert((workspace.to_string(), name.to_string()), body);
    }

    pub fn add_postgis_store(&self, workspace: &str, name: &str) {
        let entries: Vec<Value> = test_connection()
            .encode()
            .into_iter()
            .map(|e| serde_json::to_value(e).unwrap())
            .collect();
        self.add_datastore(
            workspace,
            name,
            json!({
                "name": name,
                "description": "seeded",
                "type": "PostGIS",
                "enabled": true,
                "connectionParameters": {"entry": entries}
            }),
        );
    }

    pub fn add_feature_type(&self, workspace: &str, datastore: &str, name: &str, table: &str) {
        let mut catalog = self.catalog.borrow_mut();
        catalog.feature_types.insert(
            (workspace.to_string(), datastore.to_string(), name.to_string()),
            json!({"name": name, "nativeName": table, "title": name}),
        );
        catalog
            .default_styles
            .insert((workspace.to_string(), name.to_string()), ("polygon".to_string(), None));
    }

    pub fn add_style(&self, workspace: Option<&str>, name: &str, content: &str) {
        self.catalog.borrow_mut().styles.insert(
            (workspace.map(String::from), name.to_string()),
            StyleRecord {
                filename: format!("{}.sld", name),
                content: content.to_string(),
            },
        );
    }

    /// Points a published layer at a style, optionally workspace scoped.
    pub fn set_default_style(&self, workspace: &str, layer: &str, style: &str, style_workspace: Option<&str>) {
        self.catalog.borrow_mut().default_styles.insert(
            (workspace.to_string(), layer.to_string()),
            (style.to_string(), style_workspace.map(String::from)),
        );
    }

    // Inspection

    pub fn has_workspace(&self, name: &str) -> bool {
        self.catalog.borrow().workspaces.contains_key(name)
    }

    pub fn is_isolated(&self, name: &str) -> Option<bool> {
        self.catalog.borrow().workspaces.get(name).copied()
    }

    pub fn has_datastore(&self, workspace: &str, name: &str) -> bool {
        self.catalog
            .borrow()
            .datastores
            .contains_key(&(workspace.to_string(), name.to_string()))
    }

    pub fn datastore_body(&self, workspace: &str, name: &str) -> Option<Value> {
        self.catalog
            .borrow()
            .datastores
            .get(&(workspace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn has_feature_type(&self, workspace: &str, datastore: &str, name: &str) -> bool {
        self.catalog.borrow().feature_types.contains_key(&(
            workspace.to_string(),
            datastore.to_string(),
            name.to_string(),
        ))
    }

    pub fn style_content(&self, workspace: Option<&str>, name: &str) -> Option<String> {
        self.catalog
            .borrow()
            .styles
            .get(&(workspace.map(String::from), name.to_string()))
            .map(|s| s.content.clone())
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    /// Recorded POST, PUT and DELETE requests.
    pub fn writes(&self) -> Vec<Request> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method != Method::Get)
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    // Failure switches

    /// Every following request fails at the connection level.
    pub fn go_offline(&self) {
        self.offline.set(true);
    }

    /// DELETE requests answer 500.
    pub fn fail_deletes(&self) {
        self.fail_deletes.set(true);
    }

    /// Status used for "No such ..." answers. Some server versions use 200.
    pub fn answer_missing_with(&self, status: u16) {
        self.missing_status.set(status);
    }

    // Routing

    fn missing(&self, message: String) -> Response {
        Response::new(self.missing_status.get(), message)
    }

    fn route(&self, request: &Request) -> Response {
        let (path, recurse) = match request.path.split_once('?') {
            Some((path, query)) => (path, query.contains("recurse=true")),
            None => (request.path.as_str(), false),
        };

        let mut segments: Vec<String> = path
            .split('/')
            .map(|s| {
                urlencoding::decode(s)
                    .map(|c| c.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect();
        let mut json_view = false;
        if let Some(last) = segments.last_mut() {
            if let Some(stripped) = last.strip_suffix(".json") {
                *last = stripped.to_string();
                json_view = true;
            }
        }
        let segs: Vec<&str> = segments.iter().map(String::as_str).collect();

        if request.method == Method::Delete && self.fail_deletes.get() {
            return Response::new(500, "Internal error");
        }

        let body = request.body.as_ref();
        match (request.method, segs.as_slice()) {
            (Method::Get, ["rest", "about", "version"]) => Response::new(200, version_doc().to_string()),

            (Method::Get, ["rest", "workspaces"]) => self.list_workspaces(),
            (Method::Post, ["rest", "workspaces"]) => self.create_workspace(body),
            (Method::Get, ["rest", "workspaces", ws]) => self.get_workspace(ws),
            (Method::Put, ["rest", "workspaces", ws]) => self.update_workspace(ws, body),
            (Method::Delete, ["rest", "workspaces", ws]) => self.delete_workspace(ws, recurse),

            (Method::Get, ["rest", "workspaces", ws, "datastores"]) => self.list_datastores(ws),
            (Method::Post, ["rest", "workspaces", ws, "datastores"]) => self.create_datastore(ws, body),
            (Method::Get, ["rest", "workspaces", ws, "datastores", ds]) => self.get_datastore(ws, ds),
            (Method::Put, ["rest", "workspaces", ws, "datastores", ds]) => {
                self.update_datastore(ws, ds, body)
            }
            (Method::Delete, ["rest", "workspaces", ws, "datastores", ds]) => {
                self.delete_datastore(ws, ds, recurse)
            }

            (Method::Get, ["rest", "workspaces", ws, "datastores", ds, "featuretypes"]) => {
                self.list_feature_types(ws, ds)
            }
            (Method::Post, ["rest", "workspaces", ws, "datastores", ds, "featuretypes"]) => {
                self.create_feature_type(ws, ds, body)
            }
            (Method::Get, ["rest", "workspaces", ws, "datastores", ds, "featuretypes", ft]) => {
                self.get_feature_type(ws, ds, ft)
            }
            (Method::Put, ["rest", "workspaces", ws, "datastores", ds, "featuretypes", ft]) => {
                self.update_feature_type(ws, ds, ft, body)
            }
            (Method::Delete, ["rest", "workspaces", ws, "datastores", ds, "featuretypes", ft]) => {
                self.delete_feature_type(ws, ds, ft)
            }

            (Method::Get, ["rest", "layers", qualified]) => self.get_layer(qualified),

            (method, ["rest", "styles"]) => self.styles_collection(method, None, body),
            (method, ["rest", "styles", name]) => {
                self.style_item(method, None, name, json_view, body)
            }
            (method, ["rest", "workspaces", ws, "styles"]) => {
                if !self.has_workspace(ws) {
                    return self.missing(format!("No such workspace: '{}' found", ws));
                }
                self.styles_collection(method, Some(*ws), body)
            }
            (method, ["rest", "workspaces", ws, "styles", name]) => {
                if !self.has_workspace(ws) {
                    return self.missing(format!("No such workspace: '{}' found", ws));
                }
                self.style_item(method, Some(*ws), name, json_view, body)
            }

            _ => Response::new(404, "Not Found"),
        }
    }

    // Workspaces

    fn list_workspaces(&self) -> Response {
        let catalog = self.catalog.borrow();
        let items: Vec<Value> = catalog
            .workspaces
            .keys()
            .map(|name| json!({"name": name, "href": format!("http://fake/rest/workspaces/{}.json", name)}))
            .collect();
        Response::new(200, collection("workspaces", "workspace", items).to_string())
    }

    fn create_workspace(&self, body: Option<&Body>) -> Response {
        let Some(doc) = json_body(body) else {
            return Response::new(400, "Expected JSON");
        };
        let name = doc["workspace"]["name"].as_str().unwrap_or_default().to_string();
        let isolated = doc["workspace"]["isolated"].as_bool().unwrap_or(false);

        let mut catalog = self.catalog.borrow_mut();
        if catalog.workspaces.contains_key(&name) {
            return Response::new(409, format!("Workspace '{}' already exists", name));
        }
        catalog.workspaces.insert(name.clone(), isolated);
        Response::new(201, name)
    }

    fn get_workspace(&self, ws: &str) -> Response {
        match self.is_isolated(ws) {
            Some(isolated) => Response::new(
                200,
                json!({"workspace": {
                    "name": ws,
                    "isolated": isolated,
                    "dataStores": format!("http://fake/rest/workspaces/{}/datastores.json", ws)
                }})
                .to_string(),
            ),
            None => self.missing(format!("No such workspace: '{}' found", ws)),
        }
    }

    fn update_workspace(&self, ws: &str, body: Option<&Body>) -> Response {
        let Some(doc) = json_body(body) else {
            return Response::new(400, "Expected JSON");
        };
        if !self.has_workspace(ws) {
            return self.missing(format!("No such workspace: '{}' found", ws));
        }
        let new_name = doc["workspace"]["name"].as_str().unwrap_or(ws).to_string();
        let mut catalog = self.catalog.borrow_mut();
        if new_name != ws && catalog.workspaces.contains_key(&new_name) {
            return Response::new(403, format!("Workspace '{}' already exists", new_name));
        }

        let old_isolated = catalog.workspaces.remove(ws).unwrap_or(false);
        let isolated = doc["workspace"]["isolated"].as_bool().unwrap_or(old_isolated);
        catalog.workspaces.insert(new_name.clone(), isolated);

        if new_name != ws {
            catalog.datastores = std::mem::take(&mut catalog.datastores)
                .into_iter()
                .map(|((w, d), v)| (if w == ws { (new_name.clone(), d) } else { (w, d) }, v))
                .collect();
            catalog.feature_types = std::mem::take(&mut catalog.feature_types)
                .into_iter()
                .map(|((w, d, f), v)| (if w == ws { (new_name.clone(), d, f) } else { (w, d, f) }, v))
                .collect();
            catalog.default_styles = std::mem::take(&mut catalog.default_styles)
                .into_iter()
                .map(|((w, l), (s, sw))| {
                    let key = if w == ws { (new_name.clone(), l) } else { (w, l) };
                    let sw = sw.map(|sw| if sw == ws { new_name.clone() } else { sw });
                    (key, (s, sw))
                })
                .collect();
            catalog.styles = std::mem::take(&mut catalog.styles)
                .into_iter()
                .map(|((w, s), v)| {
                    let w = w.map(|w| if w == ws { new_name.clone() } else { w });
                    ((w, s), v)
                })
                .collect();
        }
        Response::new(200, "")
    }

    fn delete_workspace(&self, ws: &str, recurse: bool) -> Response {
        let mut catalog = self.catalog.borrow_mut();
        if !catalog.workspaces.contains_key(ws) {
            return self.missing(format!("No such workspace: '{}' found", ws));
        }
        let has_children = catalog.datastores.keys().any(|(w, _)| w == ws)
            || catalog.styles.keys().any(|(w, _)| w.as_deref() == Some(ws));
        if has_children && !recurse {
            return Response::new(403, "Workspace is not empty");
        }

        catalog.workspaces.remove(ws);
        catalog.datastores.retain(|(w, _), _| w != ws);
        catalog.feature_types.retain(|(w, _, _), _| w != ws);
        catalog.default_styles.retain(|(w, _), _| w != ws);
        catalog.styles.retain(|(w, _), _| w.as_deref() != Some(ws));
        Response::new(200, "")
    }

    // Data stores

    fn list_datastores(&self, ws: &str) -> Response {
        if !self.has_workspace(ws) {
            return self.missing(format!("No such workspace: '{}' found", ws));
        }
        let catalog = self.catalog.borrow();
        let items: Vec<Value> = catalog
            .datastores
            .keys()
            .filter(|(w, _)| w == ws)
            .map(|(_, d)| json!({"name": d}))
            .collect();
        Response::new(200, collection("dataStores", "dataStore", items).to_string())
    }

    fn create_datastore(&self, ws: &str, body: Option<&Body>) -> Response {
        let Some(doc) = json_body(body) else {
            return Response::new(400, "Expected JSON");
        };
        if !self.has_workspace(ws) {
            return self.missing(format!("No such workspace: '{}' found", ws));
        }
        let mut store = doc["dataStore"].clone();
        let name = store["name"].as_str().unwrap_or_default().to_string();
        if self.has_datastore(ws, &name) {
            return Response::new(500, format!("Store '{}' already exists in workspace '{}'", name, ws));
        }
        stringify_entries(&mut store);
        self.catalog
            .borrow_mut()
            .datastores
            .insert((ws.to_string(), name.clone()), store);
        Response::new(201, name)
    }

    fn get_datastore(&self, ws: &str, ds: &str) -> Response {
        if !self.has_workspace(ws) {
            return self.missing(format!("No such workspace: '{}' found", ws));
        }
        match self.datastore_body(ws, ds) {
            Some(mut store) => {
                store["workspace"] = json!({"name": ws});
                if store.get("enabled").is_none() {
                    store["enabled"] = json!(true);
                }
                Response::new(200, json!({ "dataStore": store }).to_string())
            }
            None => self.missing(format!("No such datastore: {},{}", ws, ds)),
        }
    }

    fn update_datastore(&self, ws: &str, ds: &str, body: Option<&Body>) -> Response {
        let Some(doc) = json_body(body) else {
            return Response::new(400, "Expected JSON");
        };
        let Some(mut stored) = self.datastore_body(ws, ds) else {
            return self.missing(format!("No such datastore: {},{}", ws, ds));
        };

        let mut update = doc["dataStore"].clone();
        stringify_entries(&mut update);
        merge(&mut stored, update);
        let new_name = stored["name"].as_str().unwrap_or(ds).to_string();

        let mut catalog = self.catalog.borrow_mut();
        catalog.datastores.remove(&(ws.to_string(), ds.to_string()));
        catalog.datastores.insert((ws.to_string(), new_name.clone()), stored);
        if new_name != ds {
            catalog.feature_types = std::mem::take(&mut catalog.feature_types)
                .into_iter()
                .map(|((w, d, f), v)| {
                    if w == ws && d == ds {
                        ((w, new_name.clone(), f), v)
                    } else {
                        ((w, d, f), v)
                    }
                })
                .collect();
        }
        Response::new(200, "")
    }

    fn delete_datastore(&self, ws: &str, ds: &str, recurse: bool) -> Response {
        if !self.has_datastore(ws, ds) {
            return self.missing(format!("No such datastore: {},{}", ws, ds));
        }
        let mut catalog = self.catalog.borrow_mut();
        let children: Vec<String> = catalog
            .feature_types
            .keys()
            .filter(|(w, d, _)| w == ws && d == ds)
            .map(|(_, _, f)| f.clone())
            .collect();
        if !children.is_empty() && !recurse {
            return Response::new(403, "Store is not empty");
        }

        catalog.datastores.remove(&(ws.to_string(), ds.to_string()));
        catalog.feature_types.retain(|(w, d, _), _| !(w == ws && d == ds));
        for layer in children {
            catalog.default_styles.remove(&(ws.to_string(), layer));
        }
        Response::new(200, "")
    }

    // Feature types and layers

    fn list_feature_types(&self, ws: &str, ds: &str) -> Response {
        if !self.has_datastore(ws, ds) {
            return self.missing(format!("No such datastore: {},{}", ws, ds));
        }
        let catalog = self.catalog.borrow();
        let items: Vec<Value> = catalog
            .feature_types
            .keys()
            .filter(|(w, d, _)| w == ws && d == ds)
            .map(|(_, _, f)| json!({"name": f}))
            .collect();
        Response::new(200, collection("featureTypes", "featureType", items).to_string())
    }

    fn create_feature_type(&self, ws: &str, ds: &str, body: Option<&Body>) -> Response {
        let Some(doc) = json_body(body) else {
            return Response::new(400, "Expected JSON");
        };
        if !self.has_datastore(ws, ds) {
            return self.missing(format!("No such datastore: {},{}", ws, ds));
        }
        let ft = doc["featureType"].clone();
        let name = ft["name"].as_str().unwrap_or_default().to_string();
        if self.has_feature_type(ws, ds, &name) {
            return Response::new(500, format!("Resource named '{}' already exists", name));
        }

        let mut catalog = self.catalog.borrow_mut();
        catalog
            .feature_types
            .insert((ws.to_string(), ds.to_string(), name.clone()), ft);
        catalog
            .default_styles
            .entry((ws.to_string(), name.clone()))
            .or_insert_with(|| ("polygon".to_string(), None));
        Response::new(201, name)
    }

    fn get_feature_type(&self, ws: &str, ds: &str, ft: &str) -> Response {
        let catalog = self.catalog.borrow();
        match catalog
            .feature_types
            .get(&(ws.to_string(), ds.to_string(), ft.to_string()))
        {
            Some(body) => {
                let mut body = body.clone();
                body["store"] = json!({"@class": "dataStore", "name": format!("{}:{}", ws, ds)});
                Response::new(200, json!({ "featureType": body }).to_string())
            }
            None => {
                self.missing(format!("No such feature type: {},{},{}", ws, ds, ft))
            }
        }
    }

    fn update_feature_type(&self, ws: &str, ds: &str, ft: &str, body: Option<&Body>) -> Response {
        let Some(doc) = json_body(body) else {
            return Response::new(400, "Expected JSON");
        };
        let key = (ws.to_string(), ds.to_string(), ft.to_string());
        let Some(mut stored) = self.catalog.borrow().feature_types.get(&key).cloned() else {
            return self.missing(format!("No such feature type: {},{},{}", ws, ds, ft));
        };

        merge(&mut stored, doc["featureType"].clone());
        let new_name = stored["name"].as_str().unwrap_or(ft).to_string();

        let mut catalog = self.catalog.borrow_mut();
        catalog.feature_types.remove(&key);
        catalog
            .feature_types
            .insert((ws.to_string(), ds.to_string(), new_name.clone()), stored);
        if new_name != ft {
            if let Some(style) = catalog.default_styles.remove(&(ws.to_string(), ft.to_string())) {
                catalog.default_styles.insert((ws.to_string(), new_name), style);
            }
        }
        Response::new(200, "")
    }

    fn delete_feature_type(&self, ws: &str, ds: &str, ft: &str) -> Response {
        let mut catalog = self.catalog.borrow_mut();
        let key = (ws.to_string(), ds.to_string(), ft.to_string());
        if catalog.feature_types.remove(&key).is_none() {
            return self.missing(format!("No such feature type: {},{},{}", ws, ds, ft));
        }
        catalog.default_styles.remove(&(ws.to_string(), ft.to_string()));
        Response::new(200, "")
    }

    fn get_layer(&self, qualified: &str) -> Response {
        let Some((ws, name)) = qualified.split_once(':') else {
            return Response::new(404, format!("No such layer: {}", qualified));
        };
        let catalog = self.catalog.borrow();
        let published = catalog
            .feature_types
            .keys()
            .any(|(w, _, f)| w == ws && f == name);
        if !published {
            return Response::new(404, format!("No such layer: {}", qualified));
        }

        let default_style = match catalog.default_styles.get(&(ws.to_string(), name.to_string())) {
            Some((style, Some(style_ws))) => json!({
                "name": format!("{}:{}", style_ws, style),
                "workspace": style_ws,
            }),
            Some((style, None)) => json!({ "name": style }),
            None => json!({ "name": "polygon" }),
        };
        Response::new(
            200,
            json!({"layer": {
                "name": name,
                "type": "VECTOR",
                "defaultStyle": default_style,
                "resource": {"@class": "featureType", "name": qualified}
            }})
            .to_string(),
        )
    }

    // Styles

    fn styles_collection(&self, method: Method, ws: Option<&str>, body: Option<&Body>) -> Response {
        let scope = ws.map(String::from);
        match method {
            Method::Get => {
                let catalog = self.catalog.borrow();
                let items: Vec<Value> = catalog
                    .styles
                    .keys()
                    .filter(|(w, _)| *w == scope)
                    .map(|(_, s)| json!({"name": s}))
                    .collect();
                Response::new(200, collection("styles", "style", items).to_string())
            }
            Method::Post => {
                let Some(doc) = json_body(body) else {
                    return Response::new(400, "Expected JSON");
                };
                let name = doc["style"]["name"].as_str().unwrap_or_default().to_string();
                let filename = doc["style"]["filename"]
                    .as_str()
                    .map(String::from)
                    .unwrap_or_else(|| format!("{}.sld", name));

                let mut catalog = self.catalog.borrow_mut();
                let key = (scope, name.clone());
                if catalog.styles.contains_key(&key) {
                    return Response::new(403, format!("Style '{}' already exists", name));
                }
                catalog.styles.insert(
                    key,
                    StyleRecord {
                        filename,
                        content: String::new(),
                    },
                );
                Response::new(201, name)
            }
            _ => Response::new(405, "Method Not Allowed"),
        }
    }

    fn style_item(
        &self,
        method: Method,
        ws: Option<&str>,
        name: &str,
        json_view: bool,
        body: Option<&Body>,
    ) -> Response {
        let scope = ws.map(String::from);
        let key = (scope.clone(), name.to_string());
        let mut catalog = self.catalog.borrow_mut();

        match method {
            Method::Get if json_view => match catalog.styles.get(&key) {
                Some(record) => {
                    let mut style = json!({
                        "name": name,
                        "format": "sld",
                        "languageVersion": {"version": "1.0.0"},
                        "filename": record.filename,
                    });
                    if let Some(ws) = ws {
                        style["workspace"] = json!({ "name": ws });
                    }
                    Response::new(200, json!({ "style": style }).to_string())
                }
                None => {
                    self.missing(format!("No such style: {}", name))
                }
            },
            Method::Get => {
                let content = catalog
                    .styles
                    .iter()
                    .find(|((w, _), record)| *w == scope && record.filename == name)
                    .map(|(_, record)| record.content.clone());
                match content {
                    Some(content) => Response::new(200, content),
                    None => Response::new(404, format!("No such style file: {}", name)),
                }
            }
            Method::Put => {
                let Some(mut record) = catalog.styles.remove(&key) else {
                    return self.missing(format!("No such style: {}", name));
                };
                match body {
                    Some(Body::Raw { content, .. }) => {
                        record.content = content.clone();
                        catalog.styles.insert(key, record);
                    }
                    Some(Body::Json(doc)) => {
                        let new_name = doc["style"]["name"].as_str().unwrap_or(name).to_string();
                        if let Some(filename) = doc["style"]["filename"].as_str() {
                            record.filename = filename.to_string();
                        }
                        catalog.styles.insert((scope, new_name), record);
                    }
                    None => {
                        catalog.styles.insert(key, record);
                        return Response::new(400, "Empty body");
                    }
                }
                Response::new(200, "")
            }
            Method::Delete => {
                if catalog.styles.remove(&key).is_none() {
                    return self.missing(format!("No such style: {}", name));
                }
                Response::new(200, "")
            }
            Method::Post => Response::new(405, "Method Not Allowed"),
        }
    }
}

impl Transport for FakeGeoServer {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        if self.offline.get() {
            return Err(TransportError::Connection("connection refused".to_string()));
        }
        Ok(self.route(&request))
    }
}

fn json_body(body: Option<&Body>) -> Option<&Value> {
    match body {
        Some(Body::Json(value)) => Some(value),
        _ => None,
    }
}

/// GeoServer collections: an empty one is the empty string.
fn collection(outer: &str, inner: &str, items: Vec<Value>) -> Value {
    let mut doc = Map::new();
    if items.is_empty() {
        doc.insert(outer.to_string(), json!(""));
    } else {
        doc.insert(outer.to_string(), json!({ inner: items }));
    }
    Value::Object(doc)
}

/// GeoServer answers every connection parameter as a string.
fn stringify_entries(store: &mut Value) {
    if let Some(entries) = store
        .pointer_mut("/connectionParameters/entry")
        .and_then(Value::as_array_mut)
    {
        for entry in entries {
            let text = match entry.get("$") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => continue,
                Some(other) => other.to_string(),
            };
            // the server drops the value of empty settings
            if text.is_empty() {
                if let Some(entry) = entry.as_object_mut() {
                    entry.remove("$");
                }
            } else {
                entry["$"] = Value::String(text);
            }
        }
    }
}

fn merge(target: &mut Value, update: Value) {
    if let (Some(target), Value::Object(update)) = (target.as_object_mut(), update) {
        for (k, v) in update {
            target.insert(k, v);
        }
    }
}

fn version_doc() -> Value {
    json!({"about": {"resource": [
        {"@name": "GeoServer", "Build-Timestamp": "26-Dec-2019 04:19", "Version": "2.16.2"},
        {"@name": "GeoTools", "Build-Timestamp": "26-Dec-2019 02:55", "Version": "22.2"},
        {"@name": "GeoWebCache", "Version": "1.16.2"}
    ]}})
}

// Fake spatial catalog

/// Tables known to the fake database, keyed by schema and name.
#[derive(Default)]
pub struct FakeSpatialCatalog {
    tables: BTreeMap<(String, String), Option<(GeometryColumn, i32)>>,
}

impl FakeSpatialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, schema: &str, table: &str, column: &str, kind: GeometryKind, srid: i32) -> Self {
        self.tables.insert(
            (schema.to_string(), table.to_string()),
            Some((
                GeometryColumn {
                    name: column.to_string(),
                    kind,
                },
                srid,
            )),
        );
        self
    }

    /// A table with no geometry or geography column.
    pub fn with_plain_table(mut self, schema: &str, table: &str) -> Self {
        self.tables
            .insert((schema.to_string(), table.to_string()), None);
        self
    }
}

impl SpatialCatalog for FakeSpatialCatalog {
    async fn table_exists(&self, schema: &str, table: &str) -> Result<bool, sqlx::Error> {
        Ok(self
            .tables
            .contains_key(&(schema.to_string(), table.to_string())))
    }

    async fn geometry_column(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Option<GeometryColumn>, sqlx::Error> {
        Ok(self
            .tables
            .get(&(schema.to_string(), table.to_string()))
            .and_then(|t| t.as_ref())
            .map(|(column, _)| column.clone()))
    }

    async fn srid(
        &self,
        schema: &str,
        table: &str,
        _column: &GeometryColumn,
    ) -> Result<i32, sqlx::Error> {
        Ok(self
            .tables
            .get(&(schema.to_string(), table.to_string()))
            .and_then(|t| t.as_ref())
            .map(|(_, srid)| *srid)
            .unwrap_or(0))
    }
}
