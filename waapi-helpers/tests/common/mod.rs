#![allow(dead_code)]
//! Test harness: an in-process mock of the authoring application's
//! remote API, serving an in-memory project tree over TCP.

use std::collections::HashMap;
use std::io::{BufReader, BufWriter};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Map, Value};

use waapi_client::framing::{read_message, write_message};
use waapi_client::protocol::{RpcRequest, RpcResponse};
use waapi_client::{uri, WaapiClient};

/// One object in the mock project tree.
#[derive(Clone)]
struct Node {
    name: String,
    ty: String,
    parent: Option<String>,
    children: Vec<String>,
    props: Map<String, Value>,
    /// Raw inclusion entries, for sound banks.
    inclusions: Vec<Value>,
}

#[derive(Clone, Default)]
struct Tree {
    nodes: HashMap<String, Node>,
    roots: Vec<String>,
}

struct Project {
    tree: Tree,
    next_guid: u64,
    /// Snapshot taken at beginGroup, awaiting endGroup/cancelGroup.
    pending: Option<Tree>,
    /// Snapshots restorable by the Undo UI command.
    undo_stack: Vec<Tree>,
}

impl Tree {
    fn path_of(&self, id: &str) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id.to_string());
        while let Some(cur) = current {
            let node = &self.nodes[&cur];
            segments.push(node.name.clone());
            current = node.parent.clone();
        }
        segments.reverse();
        format!("\\{}", segments.join("\\"))
    }

    fn find_by_path(&self, path: &str) -> Option<String> {
        let mut segments = path.split('\\').filter(|s| !s.is_empty());
        let first = segments.next()?;
        let mut current = self
            .roots
            .iter()
            .find(|id| self.nodes[*id].name == first)?
            .clone();
        for seg in segments {
            current = self.nodes[&current]
                .children
                .iter()
                .find(|c| self.nodes[*c].name == seg)?
                .clone();
        }
        Some(current)
    }

    fn find_child_by_name(&self, parent: &str, name: &str) -> Option<String> {
        self.nodes[parent]
            .children
            .iter()
            .find(|c| self.nodes[*c].name == name)
            .cloned()
    }

    fn remove_subtree(&mut self, id: &str) {
        if let Some(node) = self.nodes.remove(id) {
            for child in &node.children {
                self.remove_subtree(child);
            }
            if let Some(parent) = node.parent {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.children.retain(|c| c != id);
                }
            }
        }
        self.roots.retain(|r| r != id);
    }

    /// Resolve a guid-or-path string to a node id.
    fn resolve_one(&self, value: &Value) -> Option<String> {
        let s = value.as_str()?;
        if s.starts_with('\\') {
            self.find_by_path(s)
        } else if self.nodes.contains_key(s) {
            Some(s.to_string())
        } else {
            None
        }
    }

    /// Resolve a query `from` clause to node ids.
    fn resolve_from(&self, from: &Value) -> Vec<String> {
        if let Some(ids) = from.get("id").and_then(|v| v.as_array()) {
            ids.iter()
                .filter_map(|v| v.as_str())
                .filter(|id| self.nodes.contains_key(*id))
                .map(str::to_string)
                .collect()
        } else if let Some(paths) = from.get("path").and_then(|v| v.as_array()) {
            paths
                .iter()
                .filter_map(|v| v.as_str())
                .filter_map(|p| self.find_by_path(p))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Build the returned object shape for the requested properties.
    /// Properties the object does not carry are omitted, not nulled.
    fn project_obj(&self, id: &str, props: &[String]) -> Value {
        let node = &self.nodes[id];
        let mut obj = Map::new();
        for p in props {
            let value = match p.as_str() {
                "id" => Some(Value::String(id.to_string())),
                "name" => Some(Value::String(node.name.clone())),
                "type" => Some(Value::String(node.ty.clone())),
                "path" => Some(Value::String(self.path_of(id))),
                other => node.props.get(other).cloned(),
            };
            if let Some(v) = value {
                obj.insert(p.clone(), v);
            }
        }
        Value::Object(obj)
    }
}

impl Project {
    fn seed() -> Self {
        let mut project = Project {
            tree: Tree::default(),
            next_guid: 1,
            pending: None,
            undo_stack: Vec::new(),
        };

        for top in [
            "Actor-Mixer Hierarchy",
            "Master-Mixer Hierarchy",
            "Events",
            "SoundBanks",
        ] {
            let root = project.insert(None, top, "PhysicalFolder");
            let wwu = project.insert(Some(&root), "Default Work Unit", "WorkUnit");
            if top == "Master-Mixer Hierarchy" {
                let bus = project.insert(Some(&wwu), "Master Audio Bus", "Bus");
                if let Some(node) = project.tree.nodes.get_mut(&bus) {
                    node.props.insert("BusVolume".to_string(), json!(0.0));
                }
            }
        }

        project
    }

    fn new_guid(&mut self) -> String {
        let n = self.next_guid;
        self.next_guid += 1;
        format!("{{{:08X}-0000-1000-8000-{:012X}}}", n, n)
    }

    fn insert(&mut self, parent: Option<&str>, name: &str, ty: &str) -> String {
        let id = self.new_guid();
        self.tree.nodes.insert(
            id.clone(),
            Node {
                name: name.to_string(),
                ty: ty.to_string(),
                parent: parent.map(str::to_string),
                children: Vec::new(),
                props: Map::new(),
                inclusions: Vec::new(),
            },
        );
        match parent {
            Some(p) => self.tree.nodes.get_mut(p).unwrap().children.push(id.clone()),
            None => self.tree.roots.push(id.clone()),
        }
        id
    }

    fn clone_subtree(&mut self, src: &str, parent: &str) -> String {
        let node = self.tree.nodes[src].clone();
        let copy = self.insert(Some(parent), &node.name, &node.ty);
        if let Some(c) = self.tree.nodes.get_mut(&copy) {
            c.props = node.props.clone();
            c.inclusions = node.inclusions.clone();
        }
        for child in node.children {
            self.clone_subtree(&child, &copy);
        }
        copy
    }

    /// Pick a name that is free under the parent: `name`, `name_1`, ...
    fn rename_free(&self, parent: &str, name: &str) -> String {
        if self.tree.find_child_by_name(parent, name).is_none() {
            return name.to_string();
        }
        let mut i = 1;
        loop {
            let candidate = format!("{}_{}", name, i);
            if self.tree.find_child_by_name(parent, &candidate).is_none() {
                return candidate;
            }
            i += 1;
        }
    }

    /// Recursive create; `conflict` is inherited by nested children.
    fn handle_create(&mut self, parent: &str, spec: &Value, conflict: &str) -> Result<Value, String> {
        let name = spec
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or("create: missing name")?;
        let ty = spec
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or("create: missing type")?;

        let id = match self.tree.find_child_by_name(parent, name) {
            Some(existing) => match conflict {
                "merge" => existing,
                "replace" => {
                    self.tree.remove_subtree(&existing);
                    self.insert(Some(parent), name, ty)
                }
                "rename" => {
                    let free = self.rename_free(parent, name);
                    self.insert(Some(parent), &free, ty)
                }
                _ => return Err(format!("create: name conflict on {}", name)),
            },
            None => self.insert(Some(parent), name, ty),
        };

        let mut ret = Map::new();
        ret.insert("id".to_string(), json!(id));
        ret.insert("name".to_string(), json!(self.tree.nodes[&id].name));

        if let Some(children) = spec.get("children").and_then(|c| c.as_array()) {
            let mut created = Vec::new();
            for child in children {
                created.push(self.handle_create(&id, child, conflict)?);
            }
            ret.insert("children".to_string(), Value::Array(created));
        }

        Ok(Value::Object(ret))
    }

    fn handle(&mut self, endpoint: &str, args: &Value, options: &Value) -> Result<Value, String> {
        match endpoint {
            uri::CORE_GET_INFO => Ok(json!({
                "displayName": "Mock Authoring",
                "apiVersion": "2023.1.0",
            })),

            uri::CORE_OBJECT_GET => {
                let from = args.get("from").ok_or("get: missing from")?;
                let mut ids = self.tree.resolve_from(from);

                if let Some(transforms) = args.get("transform").and_then(|t| t.as_array()) {
                    for tr in transforms {
                        let select = tr
                            .get("select")
                            .and_then(|s| s.get(0))
                            .and_then(|s| s.as_str());
                        match select {
                            Some("children") => {
                                ids = ids
                                    .iter()
                                    .flat_map(|id| self.tree.nodes[id].children.clone())
                                    .collect();
                            }
                            Some("parent") => {
                                ids = ids
                                    .iter()
                                    .filter_map(|id| self.tree.nodes[id].parent.clone())
                                    .collect();
                            }
                            other => return Err(format!("get: unsupported select {:?}", other)),
                        }
                    }
                }

                let props: Vec<String> = options
                    .get("return")
                    .and_then(|r| r.as_array())
                    .map(|arr| {
                        arr.iter()
                            .filter_map(|p| p.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_else(|| vec!["id".to_string()]);

                let objects: Vec<Value> = ids
                    .iter()
                    .map(|id| self.tree.project_obj(id, &props))
                    .collect();
                Ok(json!({ "return": objects }))
            }

            uri::CORE_OBJECT_CREATE => {
                let parent = self
                    .tree
                    .resolve_one(args.get("parent").unwrap_or(&Value::Null))
                    .ok_or("create: unknown parent")?;
                let conflict = args
                    .get("onNameConflict")
                    .and_then(|v| v.as_str())
                    .unwrap_or("fail")
                    .to_string();
                self.handle_create(&parent, args, &conflict)
            }

            uri::CORE_OBJECT_COPY | uri::CORE_OBJECT_MOVE => {
                let object = self
                    .tree
                    .resolve_one(args.get("object").unwrap_or(&Value::Null))
                    .ok_or("copy/move: unknown object")?;
                let parent = self
                    .tree
                    .resolve_one(args.get("parent").unwrap_or(&Value::Null))
                    .ok_or("copy/move: unknown parent")?;
                let conflict = args
                    .get("onNameConflict")
                    .and_then(|v| v.as_str())
                    .unwrap_or("fail");

                let name = self.tree.nodes[&object].name.clone();
                if let Some(existing) = self.tree.find_child_by_name(&parent, &name) {
                    match conflict {
                        "replace" => self.tree.remove_subtree(&existing),
                        "rename" => {}
                        _ => return Err(format!("copy/move: name conflict on {}", name)),
                    }
                }

                if endpoint == uri::CORE_OBJECT_COPY {
                    // Pick the final name before attaching the clone, so the
                    // clone itself does not count as a conflict.
                    let target_name = self.rename_free(&parent, &name);
                    let copy = self.clone_subtree(&object, &parent);
                    if target_name != name {
                        self.tree.nodes.get_mut(&copy).unwrap().name = target_name;
                    }
                    Ok(json!({ "id": copy }))
                } else {
                    let old_parent = self.tree.nodes[&object].parent.clone();
                    if let Some(op) = old_parent {
                        self.tree
                            .nodes
                            .get_mut(&op)
                            .unwrap()
                            .children
                            .retain(|c| c != &object);
                    }
                    self.tree.nodes.get_mut(&object).unwrap().parent = Some(parent.clone());
                    self.tree.nodes.get_mut(&parent).unwrap().children.push(object.clone());
                    Ok(json!({ "id": object }))
                }
            }

            uri::CORE_OBJECT_DELETE => {
                let object = self
                    .tree
                    .resolve_one(args.get("object").unwrap_or(&Value::Null))
                    .ok_or("delete: unknown object")?;
                self.tree.remove_subtree(&object);
                Ok(json!({}))
            }

            uri::CORE_OBJECT_SET_PROPERTY => {
                let object = self
                    .tree
                    .resolve_one(args.get("object").unwrap_or(&Value::Null))
                    .ok_or("setProperty: unknown object")?;
                let property = args
                    .get("property")
                    .and_then(|v| v.as_str())
                    .ok_or("setProperty: missing property")?;
                let value = args.get("value").cloned().unwrap_or(Value::Null);
                self.tree
                    .nodes
                    .get_mut(&object)
                    .unwrap()
                    .props
                    .insert(property.to_string(), value);
                Ok(json!({}))
            }

            uri::CORE_OBJECT_GET_PROP_AND_REF_NAMES => {
                let object = self
                    .tree
                    .resolve_one(args.get("object").unwrap_or(&Value::Null))
                    .ok_or("getPropertyAndReferenceNames: unknown object")?;
                // Common names for every object plus whatever is set.
                let mut names = vec![
                    "Volume".to_string(),
                    "Pitch".to_string(),
                    "Notes".to_string(),
                    "OutputBus".to_string(),
                ];
                for key in self.tree.nodes[&object].props.keys() {
                    if !names.iter().any(|n| n == key) {
                        names.push(key.clone());
                    }
                }
                Ok(json!({ "return": names }))
            }

            uri::CORE_SOUNDBANK_GET_INCLUSIONS => {
                let bank = self
                    .tree
                    .resolve_one(args.get("soundbank").unwrap_or(&Value::Null))
                    .ok_or("getInclusions: unknown bank")?;
                Ok(json!({ "inclusions": self.tree.nodes[&bank].inclusions }))
            }

            uri::CORE_SOUNDBANK_SET_INCLUSIONS => {
                let bank = self
                    .tree
                    .resolve_one(args.get("soundbank").unwrap_or(&Value::Null))
                    .ok_or("setInclusions: unknown bank")?;
                let entries: Vec<Value> = args
                    .get("inclusions")
                    .and_then(|i| i.as_array())
                    .cloned()
                    .unwrap_or_default();
                let operation = args
                    .get("operation")
                    .and_then(|v| v.as_str())
                    .unwrap_or("replace");

                let node = self.tree.nodes.get_mut(&bank).unwrap();
                match operation {
                    "replace" => node.inclusions = entries,
                    "add" => node.inclusions.extend(entries),
                    "remove" => {
                        let removed: Vec<&Value> =
                            entries.iter().filter_map(|e| e.get("object")).collect();
                        node.inclusions
                            .retain(|incl| !removed.contains(&incl.get("object").unwrap_or(&Value::Null)));
                    }
                    other => return Err(format!("setInclusions: bad operation {}", other)),
                }
                Ok(json!({}))
            }

            uri::CORE_AUDIO_IMPORT => {
                let default = args.get("default").ok_or("import: missing default")?;
                let location = self
                    .tree
                    .resolve_one(default.get("importLocation").unwrap_or(&Value::Null))
                    .ok_or("import: unknown importLocation")?;
                let imports: Vec<Value> = default
                    .get("imports")
                    .and_then(|i| i.as_array())
                    .cloned()
                    .unwrap_or_default();

                let mut created = Vec::new();
                for import in imports {
                    let object_path = import
                        .get("objectPath")
                        .and_then(|v| v.as_str())
                        .ok_or("import: missing objectPath")?;
                    let (ty, name) = match object_path.split_once('>') {
                        Some((tag, rest)) => (tag.trim_start_matches('<'), rest),
                        None => ("Sound", object_path),
                    };
                    let id = match self.tree.find_child_by_name(&location, name) {
                        Some(existing) => existing,
                        None => self.insert(Some(&location), name, ty),
                    };
                    if let Some(file) = import.get("audioFile").cloned() {
                        self.tree
                            .nodes
                            .get_mut(&id)
                            .unwrap()
                            .props
                            .insert("originalWavFilePath".to_string(), file);
                    }
                    created.push(json!({ "id": id }));
                }
                Ok(json!({ "objects": created }))
            }

            uri::CORE_UNDO_BEGIN_GROUP => {
                self.pending = Some(self.tree.clone());
                Ok(json!({}))
            }

            uri::CORE_UNDO_END_GROUP => {
                if let Some(snapshot) = self.pending.take() {
                    self.undo_stack.push(snapshot);
                }
                Ok(json!({}))
            }

            uri::CORE_UNDO_CANCEL_GROUP => {
                if let Some(snapshot) = self.pending.take() {
                    self.tree = snapshot;
                }
                Ok(json!({}))
            }

            uri::UI_COMMANDS_EXECUTE => {
                let command = args.get("command").and_then(|v| v.as_str()).unwrap_or("");
                if command == "Undo" {
                    if let Some(snapshot) = self.undo_stack.pop() {
                        self.tree = snapshot;
                    }
                }
                Ok(json!({}))
            }

            other => Err(format!("unknown endpoint {}", other)),
        }
    }
}

/// Handle to a running mock server.
pub struct MockServer {
    addr: String,
}

impl MockServer {
    /// Bind on an ephemeral port and start serving the seeded project.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let project = Arc::new(Mutex::new(Project::seed()));

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let project = Arc::clone(&project);
                thread::spawn(move || serve_connection(stream, project));
            }
        });

        Self { addr }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn connect(&self) -> WaapiClient {
        WaapiClient::connect(&self.addr).unwrap()
    }
}

fn serve_connection(stream: TcpStream, project: Arc<Mutex<Project>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut writer = BufWriter::new(stream);

    loop {
        let req: RpcRequest = match read_message(&mut reader) {
            Ok(r) => r,
            Err(_) => break,
        };
        let resp = {
            let mut project = project.lock().unwrap();
            match project.handle(&req.uri, &req.args, &req.options) {
                Ok(result) => RpcResponse::success(req.id, result),
                Err(message) => RpcResponse::failure(req.id, message),
            }
        };
        if write_message(&mut writer, &resp).is_err() {
            break;
        }
    }
}
