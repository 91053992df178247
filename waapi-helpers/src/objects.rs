//! Creating, copying, moving and deleting objects.

use log::debug;
use serde_json::json;

use waapi_client::{uri, Result, WaapiClient, WaapiError};
use waapi_types::{Guid, NameConflict, WaapiValue};

use crate::ensure_connected;

/// How a batch of objects is arranged under the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateStrategy {
    /// One create call per name/type pair; all objects become siblings
    /// directly under the parent.
    #[default]
    Wide,
    /// A single create call with a nested children chain; each object is
    /// parented to the previous one.
    Deep,
}

/// Create a batch of named, typed objects under a parent (guid or path).
///
/// `names` and `types` must have equal lengths; empty input is a no-op.
/// Each slot of the result holds the created (or merged) object's guid,
/// or `None` where that object's creation degraded remotely.
pub fn create_objects(
    client: &WaapiClient,
    parent: &str,
    names: &[&str],
    types: &[&str],
    strategy: CreateStrategy,
    conflict: NameConflict,
) -> Result<Vec<Option<Guid>>> {
    ensure_connected(client)?;

    if names.len() != types.len() {
        return Err(WaapiError::InvalidArgument(format!(
            "names ({}) and types ({}) must have equal lengths",
            names.len(),
            types.len()
        )));
    }
    if names.is_empty() {
        return Ok(Vec::new());
    }

    match strategy {
        CreateStrategy::Wide => create_wide(client, parent, names, types, conflict),
        CreateStrategy::Deep => create_deep(client, parent, names, types, conflict),
    }
}

fn create_wide(
    client: &WaapiClient,
    parent: &str,
    names: &[&str],
    types: &[&str],
    conflict: NameConflict,
) -> Result<Vec<Option<Guid>>> {
    let mut created = Vec::with_capacity(names.len());

    for (name, ty) in names.iter().zip(types) {
        let args = json!({
            "parent": parent,
            "onNameConflict": conflict,
            "name": name,
            "type": ty,
        });
        match client.call(uri::CORE_OBJECT_CREATE, args) {
            Ok(ret) => created.push(ret.get("id").and_then(|v| v.as_str()).map(Guid::new)),
            Err(e) => {
                debug!(target: "waapi_helpers", "create of {} degraded: {}", name, e);
                created.push(None);
            }
        }
    }

    Ok(created)
}

fn create_deep(
    client: &WaapiClient,
    parent: &str,
    names: &[&str],
    types: &[&str],
    conflict: NameConflict,
) -> Result<Vec<Option<Guid>>> {
    // Build the chain innermost-first: each pair wraps the previous one
    // as its single child.
    let mut chain: Option<WaapiValue> = None;
    for (name, ty) in names.iter().zip(types).rev() {
        let mut node = serde_json::Map::new();
        node.insert("name".to_string(), json!(name));
        node.insert("type".to_string(), json!(ty));
        if let Some(child) = chain.take() {
            node.insert("children".to_string(), json!([child]));
        }
        chain = Some(WaapiValue::Object(node));
    }

    let Some(WaapiValue::Object(mut top)) = chain else {
        return Ok(Vec::new());
    };
    top.insert("parent".to_string(), json!(parent));
    top.insert("onNameConflict".to_string(), json!(conflict));

    match client.call(uri::CORE_OBJECT_CREATE, WaapiValue::Object(top)) {
        Ok(ret) => {
            // The response nests the same way: id, then children[0], ...
            let mut guids = Vec::with_capacity(names.len());
            let mut node = Some(&ret);
            while let Some(n) = node {
                if guids.len() == names.len() {
                    break;
                }
                guids.push(n.get("id").and_then(|v| v.as_str()).map(Guid::new));
                node = n.get("children").and_then(|c| c.get(0));
            }
            while guids.len() < names.len() {
                guids.push(None);
            }
            Ok(guids)
        }
        Err(e) => {
            debug!(target: "waapi_helpers", "deep create under {} degraded: {}", parent, e);
            Ok(vec![None; names.len()])
        }
    }
}

/// Copy an object under a new parent; returns the copy's guid.
pub fn copy_object(
    client: &WaapiClient,
    object: &str,
    new_parent: &str,
    conflict: NameConflict,
) -> Result<Option<Guid>> {
    copy_or_move(client, uri::CORE_OBJECT_COPY, object, new_parent, conflict)
}

/// Move an object under a new parent; returns the moved object's guid.
pub fn move_object(
    client: &WaapiClient,
    object: &str,
    new_parent: &str,
    conflict: NameConflict,
) -> Result<Option<Guid>> {
    copy_or_move(client, uri::CORE_OBJECT_MOVE, object, new_parent, conflict)
}

fn copy_or_move(
    client: &WaapiClient,
    endpoint: &str,
    object: &str,
    new_parent: &str,
    conflict: NameConflict,
) -> Result<Option<Guid>> {
    ensure_connected(client)?;

    let args = json!({
        "object": object,
        "parent": new_parent,
        "onNameConflict": conflict,
    });
    match client.call(endpoint, args) {
        Ok(ret) => Ok(ret.get("id").and_then(|v| v.as_str()).map(Guid::new)),
        Err(e) => {
            debug!(target: "waapi_helpers", "{} of {} degraded: {}", endpoint, object, e);
            Ok(None)
        }
    }
}

/// Delete an object and its subtree. A remote failure is a no-op.
pub fn delete_object(client: &WaapiClient, guid_or_path: &str) -> Result<()> {
    ensure_connected(client)?;

    if let Err(e) = client.call(uri::CORE_OBJECT_DELETE, json!({ "object": guid_or_path })) {
        debug!(target: "waapi_helpers", "delete of {} degraded: {}", guid_or_path, e);
    }
    Ok(())
}
