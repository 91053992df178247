//! Single-object lookups and property access.

use std::collections::HashSet;

use log::debug;
use serde_json::json;

use waapi_client::{uri, Result, WaapiClient};
use waapi_types::{Guid, ObjectRef, WaapiValue};

use crate::ensure_connected;
use crate::walk::walk_project;

/// Fetch the requested properties of one object, addressed by guid or
/// path.
///
/// The result is positionally aligned with `properties`; a property the
/// object does not carry, or any remote failure, shows up as `None` in
/// its slot. An empty `properties` slice defaults to `["id"]`.
pub fn get_object(
    client: &WaapiClient,
    guid_or_path: &str,
    properties: &[&str],
) -> Result<Vec<Option<WaapiValue>>> {
    ensure_connected(client)?;

    let props: Vec<&str> = if properties.is_empty() {
        vec!["id"]
    } else {
        properties.to_vec()
    };

    let target = ObjectRef::parse(guid_or_path);
    let query = json!({ "from": { (target.from_key()): [target.as_str()] } });

    match client.call_with_options(uri::CORE_OBJECT_GET, query, json!({ "return": props })) {
        Ok(ret) => {
            if let Some(obj) = ret.get("return").and_then(|r| r.get(0)) {
                Ok(props
                    .iter()
                    .map(|p| obj.get(*p).cloned().filter(|v| !v.is_null()))
                    .collect())
            } else {
                Ok(vec![None; props.len()])
            }
        }
        Err(e) => {
            debug!(target: "waapi_helpers", "object.get for {} degraded: {}", guid_or_path, e);
            Ok(vec![None; props.len()])
        }
    }
}

pub fn get_name_of_guid(client: &WaapiClient, guid: &Guid) -> Result<Option<String>> {
    Ok(fetch_one(client, guid.as_str(), "name")?.and_then(into_string))
}

pub fn get_path_of_guid(client: &WaapiClient, guid: &Guid) -> Result<Option<String>> {
    Ok(fetch_one(client, guid.as_str(), "path")?.and_then(into_string))
}

pub fn get_guid_of_path(client: &WaapiClient, path: &str) -> Result<Option<Guid>> {
    Ok(fetch_one(client, path, "id")?
        .and_then(into_string)
        .map(Guid::new))
}

pub fn get_name_of_path(client: &WaapiClient, path: &str) -> Result<Option<String>> {
    Ok(fetch_one(client, path, "name")?.and_then(into_string))
}

/// Look up the parent of an object via a `select: ["parent"]` transform.
pub fn get_parent_guid(client: &WaapiClient, guid: &Guid) -> Result<Option<Guid>> {
    ensure_connected(client)?;

    let query = json!({
        "from": { "id": [guid.as_str()] },
        "transform": [{ "select": ["parent"] }],
    });

    match client.call_with_options(uri::CORE_OBJECT_GET, query, json!({ "return": ["id"] })) {
        Ok(ret) => Ok(ret
            .get("return")
            .and_then(|r| r.get(0))
            .and_then(|obj| obj.get("id"))
            .and_then(|v| v.as_str())
            .map(Guid::new)),
        Err(e) => {
            debug!(target: "waapi_helpers", "parent lookup for {} degraded: {}", guid, e);
            Ok(None)
        }
    }
}

/// Names of all properties and references an object carries. A remote
/// failure degrades to an empty list.
pub fn get_property_names(client: &WaapiClient, guid: &Guid) -> Result<Vec<String>> {
    ensure_connected(client)?;

    match client.call(
        uri::CORE_OBJECT_GET_PROP_AND_REF_NAMES,
        json!({ "object": guid.as_str() }),
    ) {
        Ok(ret) => Ok(ret
            .get("return")
            .and_then(|r| r.as_array())
            .map(|names| {
                names
                    .iter()
                    .filter_map(|n| n.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()),
        Err(e) => {
            debug!(target: "waapi_helpers", "property names for {} degraded: {}", guid, e);
            Ok(Vec::new())
        }
    }
}

pub fn get_property_value(
    client: &WaapiClient,
    guid: &Guid,
    property: &str,
) -> Result<Option<WaapiValue>> {
    fetch_one(client, guid.as_str(), property)
}

/// Set one property. A null value is a silent no-op.
pub fn set_property_value(
    client: &WaapiClient,
    guid: &Guid,
    property: &str,
    value: WaapiValue,
) -> Result<()> {
    ensure_connected(client)?;

    if value.is_null() {
        return Ok(());
    }

    if let Err(e) = client.call(
        uri::CORE_OBJECT_SET_PROPERTY,
        json!({ "object": guid.as_str(), "property": property, "value": value }),
    ) {
        debug!(target: "waapi_helpers", "setProperty {} on {} degraded: {}", property, guid, e);
    }
    Ok(())
}

/// Find a bus by name under the master-mixer hierarchy.
pub fn get_bus_guid_from_name(client: &WaapiClient, bus_name: &str) -> Result<Option<Guid>> {
    for row in walk_project(
        client,
        &["\\Master-Mixer Hierarchy"],
        &["id", "name"],
        &["Bus"],
    )? {
        let mut fields = row.into_iter();
        let guid = fields.next().flatten();
        let name = fields.next().flatten();
        if name.as_ref().and_then(|n| n.as_str()) == Some(bus_name) {
            return Ok(guid.and_then(|v| v.as_str().map(Guid::new)));
        }
    }
    Ok(None)
}

/// Copy every scalar property both objects carry from one to the other.
/// Reference-shaped values (maps) are skipped.
pub fn copy_properties(client: &WaapiClient, from: &Guid, to: &Guid) -> Result<()> {
    ensure_connected(client)?;

    let src: HashSet<String> = get_property_names(client, from)?.into_iter().collect();
    let dst: HashSet<String> = get_property_names(client, to)?.into_iter().collect();

    for prop in src.intersection(&dst) {
        if let Some(value) = get_property_value(client, from, prop)? {
            if !value.is_object() {
                set_property_value(client, to, prop, value)?;
            }
        }
    }
    Ok(())
}

fn fetch_one(
    client: &WaapiClient,
    guid_or_path: &str,
    property: &str,
) -> Result<Option<WaapiValue>> {
    Ok(get_object(client, guid_or_path, &[property])?
        .into_iter()
        .next()
        .flatten())
}

fn into_string(v: WaapiValue) -> Option<String> {
    match v {
        WaapiValue::String(s) => Some(s),
        _ => None,
    }
}
