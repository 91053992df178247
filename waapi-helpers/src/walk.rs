//! Lazy depth-first walk over the remote object hierarchy.

use log::debug;
use serde_json::json;

use waapi_client::{uri, Result, WaapiClient, WaapiError};
use waapi_types::{Guid, ObjectRef, WaapiValue};

/// Walk every descendant of one or more start objects, yielding the
/// requested properties of each as a positionally aligned row of
/// optional values.
///
/// One children fetch is issued per visited node; `id` and `type` are
/// added to the fetch implicitly when absent so traversal and filtering
/// can proceed. An empty `types` slice disables type filtering. Sibling
/// order is whatever the remote end returns and must not be relied on.
/// The start objects themselves are not yielded.
///
/// Errors immediately on a disconnected client or empty `starts`; a
/// remote failure mid-walk silently ends that branch.
pub fn walk_project<'a>(
    client: &'a WaapiClient,
    starts: &[&str],
    properties: &[&str],
    types: &[&str],
) -> Result<Walk<'a>> {
    if !client.is_connected() {
        return Err(WaapiError::Disconnected);
    }
    if starts.is_empty() {
        return Err(WaapiError::InvalidArgument(
            "walk_project needs at least one start object".to_string(),
        ));
    }

    let ret_props: Vec<String> = if properties.is_empty() {
        vec!["id".to_string()]
    } else {
        properties.iter().map(|p| p.to_string()).collect()
    };

    let mut fetch_props = ret_props.clone();
    for implied in ["id", "type"] {
        if !fetch_props.iter().any(|p| p == implied) {
            fetch_props.push(implied.to_string());
        }
    }

    // Popped back to front, so reverse to keep the caller's order.
    let mut roots: Vec<ObjectRef> = starts.iter().map(|s| ObjectRef::parse(s)).collect();
    roots.reverse();

    Ok(Walk {
        client,
        ret_props,
        fetch_props,
        types: types.iter().map(|t| t.to_string()).collect(),
        roots,
        frames: Vec::new(),
    })
}

/// Iterator state: a stack of sibling lists, one frame per level of the
/// tree currently being descended.
pub struct Walk<'a> {
    client: &'a WaapiClient,
    ret_props: Vec<String>,
    fetch_props: Vec<String>,
    types: Vec<String>,
    roots: Vec<ObjectRef>,
    frames: Vec<std::vec::IntoIter<WaapiValue>>,
}

impl Walk<'_> {
    fn fetch_children(&self, target: &ObjectRef) -> Vec<WaapiValue> {
        let query = json!({
            "from": { (target.from_key()): [target.as_str()] },
            "transform": [{ "select": ["children"] }],
        });

        match self.client.call_with_options(
            uri::CORE_OBJECT_GET,
            query,
            json!({ "return": self.fetch_props }),
        ) {
            Ok(ret) => match ret.get("return") {
                Some(WaapiValue::Array(children)) => children.clone(),
                _ => Vec::new(),
            },
            Err(e) => {
                debug!(target: "waapi_helpers", "walk fetch under {} degraded: {}", target, e);
                Vec::new()
            }
        }
    }

    fn matches(&self, obj: &WaapiValue) -> bool {
        if self.types.is_empty() {
            return true;
        }
        obj.get("type")
            .and_then(|t| t.as_str())
            .is_some_and(|t| self.types.iter().any(|wanted| wanted == t))
    }

    fn row_of(&self, obj: &WaapiValue) -> Vec<Option<WaapiValue>> {
        self.ret_props
            .iter()
            .map(|p| obj.get(p).cloned().filter(|v| !v.is_null()))
            .collect()
    }
}

impl Iterator for Walk<'_> {
    type Item = Vec<Option<WaapiValue>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next_obj = if let Some(frame) = self.frames.last_mut() {
                frame.next()
            } else {
                // Current start exhausted; open the next one.
                let root = self.roots.pop()?;
                let children = self.fetch_children(&root);
                self.frames.push(children.into_iter());
                continue;
            };

            match next_obj {
                Some(obj) => {
                    let row = self.matches(&obj).then(|| self.row_of(&obj));

                    // Descend before the next sibling (pre-order).
                    if let Some(id) = obj.get("id").and_then(|v| v.as_str()) {
                        let child_ref = ObjectRef::Guid(Guid::new(id));
                        let children = self.fetch_children(&child_ref);
                        self.frames.push(children.into_iter());
                    }

                    if let Some(row) = row {
                        return Some(row);
                    }
                }
                None => {
                    self.frames.pop();
                }
            }
        }
    }
}
