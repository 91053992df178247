//! Undo grouping and generic UI command execution.

use log::{debug, warn};
use serde_json::json;

use waapi_client::{uri, Result, WaapiClient};
use waapi_types::WaapiValue;

use crate::ensure_connected;

/// Open an undo group. Operations until the matching end/cancel revert
/// as a unit.
pub fn begin_undo_group(client: &WaapiClient) -> Result<()> {
    fire(client, uri::CORE_UNDO_BEGIN_GROUP, WaapiValue::Null)
}

/// Close the current undo group under the given display name.
pub fn end_undo_group(client: &WaapiClient, display_name: &str) -> Result<()> {
    fire(
        client,
        uri::CORE_UNDO_END_GROUP,
        json!({ "displayName": display_name }),
    )
}

/// Abandon the current undo group, reverting everything inside it.
pub fn cancel_undo_group(client: &WaapiClient) -> Result<()> {
    fire(client, uri::CORE_UNDO_CANCEL_GROUP, WaapiValue::Null)
}

/// Revert the most recent undoable operation.
pub fn perform_undo(client: &WaapiClient) -> Result<()> {
    execute_ui_command(client, "Undo")
}

/// Execute a named UI command in the authoring application.
pub fn execute_ui_command(client: &WaapiClient, command: &str) -> Result<()> {
    fire(
        client,
        uri::UI_COMMANDS_EXECUTE,
        json!({ "command": command }),
    )
}

fn fire(client: &WaapiClient, endpoint: &str, args: WaapiValue) -> Result<()> {
    ensure_connected(client)?;

    if let Err(e) = client.call(endpoint, args) {
        debug!(target: "waapi_helpers", "{} degraded: {}", endpoint, e);
    }
    Ok(())
}

/// Scoped undo group: commit it with a display name, or let it drop to
/// cancel everything done inside it.
#[must_use = "an uncommitted UndoGroup cancels on drop"]
pub struct UndoGroup<'a> {
    client: &'a WaapiClient,
    open: bool,
}

impl<'a> UndoGroup<'a> {
    pub fn begin(client: &'a WaapiClient) -> Result<Self> {
        begin_undo_group(client)?;
        Ok(Self {
            client,
            open: true,
        })
    }

    /// Close the group so its operations revert as one named unit.
    pub fn commit(mut self, display_name: &str) -> Result<()> {
        self.open = false;
        end_undo_group(self.client, display_name)
    }

    /// Explicitly revert everything done inside the group.
    pub fn cancel(mut self) -> Result<()> {
        self.open = false;
        cancel_undo_group(self.client)
    }
}

impl Drop for UndoGroup<'_> {
    fn drop(&mut self) {
        if self.open {
            if let Err(e) = cancel_undo_group(self.client) {
                warn!(target: "waapi_helpers", "failed to cancel undo group: {}", e);
            }
        }
    }
}
