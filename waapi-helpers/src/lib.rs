//! Convenience functions for remote-controlling the authoring
//! application: object lookup by path or guid, hierarchy walks, object
//! creation/copy/move/delete, sound-bank inclusions, audio import, and
//! undo grouping.
//!
//! Every helper is a thin, stateless pass-through over a connected
//! [`WaapiClient`]. Failure contract: helpers return `Err` only for
//! immediate precondition violations (disconnected client, mismatched
//! argument lengths); a remote failure or an unexpectedly shaped response
//! degrades to an absent value (`None`, an empty vec, or a no-op), which
//! callers must check explicitly.

pub mod audio;
pub mod banks;
pub mod objects;
pub mod query;
pub mod undo;
pub mod walk;

pub use audio::{import_audio, import_audio_with_options, ImportOptions};
pub use banks::{
    create_bank, create_bank_with_options, get_bank_inclusions, set_bank_inclusions,
};
pub use objects::{copy_object, create_objects, delete_object, move_object, CreateStrategy};
pub use query::{
    copy_properties, get_bus_guid_from_name, get_guid_of_path, get_name_of_guid,
    get_name_of_path, get_object, get_parent_guid, get_path_of_guid, get_property_names,
    get_property_value, set_property_value,
};
pub use undo::{
    begin_undo_group, cancel_undo_group, end_undo_group, execute_ui_command, perform_undo,
    UndoGroup,
};
pub use walk::{walk_project, Walk};

pub use waapi_client::{
    set_log_level, suppress_logs, Config, Result, ServerInfo, WaapiClient, WaapiError,
};
pub use waapi_types::{
    Guid, ImportOperation, InclusionFilter, InclusionOperation, NameConflict, ObjectRef,
    WaapiValue,
};

pub(crate) fn ensure_connected(client: &WaapiClient) -> Result<()> {
    if client.is_connected() {
        Ok(())
    } else {
        Err(WaapiError::Disconnected)
    }
}
