//! Fixed endpoint URIs of the authoring application's remote API.

pub const CORE_GET_INFO: &str = "ak.wwise.core.getInfo";

pub const CORE_OBJECT_GET: &str = "ak.wwise.core.object.get";
pub const CORE_OBJECT_GET_PROP_AND_REF_NAMES: &str =
    "ak.wwise.core.object.getPropertyAndReferenceNames";
pub const CORE_OBJECT_CREATE: &str = "ak.wwise.core.object.create";
pub const CORE_OBJECT_COPY: &str = "ak.wwise.core.object.copy";
pub const CORE_OBJECT_MOVE: &str = "ak.wwise.core.object.move";
pub const CORE_OBJECT_DELETE: &str = "ak.wwise.core.object.delete";
pub const CORE_OBJECT_SET_PROPERTY: &str = "ak.wwise.core.object.setProperty";

pub const CORE_SOUNDBANK_GET_INCLUSIONS: &str = "ak.wwise.core.soundbank.getInclusions";
pub const CORE_SOUNDBANK_SET_INCLUSIONS: &str = "ak.wwise.core.soundbank.setInclusions";

pub const CORE_AUDIO_IMPORT: &str = "ak.wwise.core.audio.import";

pub const CORE_UNDO_BEGIN_GROUP: &str = "ak.wwise.core.undo.beginGroup";
pub const CORE_UNDO_END_GROUP: &str = "ak.wwise.core.undo.endGroup";
pub const CORE_UNDO_CANCEL_GROUP: &str = "ak.wwise.core.undo.cancelGroup";

pub const UI_COMMANDS_EXECUTE: &str = "ak.wwise.ui.commands.execute";
