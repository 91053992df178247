//! Importing audio files into the project.

use std::path::Path;

use log::debug;
use serde_json::json;

use waapi_client::{uri, Result, WaapiClient};
use waapi_types::{Guid, ImportOperation, WaapiValue};

use crate::ensure_connected;

/// Knobs for an audio import batch.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub operation: ImportOperation,
    /// Subfolder under the originals directory to copy sources into.
    pub originals_subfolder: String,
    /// Import as voice objects instead of sound objects.
    pub is_voice: bool,
}

/// Import wav files under a parent with default options (use existing
/// objects, no subfolder, sound objects).
pub fn import_audio(client: &WaapiClient, parent: &Guid, wav_files: &[&str]) -> Result<()> {
    import_audio_with_options(client, parent, wav_files, &ImportOptions::default())
}

/// Import a batch of wav files in a single call. Each file becomes an
/// object named after the file stem; a remote failure is a no-op.
pub fn import_audio_with_options(
    client: &WaapiClient,
    parent: &Guid,
    wav_files: &[&str],
    options: &ImportOptions,
) -> Result<()> {
    ensure_connected(client)?;

    let tag = if options.is_voice { "<Voice>" } else { "<Sound>" };
    let imports: Vec<WaapiValue> = wav_files
        .iter()
        .map(|wav| {
            let stem = Path::new(wav)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("");
            json!({
                "audioFile": wav,
                "objectPath": format!("{}{}", tag, stem),
            })
        })
        .collect();

    let args = json!({
        "default": {
            "importOperation": options.operation,
            "importLocation": parent,
            "originalsSubFolder": options.originals_subfolder,
            "imports": imports,
        }
    });

    if let Err(e) = client.call(uri::CORE_AUDIO_IMPORT, args) {
        debug!(target: "waapi_helpers", "audio import under {} degraded: {}", parent, e);
    }
    Ok(())
}
