//! Sound-bank creation and inclusion management.

use log::debug;
use serde_json::json;

use waapi_client::{uri, Result, WaapiClient, WaapiError};
use waapi_types::{Guid, InclusionFilter, InclusionOperation, NameConflict, WaapiValue};

use crate::ensure_connected;
use crate::objects::{create_objects, CreateStrategy};

/// Create a sound bank with the default knobs: replace any existing
/// inclusion list, include events/structures/media, merge on name
/// conflict.
pub fn create_bank(
    client: &WaapiClient,
    parent: &str,
    bank_name: &str,
    inclusions: &[Guid],
) -> Result<Option<Guid>> {
    create_bank_with_options(
        client,
        parent,
        bank_name,
        inclusions,
        InclusionOperation::Replace,
        &InclusionFilter::all(),
        NameConflict::Merge,
    )
}

/// Create a sound bank and set its inclusions in one go. At least one
/// inclusion is required. Returns `None` if bank creation degraded.
pub fn create_bank_with_options(
    client: &WaapiClient,
    parent: &str,
    bank_name: &str,
    inclusions: &[Guid],
    operation: InclusionOperation,
    filter: &[InclusionFilter],
    conflict: NameConflict,
) -> Result<Option<Guid>> {
    if inclusions.is_empty() {
        return Err(WaapiError::InvalidArgument(
            "a sound bank needs at least one inclusion".to_string(),
        ));
    }

    let created = create_objects(
        client,
        parent,
        &[bank_name],
        &["SoundBank"],
        CreateStrategy::Wide,
        conflict,
    )?;
    let Some(Some(bank)) = created.into_iter().next() else {
        return Ok(None);
    };

    set_bank_inclusions(client, &bank, inclusions, operation, filter)?;
    Ok(Some(bank))
}

/// Guids of the objects a bank currently includes. A remote failure
/// degrades to an empty list.
pub fn get_bank_inclusions(client: &WaapiClient, bank: &Guid) -> Result<Vec<Guid>> {
    ensure_connected(client)?;

    match client.call(
        uri::CORE_SOUNDBANK_GET_INCLUSIONS,
        json!({ "soundbank": bank.as_str() }),
    ) {
        Ok(ret) => Ok(ret
            .get("inclusions")
            .and_then(|i| i.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|incl| incl.get("object").and_then(|o| o.as_str()).map(Guid::new))
                    .collect()
            })
            .unwrap_or_default()),
        Err(e) => {
            debug!(target: "waapi_helpers", "getInclusions for {} degraded: {}", bank, e);
            Ok(Vec::new())
        }
    }
}

/// Apply an inclusion operation to a bank; every included object carries
/// the same filter.
pub fn set_bank_inclusions(
    client: &WaapiClient,
    bank: &Guid,
    inclusions: &[Guid],
    operation: InclusionOperation,
    filter: &[InclusionFilter],
) -> Result<()> {
    ensure_connected(client)?;

    let entries: Vec<WaapiValue> = inclusions
        .iter()
        .map(|guid| json!({ "object": guid, "filter": filter }))
        .collect();

    if let Err(e) = client.call(
        uri::CORE_SOUNDBANK_SET_INCLUSIONS,
        json!({
            "operation": operation,
            "soundbank": bank.as_str(),
            "inclusions": entries,
        }),
    ) {
        debug!(target: "waapi_helpers", "setInclusions for {} degraded: {}", bank, e);
    }
    Ok(())
}
