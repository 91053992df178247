//! Zero out bus and actor-mixer volume faders, skipping objects whose
//! notes contain the `@wh_ignore` marker.

use serde_json::json;
use waapi_helpers::*;

fn reset(
    client: &WaapiClient,
    start: &str,
    types: &[&str],
    volume_property: &str,
) -> Result<()> {
    let rows: Vec<(Guid, String)> =
        walk_project(client, &[start], &["id", "Notes"], types)?
            .filter_map(|row| {
                let mut fields = row.into_iter();
                let guid = fields.next().flatten()?.as_str().map(Guid::new)?;
                let notes = fields
                    .next()
                    .flatten()
                    .and_then(|n| n.as_str().map(str::to_string))
                    .unwrap_or_default();
                Some((guid, notes))
            })
            .collect();

    for (guid, notes) in rows {
        if !notes.contains("@wh_ignore") {
            set_property_value(client, &guid, volume_property, json!(0.0))?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let client = WaapiClient::connect_default()?;

    reset(
        &client,
        "\\Master-Mixer Hierarchy",
        &["Bus", "AuxBus"],
        "BusVolume",
    )?;
    reset(
        &client,
        "\\Actor-Mixer Hierarchy",
        &["ActorMixer"],
        "Volume",
    )?;

    client.disconnect()
}
