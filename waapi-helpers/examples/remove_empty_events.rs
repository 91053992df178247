//! Delete every event that has no actions under it.

use waapi_helpers::*;

fn main() -> Result<()> {
    env_logger::init();

    let client = WaapiClient::connect_default()?;

    // Deleting objects mid-walk makes later child fetches fail on
    // purpose; keep the log quiet for the duration.
    let old_level = suppress_logs();

    let events: Vec<Guid> = walk_project(&client, &["\\Events"], &["id"], &["Event"])?
        .filter_map(|row| row.into_iter().next().flatten())
        .filter_map(|v| v.as_str().map(Guid::new))
        .collect();

    for event in events {
        let has_children =
            walk_project(&client, &[event.as_str()], &[], &[])?.any(|row| row[0].is_some());
        if !has_children {
            delete_object(&client, event.as_str())?;
        }
    }

    set_log_level(old_level);
    client.disconnect()
}
