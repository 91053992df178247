//! Delete event actions whose target object no longer exists.

use waapi_helpers::*;

fn main() -> Result<()> {
    env_logger::init();

    let client = WaapiClient::connect_default()?;

    let actions: Vec<(Guid, Option<Guid>)> =
        walk_project(&client, &["\\Events"], &["id", "@Target"], &["Action"])?
            .filter_map(|row| {
                let mut fields = row.into_iter();
                let action = fields.next().flatten()?.as_str().map(Guid::new)?;
                let target = fields
                    .next()
                    .flatten()
                    .and_then(|t| t.get("id").and_then(|v| v.as_str()).map(Guid::new));
                Some((action, target))
            })
            .collect();

    for (action, target) in actions {
        let target_exists = match target {
            Some(t) => get_object(&client, t.as_str(), &[])?
                .into_iter()
                .next()
                .flatten()
                .is_some(),
            None => false,
        };
        if !target_exists {
            delete_object(&client, action.as_str())?;
        }
    }

    client.disconnect()
}
