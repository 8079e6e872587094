use anyhow::{Context, Result};
use shuls_core::{AddressSearchGateway, PlaceId, SearchSession};

use super::{AppContext, describe_candidate};

pub async fn run(context: &AppContext, place_id: &str) -> Result<()> {
    let place_id = PlaceId::new(place_id);
    let candidate = context
        .gateway()
        .fetch_details(&place_id, &SearchSession::new())
        .await
        .with_context(|| format!("Details lookup for '{}' failed", place_id))?;

    if context.json {
        println!("{}", serde_json::to_string_pretty(&candidate)?);
    } else {
        println!("{}", describe_candidate(0, &candidate));
    }
    Ok(())
}
