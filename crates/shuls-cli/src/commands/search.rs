use anyhow::{Context, Result};
use shuls_core::{AddressSearchGateway, SearchSession};

use super::{AppContext, describe_candidate};

pub async fn run(context: &AppContext, query: &str) -> Result<()> {
    let session = SearchSession::new();
    let candidates = context
        .gateway()
        .search(query, &session)
        .await
        .with_context(|| format!("Search for '{}' failed", query))?;

    if context.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }
    for (index, candidate) in candidates.iter().enumerate() {
        println!("{}", describe_candidate(index, candidate));
    }
    Ok(())
}
