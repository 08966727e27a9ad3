use std::collections::BTreeMap;

use crate::api_client::{fetch, ApiRequest, Transport};
use crate::errors::AppError;
use crate::models::resources::UsefulLink;

const UNCATEGORIZED: &str = "General";

/// GET /links
pub async fn list_links(transport: &dyn Transport) -> Result<Vec<UsefulLink>, AppError> {
    fetch(transport, ApiRequest::get("/links")).await
}

/// Groups links by category, alphabetically; links without one go under "General".
pub fn group_by_category(links: Vec<UsefulLink>) -> BTreeMap<String, Vec<UsefulLink>> {
    let mut groups: BTreeMap<String, Vec<UsefulLink>> = BTreeMap::new();
    for link in links {
        let category = link
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
            .to_string();
        groups.entry(category).or_default().push(link);
    }
    groups
}
