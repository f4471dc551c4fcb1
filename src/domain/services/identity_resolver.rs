// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::api::WorkshopApi;
use crate::domain::errors::WorkshopError;
use crate::domain::models::AccountRef;
use tracing::debug;

/// Index of the id (or vanity name) when a profile URL is split on `/`:
/// `https:` `""` `host` `profiles|id` `<value>`.
const VALUE_SEGMENT: usize = 4;

/// How a profile URL names its account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileUrl<'a> {
    /// `.../profiles/<id>/...`
    Numeric(&'a str),
    /// `.../id/<vanity>/...`
    Vanity(&'a str),
}

/// Classifies a profile URL without touching the network.
///
/// The value is always the fifth `/`-separated segment, so the URL is
/// assumed to be `scheme://host/<kind>/<value>/...`.
pub fn classify_url(url: &str) -> Result<ProfileUrl<'_>, WorkshopError> {
    let segments: Vec<&str> = url.split('/').collect();
    let value = segments
        .get(VALUE_SEGMENT)
        .copied()
        .filter(|v| !v.is_empty());

    match value {
        Some(value) if segments.contains(&"profiles") => Ok(ProfileUrl::Numeric(value)),
        Some(value) if segments.contains(&"id") => Ok(ProfileUrl::Vanity(value)),
        _ => Err(WorkshopError::UnrecognizedReference(url.to_string())),
    }
}

/// Turns an account reference into a canonical account id.
///
/// Ids pass through unchanged and `profiles` URLs are decoded locally; only
/// `id` (vanity) URLs cost one remote lookup. Lookup failures propagate.
pub async fn resolve(
    reference: &AccountRef,
    api: &dyn WorkshopApi,
) -> Result<String, WorkshopError> {
    match reference {
        AccountRef::Id(id) => Ok(id.clone()),
        AccountRef::Url(url) => match classify_url(url)? {
            ProfileUrl::Numeric(id) => Ok(id.to_string()),
            ProfileUrl::Vanity(vanity) => {
                debug!(vanity, "Resolving vanity profile name");
                api.resolve_vanity(vanity).await
            }
        },
    }
}
