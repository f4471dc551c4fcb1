// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Envelopes of the consumed endpoints. Every body wraps its payload in a
//! top-level `response` object.

use crate::domain::models::{AccountSummary, CatalogEntry, ItemDetail};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub response: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VanityResponse {
    #[serde(default)]
    pub success: i32,
    #[serde(default)]
    pub steamid: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayersResponse {
    #[serde(default)]
    pub players: Vec<AccountSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserFilesResponse {
    #[serde(default)]
    pub publishedfiledetails: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileDetailsResponse {
    #[serde(default)]
    pub publishedfiledetails: Vec<ItemDetail>,
}
