// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::responses::{
    Envelope, FileDetailsResponse, PlayersResponse, UserFilesResponse, VanityResponse,
};
use crate::config::settings::ApiSettings;
use crate::domain::api::WorkshopApi;
use crate::domain::errors::WorkshopError;
use crate::domain::models::{AccountSummary, CatalogEntry, ItemDetail};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

const RESOLVE_VANITY_PATH: &str = "/ISteamUser/ResolveVanityURL/v1/";
const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v2/";
const USER_FILES_PATH: &str = "/IPublishedFileService/GetUserFiles/v1/";
const FILE_DETAILS_PATH: &str = "/ISteamRemoteStorage/GetPublishedFileDetails/v1/";

/// Default number of entries per listing request.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// reqwest 实现的 REST API 客户端
///
/// The API key travels as a query parameter on GET calls and as a form
/// field on the bulk-detail POST.
pub struct SteamApiClient {
    client: reqwest::Client,
    base_url: String,
    key: String,
    page_size: u32,
}

impl SteamApiClient {
    pub fn new(
        settings: &ApiSettings,
        key: impl Into<String>,
        page_size: u32,
    ) -> Result<Self, WorkshopError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; workshop-ledger/0.1)")
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            key: key.into(),
            page_size,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, WorkshopError> {
        debug!(endpoint = path, "GET");
        let mut query: Vec<(&str, String)> = Vec::with_capacity(params.len() + 1);
        query.push(("key", self.key.clone()));
        query.extend(params.iter().cloned());

        let envelope: Envelope<T> = self
            .client
            .get(self.url(path))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.response)
    }
}

/// Builds the form body of the bulk-detail call: `itemcount`, `key` and one
/// positionally indexed `publishedfileids[N]` per id.
pub fn details_form(key: &str, item_ids: &[String]) -> Vec<(String, String)> {
    let mut form = Vec::with_capacity(item_ids.len() + 2);
    form.push(("itemcount".to_string(), item_ids.len().to_string()));
    form.push(("key".to_string(), key.to_string()));
    for (i, id) in item_ids.iter().enumerate() {
        form.push((format!("publishedfileids[{}]", i), id.clone()));
    }
    form
}

/// Orders `details` like `item_ids`, correlating on `publishedfileid`.
pub fn correlate_details(
    item_ids: &[String],
    details: Vec<ItemDetail>,
) -> Result<Vec<ItemDetail>, WorkshopError> {
    let by_id: HashMap<String, ItemDetail> = details
        .into_iter()
        .map(|d| (d.publishedfileid.clone(), d))
        .collect();

    item_ids
        .iter()
        .map(|id| match by_id.get(id) {
            Some(detail) if detail.found() => Ok(detail.clone()),
            _ => Err(WorkshopError::DetailMissing(id.clone())),
        })
        .collect()
}

#[async_trait]
impl WorkshopApi for SteamApiClient {
    async fn resolve_vanity(&self, vanity: &str) -> Result<String, WorkshopError> {
        let response: VanityResponse = self
            .get_json(RESOLVE_VANITY_PATH, &[("vanityurl", vanity.to_string())])
            .await?;

        match response.steamid {
            Some(id) if response.success == 1 => Ok(id),
            _ => {
                debug!(
                    vanity,
                    message = response.message.as_deref().unwrap_or(""),
                    "Vanity lookup failed"
                );
                Err(WorkshopError::VanityUnresolved(vanity.to_string()))
            }
        }
    }

    async fn fetch_summary(&self, account_id: &str) -> Result<AccountSummary, WorkshopError> {
        let response: PlayersResponse = self
            .get_json(PLAYER_SUMMARIES_PATH, &[("steamids", account_id.to_string())])
            .await?;

        response
            .players
            .into_iter()
            .next()
            .ok_or_else(|| WorkshopError::AccountNotFound(account_id.to_string()))
    }

    async fn fetch_catalog_page(
        &self,
        account_id: &str,
        page: u32,
    ) -> Result<Vec<CatalogEntry>, WorkshopError> {
        let response: UserFilesResponse = self
            .get_json(
                USER_FILES_PATH,
                &[
                    ("steamid", account_id.to_string()),
                    ("numperpage", self.page_size.to_string()),
                    ("page", page.to_string()),
                    ("return_vote_data", "true".to_string()),
                ],
            )
            .await?;

        debug!(
            account_id,
            page,
            entries = response.publishedfiledetails.len(),
            "Fetched catalog page"
        );
        Ok(response.publishedfiledetails)
    }

    async fn fetch_details(&self, item_ids: &[String]) -> Result<Vec<ItemDetail>, WorkshopError> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(endpoint = FILE_DETAILS_PATH, items = item_ids.len(), "POST");
        let envelope: Envelope<FileDetailsResponse> = self
            .client
            .post(self.url(FILE_DETAILS_PATH))
            .form(&details_form(&self.key, item_ids))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        correlate_details(item_ids, envelope.response.publishedfiledetails)
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}
