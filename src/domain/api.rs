// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::WorkshopError;
use crate::domain::models::{AccountSummary, CatalogEntry, ItemDetail};
use async_trait::async_trait;

/// The remote REST API, one method per consumed endpoint.
///
/// All methods are plain request/response adapters: no retries, no caching.
#[async_trait]
pub trait WorkshopApi: Send + Sync {
    /// Resolves a vanity profile name to a canonical account id.
    async fn resolve_vanity(&self, vanity: &str) -> Result<String, WorkshopError>;

    /// Fetches the public profile of one account. Fails with
    /// [`WorkshopError::AccountNotFound`] on an empty player list.
    async fn fetch_summary(&self, account_id: &str) -> Result<AccountSummary, WorkshopError>;

    /// Fetches one page (1-based) of the account's published items, vote
    /// data included.
    async fn fetch_catalog_page(
        &self,
        account_id: &str,
        page: u32,
    ) -> Result<Vec<CatalogEntry>, WorkshopError>;

    /// Fetches bulk details for `item_ids` in one call. The result is in
    /// input order, one record per id.
    async fn fetch_details(&self, item_ids: &[String]) -> Result<Vec<ItemDetail>, WorkshopError>;

    /// Number of entries requested per catalog page.
    fn page_size(&self) -> u32;

    /// The account's published items, capped at one page.
    ///
    /// Accounts with more than [`page_size`](Self::page_size) items are
    /// silently truncated; this is the documented limit of the listing
    /// call, not an error.
    async fn fetch_catalog(&self, account_id: &str) -> Result<Vec<CatalogEntry>, WorkshopError> {
        self.fetch_catalog_page(account_id, 1).await
    }

    /// Every published item, requesting pages until a short page arrives.
    async fn fetch_catalog_all(
        &self,
        account_id: &str,
    ) -> Result<Vec<CatalogEntry>, WorkshopError> {
        let page_size = self.page_size().max(1) as usize;
        let mut entries = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.fetch_catalog_page(account_id, page).await?;
            let short = batch.len() < page_size;
            entries.extend(batch);
            if short {
                break;
            }
            page += 1;
        }
        Ok(entries)
    }
}
