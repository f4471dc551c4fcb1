// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::api::WorkshopApi;
use crate::domain::errors::WorkshopError;
use crate::domain::models::{AccountRef, CatalogEntry, ItemDetail, ItemRecord, PageFacts, VoteTally};
use crate::domain::services::identity_resolver;
use crate::domain::services::page_scraper::PageScraper;
use crate::engines::traits::{RenderSession, Renderer, SessionGuard};
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use tracing::{debug, info};

/// 聚合器
///
/// Builds canonical item records from the REST API and the rendered item
/// pages. Each call owns its rendering session exclusively; items are
/// scraped one at a time.
#[derive(Clone)]
pub struct Aggregator {
    api: Arc<dyn WorkshopApi>,
    renderer: Arc<dyn Renderer>,
    community_base_url: String,
    paginate: bool,
}

impl Aggregator {
    pub fn new(
        api: Arc<dyn WorkshopApi>,
        renderer: Arc<dyn Renderer>,
        community_base_url: impl Into<String>,
    ) -> Self {
        Self {
            api,
            renderer,
            community_base_url: community_base_url.into(),
            paginate: false,
        }
    }

    /// Lists complete catalogs instead of the single capped page.
    pub fn with_pagination(mut self, paginate: bool) -> Self {
        self.paginate = paginate;
        self
    }

    fn scraper(&self) -> PageScraper<'_> {
        PageScraper::new(self.api.as_ref(), &self.community_base_url)
    }

    async fn catalog(&self, account_id: &str) -> Result<Vec<CatalogEntry>, WorkshopError> {
        if self.paginate {
            self.api.fetch_catalog_all(account_id).await
        } else {
            self.api.fetch_catalog(account_id).await
        }
    }

    /// Aggregates a single item.
    ///
    /// The vote tally comes from the primary contributor's own catalog
    /// listing, fetched after the rendering session is closed. Bulk-detail
    /// vote figures, if any, are ignored.
    pub async fn get_item(&self, item_id: &str) -> Result<ItemRecord, WorkshopError> {
        info!(item_id, "Aggregating item");
        let mut guard = SessionGuard::new(self.renderer.open_session().await?);
        let gathered = self.gather(item_id, guard.session()).await;
        guard.close().await;
        let (detail, facts) = gathered?;

        let owner = facts
            .primary_contributor()
            .map(|c| c.steamid.clone())
            .ok_or_else(|| WorkshopError::NoContributors(item_id.to_string()))?;
        let vote_data = self.vote_tally(item_id, &owner).await?;

        Ok(ItemRecord::assemble(detail, facts, vote_data))
    }

    async fn gather(
        &self,
        item_id: &str,
        session: &mut dyn RenderSession,
    ) -> Result<(ItemDetail, PageFacts), WorkshopError> {
        let detail = self
            .api
            .fetch_details(&[item_id.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WorkshopError::DetailMissing(item_id.to_string()))?;
        let facts = self.scraper().scrape(item_id, session).await?;
        Ok((detail, facts))
    }

    async fn vote_tally(
        &self,
        item_id: &str,
        account_id: &str,
    ) -> Result<VoteTally, WorkshopError> {
        debug!(item_id, account_id, "Looking up vote tally in owner catalog");
        self.catalog(account_id)
            .await?
            .into_iter()
            .find(|entry| same_item(&entry.publishedfileid, item_id))
            .map(|entry| entry.vote_data)
            .ok_or_else(|| WorkshopError::CatalogLookupMiss {
                item_id: item_id.to_string(),
                account_id: account_id.to_string(),
            })
    }

    /// Lazily aggregates every item published by `account`, in catalog
    /// order.
    ///
    /// Nothing happens until the stream is first polled. One rendering
    /// session is opened after the catalog and details are fetched and is
    /// closed when the stream ends, when it fails, or (in the background)
    /// when the consumer drops it early. The stream ends after its first
    /// error and cannot be restarted.
    pub fn get_items(
        &self,
        account: AccountRef,
    ) -> BoxStream<'static, Result<ItemRecord, WorkshopError>> {
        let aggregator = self.clone();
        stream::try_unfold(Feed::Pending(account), move |state| {
            let aggregator = aggregator.clone();
            async move { aggregator.advance(state).await }
        })
        .boxed()
    }

    async fn advance(&self, state: Feed) -> Result<Option<(ItemRecord, Feed)>, WorkshopError> {
        let (mut session, mut items) = match state {
            Feed::Pending(account) => self.start_feed(account).await?,
            Feed::Running { session, items } => (session, items),
        };

        let Some((entry, detail)) = items.next() else {
            session.close().await;
            info!("Finished aggregating catalog");
            return Ok(None);
        };

        match self.scraper().scrape(&entry.publishedfileid, session.session()).await {
            Ok(facts) => {
                let record = ItemRecord::assemble(detail, facts, entry.vote_data);
                Ok(Some((record, Feed::Running { session, items })))
            }
            Err(e) => {
                session.close().await;
                Err(e)
            }
        }
    }

    async fn start_feed(
        &self,
        account: AccountRef,
    ) -> Result<(SessionGuard, std::vec::IntoIter<(CatalogEntry, ItemDetail)>), WorkshopError> {
        let account_id = identity_resolver::resolve(&account, self.api.as_ref()).await?;
        let catalog = self.catalog(&account_id).await?;
        info!(account_id = %account_id, items = catalog.len(), "Aggregating catalog");

        let ids: Vec<String> = catalog.iter().map(|e| e.publishedfileid.clone()).collect();
        let details = self.api.fetch_details(&ids).await?;
        let items: Vec<_> = catalog.into_iter().zip(details).collect();

        let session = SessionGuard::new(self.renderer.open_session().await?);
        Ok((session, items.into_iter()))
    }
}

/// State carried between polls of the `get_items` stream.
enum Feed {
    Pending(AccountRef),
    Running {
        session: SessionGuard,
        items: std::vec::IntoIter<(CatalogEntry, ItemDetail)>,
    },
}

/// Item ids compare numerically when both parse, textually otherwise.
fn same_item(a: &str, b: &str) -> bool {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => a == b,
    }
}
