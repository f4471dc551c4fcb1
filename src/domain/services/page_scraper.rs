// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::api::WorkshopApi;
use crate::domain::errors::WorkshopError;
use crate::domain::models::{AccountRef, AccountSummary, PageFacts};
use crate::domain::services::identity_resolver;
use crate::engines::traits::RenderSession;
use crate::utils::text::{first_space_token, parse_leading_int};
use futures::future::try_join_all;
use tracing::debug;
use url::Url;

/// Comment and other tab counters; the comment count is the second one.
pub const TAB_COUNT_SELECTOR: &str = ".tabCount";
/// "N Change Notes" stat block.
pub const CHANGE_NOTES_SELECTOR: &str = ".detailsStatNumChangeNotes";
/// Overlay link of each contributor block; `href` is the profile URL.
pub const CONTRIBUTOR_LINK_SELECTOR: &str = ".friendBlockLinkOverlay";

const COMMENT_TAB_INDEX: usize = 1;

/// Detail page URL of one item.
pub fn item_page_url(community_base_url: &str, item_id: &str) -> String {
    format!(
        "{}/sharedfiles/filedetails/?id={}",
        community_base_url.trim_end_matches('/'),
        item_id
    )
}

/// 页面抓取器
///
/// Reads the rendered detail page of one item and resolves its contributor
/// links into account summaries.
pub struct PageScraper<'a> {
    api: &'a dyn WorkshopApi,
    community_base_url: &'a str,
}

impl<'a> PageScraper<'a> {
    pub fn new(api: &'a dyn WorkshopApi, community_base_url: &'a str) -> Self {
        Self {
            api,
            community_base_url,
        }
    }

    /// Scrapes one item page with the caller's session.
    ///
    /// Contributor resolution fans out concurrently but only after every
    /// read from `session` is done; results keep page order.
    pub async fn scrape(
        &self,
        item_id: &str,
        session: &mut dyn RenderSession,
    ) -> Result<PageFacts, WorkshopError> {
        let page_url = item_page_url(self.community_base_url, item_id);
        debug!(item_id, url = %page_url, "Navigating to item page");
        session.navigate(&page_url).await?;

        let tab_counts = session.inner_html_all(TAB_COUNT_SELECTOR).await?;
        let comment_text = tab_counts.get(COMMENT_TAB_INDEX).ok_or_else(|| {
            WorkshopError::ScrapeElementMissing {
                item_id: item_id.to_string(),
                selector: TAB_COUNT_SELECTOR,
            }
        })?;
        let comment_count = parse_count(TAB_COUNT_SELECTOR, comment_text)?;

        let notes_text = session
            .inner_text(CHANGE_NOTES_SELECTOR)
            .await?
            .ok_or_else(|| WorkshopError::ScrapeElementMissing {
                item_id: item_id.to_string(),
                selector: CHANGE_NOTES_SELECTOR,
            })?;
        let update_count = parse_count(CHANGE_NOTES_SELECTOR, first_space_token(&notes_text))?;

        let links = session
            .attribute_all(CONTRIBUTOR_LINK_SELECTOR, "href")
            .await?
            .into_iter()
            .map(|href| absolutize(&page_url, href))
            .collect::<Vec<_>>();
        debug!(item_id, comment_count, update_count, contributors = links.len(), "Read page facts");

        let contributors = self.resolve_contributors(&links).await?;

        Ok(PageFacts {
            comment_count,
            update_count,
            contributors,
        })
    }

    async fn resolve_contributors(
        &self,
        links: &[String],
    ) -> Result<Vec<AccountSummary>, WorkshopError> {
        let references: Vec<AccountRef> =
            links.iter().map(|l| AccountRef::Url(l.clone())).collect();
        let ids = try_join_all(
            references
                .iter()
                .map(|reference| identity_resolver::resolve(reference, self.api)),
        )
        .await?;

        try_join_all(ids.iter().map(|id| self.api.fetch_summary(id))).await
    }
}

fn parse_count(selector: &'static str, text: &str) -> Result<i64, WorkshopError> {
    parse_leading_int(text).ok_or_else(|| WorkshopError::UnparsableValue {
        selector,
        value: text.to_string(),
    })
}

/// Relative hrefs are resolved against the page, as a browser's `href`
/// property would be.
fn absolutize(page_url: &str, href: String) -> String {
    match Url::parse(&href) {
        Ok(_) => href,
        Err(_) => Url::parse(page_url)
            .and_then(|base| base.join(&href))
            .map(|u| u.to_string())
            .unwrap_or(href),
    }
}
