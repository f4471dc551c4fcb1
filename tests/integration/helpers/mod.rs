// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use workshop_ledger::domain::api::WorkshopApi;
use workshop_ledger::domain::errors::WorkshopError;
use workshop_ledger::domain::models::{AccountSummary, CatalogEntry, ItemDetail, VoteTally};
use workshop_ledger::domain::services::page_scraper::item_page_url;
use workshop_ledger::engines::traits::{RenderError, RenderSession, Renderer};

pub const COMMUNITY: &str = "https://steamcommunity.com";

pub fn summary(steamid: &str, name: &str) -> AccountSummary {
    AccountSummary {
        steamid: steamid.to_string(),
        personaname: name.to_string(),
        profileurl: Some(format!("{}/profiles/{}/", COMMUNITY, steamid)),
        avatarfull: None,
    }
}

pub fn entry(id: &str, up: u64, down: u64) -> CatalogEntry {
    CatalogEntry {
        publishedfileid: id.to_string(),
        title: None,
        vote_data: VoteTally {
            votes_up: up,
            votes_down: down,
            score: None,
        },
    }
}

pub fn detail(id: &str, title: &str) -> ItemDetail {
    serde_json::from_value(json!({
        "publishedfileid": id,
        "result": 1,
        "title": title,
        "creator": "76561190000000001",
        "consumer_app_id": 4000,
        "file_size": "4096",
        "time_created": 1_599_998_400,
        "time_updated": 1_600_000_000,
        "views": 100,
        "subscriptions": 10,
        "lifetime_subscriptions": 12,
        "favorited": 3,
        "lifetime_favorited": 4,
        "description": "raw description",
        "short_description": "raw",
        "tags": [{ "tag": "Maps" }]
    }))
    .expect("valid detail fixture")
}

pub fn profile_link(steamid: &str) -> String {
    format!("{}/profiles/{}/", COMMUNITY, steamid)
}

pub fn vanity_link(vanity: &str) -> String {
    format!("{}/id/{}/", COMMUNITY, vanity)
}

/// In-memory API with call counters.
#[derive(Default)]
pub struct FakeApi {
    pub vanity: HashMap<String, String>,
    pub players: HashMap<String, AccountSummary>,
    pub catalogs: HashMap<String, Vec<CatalogEntry>>,
    pub details: HashMap<String, ItemDetail>,
    pub page_size: u32,
    pub vanity_calls: AtomicUsize,
    pub summary_calls: AtomicUsize,
    pub catalog_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            page_size: 500,
            ..Default::default()
        }
    }

    pub fn with_player(mut self, player: AccountSummary) -> Self {
        self.players.insert(player.steamid.clone(), player);
        self
    }

    pub fn with_vanity(mut self, vanity: &str, steamid: &str) -> Self {
        self.vanity.insert(vanity.to_string(), steamid.to_string());
        self
    }

    pub fn with_catalog(mut self, account: &str, entries: Vec<CatalogEntry>) -> Self {
        self.catalogs.insert(account.to_string(), entries);
        self
    }

    pub fn with_detail(mut self, detail: ItemDetail) -> Self {
        self.details.insert(detail.publishedfileid.clone(), detail);
        self
    }
}

#[async_trait]
impl WorkshopApi for FakeApi {
    async fn resolve_vanity(&self, vanity: &str) -> Result<String, WorkshopError> {
        self.vanity_calls.fetch_add(1, Ordering::SeqCst);
        self.vanity
            .get(vanity)
            .cloned()
            .ok_or_else(|| WorkshopError::VanityUnresolved(vanity.to_string()))
    }

    async fn fetch_summary(&self, account_id: &str) -> Result<AccountSummary, WorkshopError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        self.players
            .get(account_id)
            .cloned()
            .ok_or_else(|| WorkshopError::AccountNotFound(account_id.to_string()))
    }

    async fn fetch_catalog_page(
        &self,
        account_id: &str,
        page: u32,
    ) -> Result<Vec<CatalogEntry>, WorkshopError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        let entries = self.catalogs.get(account_id).cloned().unwrap_or_default();
        let size = self.page_size as usize;
        let start = (page as usize - 1) * size;
        Ok(entries.into_iter().skip(start).take(size).collect())
    }

    async fn fetch_details(&self, item_ids: &[String]) -> Result<Vec<ItemDetail>, WorkshopError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        item_ids
            .iter()
            .map(|id| {
                self.details
                    .get(id)
                    .cloned()
                    .ok_or_else(|| WorkshopError::DetailMissing(id.clone()))
            })
            .collect()
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// What one fake item page renders.
#[derive(Clone, Default)]
pub struct FakePage {
    pub tab_counts: Vec<String>,
    pub change_notes: Option<String>,
    pub links: Vec<String>,
}

impl FakePage {
    pub fn new(comments: i64, updates: i64, links: Vec<String>) -> Self {
        Self {
            tab_counts: vec!["0".to_string(), comments.to_string()],
            change_notes: Some(format!("{} Change Notes", updates)),
            links,
        }
    }
}

/// Renderer over canned pages that counts session opens and closes.
#[derive(Clone, Default)]
pub struct FakeRenderer {
    pages: Arc<HashMap<String, FakePage>>,
    pub opens: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
    /// Closes that happened through `abort`; also counted in `closes`.
    pub aborts: Arc<AtomicUsize>,
    pub visited: Arc<Mutex<Vec<String>>>,
}

impl FakeRenderer {
    pub fn new(pages: Vec<(&str, FakePage)>) -> Self {
        let pages = pages
            .into_iter()
            .map(|(id, page)| (item_page_url(COMMUNITY, id), page))
            .collect();
        Self {
            pages: Arc::new(pages),
            ..Default::default()
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn aborts(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().expect("visited lock").clone()
    }

    /// Waits for a close spawned in the background by an abandoned session.
    pub async fn wait_for_closes(&self, expected: usize) {
        for _ in 0..100 {
            if self.closes() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl Renderer for FakeRenderer {
    async fn open_session(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            renderer: self.clone(),
            current: None,
        }))
    }
}

pub struct FakeSession {
    renderer: FakeRenderer,
    current: Option<FakePage>,
}

impl FakeSession {
    fn page(&self) -> Result<&FakePage, RenderError> {
        self.current
            .as_ref()
            .ok_or_else(|| RenderError::Other("no page loaded".to_string()))
    }
}

#[async_trait]
impl RenderSession for FakeSession {
    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        self.renderer
            .visited
            .lock()
            .expect("visited lock")
            .push(url.to_string());
        let page = self
            .renderer
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| RenderError::Navigation {
                url: url.to_string(),
                reason: "404".to_string(),
            })?;
        self.current = Some(page);
        Ok(())
    }

    async fn inner_html_all(&mut self, selector: &str) -> Result<Vec<String>, RenderError> {
        let page = self.page()?;
        Ok(match selector {
            ".tabCount" => page.tab_counts.clone(),
            _ => Vec::new(),
        })
    }

    async fn inner_text(&mut self, selector: &str) -> Result<Option<String>, RenderError> {
        let page = self.page()?;
        Ok(match selector {
            ".detailsStatNumChangeNotes" => page.change_notes.clone(),
            _ => None,
        })
    }

    async fn attribute_all(
        &mut self,
        selector: &str,
        attribute: &str,
    ) -> Result<Vec<String>, RenderError> {
        let page = self.page()?;
        Ok(match (selector, attribute) {
            (".friendBlockLinkOverlay", "href") => page.links.clone(),
            _ => Vec::new(),
        })
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        self.renderer.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn abort(self: Box<Self>) {
        self.renderer.aborts.fetch_add(1, Ordering::SeqCst);
        self.renderer.closes.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
